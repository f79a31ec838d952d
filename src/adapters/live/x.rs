//! Live adapter for the X (Twitter) API v2.
//!
//! Authenticates with an OAuth 2.0 user-context access token carrying the
//! `tweet.write` and `media.write` scopes.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::BotError;
use crate::ports::publisher::{
    MediaHandle, MediaUpload, PostFuture, PostReceipt, PostRequest, Publisher, UploadFuture,
};

/// Default API host.
pub const X_API_BASE: &str = "https://api.x.com";

/// Live publisher that uploads media and creates posts on X.
pub struct XPublisher {
    client: Client,
    api_base: String,
    access_token: String,
}

impl XPublisher {
    /// Create a publisher for `api_base` using the given bearer token.
    #[must_use]
    pub fn new(api_base: String, access_token: String) -> Self {
        Self { client: Client::new(), api_base, access_token }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base.trim_end_matches('/'))
    }
}

impl Publisher for XPublisher {
    fn upload_media(&self, media: &MediaUpload) -> UploadFuture<'_> {
        let media = media.clone();
        Box::pin(async move {
            let data = std::fs::read(&media.path)?;
            let file_name = media
                .path
                .file_name()
                .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());
            debug!(path = %media.path.display(), bytes = data.len(), "uploading media");

            let part = Part::bytes(data).file_name(file_name).mime_str(&media.mime_type)?;
            let form = Form::new().part("media", part).text("media_category", "tweet_image");

            let response = self
                .client
                .post(self.endpoint("/2/media/upload"))
                .bearer_auth(&self.access_token)
                .multipart(form)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(BotError::Api { status: status.as_u16(), message: body });
            }

            let parsed: DataEnvelope<UploadedMedia> = serde_json::from_str(&body).map_err(|e| {
                BotError::Api {
                    status: status.as_u16(),
                    message: format!("Failed to parse media upload response: {e}"),
                }
            })?;
            Ok(MediaHandle { id: parsed.data.id })
        })
    }

    fn create_post(&self, request: &PostRequest) -> PostFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let mut body = serde_json::json!({ "text": request.text });
            if !request.media_ids.is_empty() {
                body["media"] = serde_json::json!({ "media_ids": request.media_ids });
            }

            let response = self
                .client
                .post(self.endpoint("/2/tweets"))
                .bearer_auth(&self.access_token)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;
            if !status.is_success() {
                return Err(BotError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: DataEnvelope<CreatedPost> =
                serde_json::from_str(&response_text).map_err(|e| BotError::Api {
                    status: status.as_u16(),
                    message: format!("Failed to parse post response: {e}"),
                })?;
            Ok(PostReceipt { id: parsed.data.id, text: parsed.data.text })
        })
    }
}

// --- X API response types ---

#[derive(Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct UploadedMedia {
    id: String,
}

#[derive(Deserialize)]
struct CreatedPost {
    id: String,
    text: String,
}
