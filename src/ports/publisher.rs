//! Publisher port for the social platform.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::BotError;

/// A local media file to upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaUpload {
    /// Path of the file on disk.
    pub path: PathBuf,
    /// MIME type of the file.
    pub mime_type: String,
}

/// Handle to uploaded media, referenced when creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaHandle {
    /// Platform media id.
    pub id: String,
}

/// A post to create.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    /// Post text.
    pub text: String,
    /// Media ids to attach.
    pub media_ids: Vec<String>,
}

/// A created post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReceipt {
    /// Platform post id.
    pub id: String,
    /// Text as stored by the platform.
    pub text: String,
}

/// Port name used in cassettes.
pub const PORT: &str = "publisher";

/// Boxed future type returned by [`Publisher::upload_media`].
pub type UploadFuture<'a> =
    Pin<Box<dyn Future<Output = Result<MediaHandle, BotError>> + Send + 'a>>;

/// Boxed future type returned by [`Publisher::create_post`].
pub type PostFuture<'a> = Pin<Box<dyn Future<Output = Result<PostReceipt, BotError>> + Send + 'a>>;

/// Publishes posts with an attached image.
pub trait Publisher: Send + Sync {
    /// Upload a media file and return its handle.
    fn upload_media(&self, media: &MediaUpload) -> UploadFuture<'_>;

    /// Create one post.
    fn create_post(&self, request: &PostRequest) -> PostFuture<'_>;
}
