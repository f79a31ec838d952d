//! Live adapters for the Sanity content API and image CDN.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::BotError;
use crate::params::mime_for_extension;
use crate::ports::image_fetcher::{DownloadedImage, FetchFuture, ImageFetcher};
use crate::ports::quote_source::{QuoteFuture, QuoteRecord, QuoteSource};

/// Fetches quotes by index from a GROQ query endpoint.
pub struct SanityQuoteSource {
    client: Client,
    query_url: String,
}

impl SanityQuoteSource {
    /// Create a quote source for the given query URL.
    ///
    /// The URL must end in a query selecting the quote list; the allocated
    /// number is appended as `[n]` to pick one entry.
    #[must_use]
    pub fn new(query_url: String) -> Self {
        Self { client: Client::new(), query_url }
    }
}

impl QuoteSource for SanityQuoteSource {
    fn fetch_quote(&self, number: i64) -> QuoteFuture<'_> {
        Box::pin(async move {
            let url = format!("{}[{number}]", self.query_url);
            debug!(%url, "fetching quote");

            let response = self.client.get(&url).send().await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(BotError::Api { status: status.as_u16(), message: body });
            }

            let parsed: QueryResponse = serde_json::from_str(&body).map_err(|e| BotError::Api {
                status: status.as_u16(),
                message: format!("Failed to parse quote: {e}"),
            })?;
            let doc = parsed.result.ok_or_else(|| BotError::Api {
                status: status.as_u16(),
                message: format!("No quote at index {number}"),
            })?;

            Ok(QuoteRecord {
                number,
                title: doc.sketch,
                season_episode: format!(
                    "Season {}, Episode {}",
                    label(&doc.season),
                    label(&doc.episode)
                ),
                quote: doc.quote,
                image_ref: doc.characterimage.asset.reference,
            })
        })
    }
}

/// Render a season/episode field that may arrive as a number or a string.
fn label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Downloads images from the Sanity image CDN.
pub struct SanityImageFetcher {
    client: Client,
    base_url: String,
    width: u32,
}

impl SanityImageFetcher {
    /// Create a fetcher for the given CDN base URL, resizing to `width` pixels.
    #[must_use]
    pub fn new(base_url: String, width: u32) -> Self {
        Self { client: Client::new(), base_url, width }
    }
}

impl ImageFetcher for SanityImageFetcher {
    fn fetch_image(&self, image_ref: &str) -> FetchFuture<'_> {
        let image_ref = image_ref.to_string();
        Box::pin(async move {
            let (url, extension) = image_url(&self.base_url, &image_ref, self.width)?;
            debug!(%url, "downloading image");

            let response = self.client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(BotError::Api {
                    status: status.as_u16(),
                    message: format!("Failed to download image {url}: {message}"),
                });
            }

            let mime_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(';').next())
                .map(str::trim)
                .filter(|v| v.starts_with("image/"))
                .map_or_else(|| mime_for_extension(&extension).to_string(), str::to_string);
            let data = response.bytes().await?.to_vec();

            Ok(DownloadedImage { url, data, mime_type })
        })
    }
}

/// Build the CDN URL for an asset reference like `image-<id>-<WxH>-<ext>`.
///
/// Returns the URL and the file extension.
///
/// # Errors
///
/// Returns an error if the reference has no extension segment.
pub fn image_url(
    base_url: &str,
    image_ref: &str,
    width: u32,
) -> Result<(String, String), BotError> {
    let asset = image_ref.strip_prefix("image-").unwrap_or(image_ref);
    let (stem, extension) = asset
        .rsplit_once('-')
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
        .ok_or_else(|| {
            BotError::InvalidArgument(format!("Malformed image reference '{image_ref}'"))
        })?;

    let url = format!("{}/{stem}.{extension}?w={width}", base_url.trim_end_matches('/'));
    Ok((url, extension.to_string()))
}

// --- Sanity API response types ---

#[derive(Deserialize)]
struct QueryResponse {
    result: Option<QuoteDocument>,
}

#[derive(Deserialize)]
struct QuoteDocument {
    sketch: String,
    season: serde_json::Value,
    episode: serde_json::Value,
    quote: String,
    characterimage: CharacterImage,
}

#[derive(Deserialize)]
struct CharacterImage {
    asset: AssetRef,
}

#[derive(Deserialize)]
struct AssetRef {
    #[serde(rename = "_ref")]
    reference: String,
}
