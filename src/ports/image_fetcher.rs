//! Image fetcher port for downloading quote artwork.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::BotError;

/// A downloaded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadedImage {
    /// The URL the bytes were downloaded from.
    pub url: String,
    /// Raw image bytes.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// MIME type of the image (e.g., `"image/jpeg"`).
    pub mime_type: String,
}

/// Port name used in cassettes.
pub const PORT: &str = "image_fetcher";

/// Boxed future type returned by [`ImageFetcher::fetch_image`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<DownloadedImage, BotError>> + Send + 'a>>;

/// Resolves an image reference to a URL and downloads it.
pub trait ImageFetcher: Send + Sync {
    /// Download the image behind `image_ref`.
    fn fetch_image(&self, image_ref: &str) -> FetchFuture<'_>;
}

/// Serde helper for serializing `Vec<u8>` as base64 strings in cassettes.
mod base64_bytes {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize bytes as base64 string.
    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        serializer.serialize_str(&encoded)
    }

    /// Deserialize base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        base64::engine::general_purpose::STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}
