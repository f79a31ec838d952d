//! Replaying adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::image_fetcher::{DownloadedImage, FetchFuture, ImageFetcher, PORT};

/// Serves recorded image downloads from a cassette.
pub struct ReplayingImageFetcher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageFetcher {
    /// Create a fetcher backed by `replayer`.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageFetcher for ReplayingImageFetcher {
    fn fetch_image(&self, _image_ref: &str) -> FetchFuture<'_> {
        let result = replay::<DownloadedImage>(&self.replayer, PORT, "fetch_image");
        Box::pin(async move { result })
    }
}
