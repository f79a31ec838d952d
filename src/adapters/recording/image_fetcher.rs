//! Recording adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_fetcher::{FetchFuture, ImageFetcher, PORT};

/// Records image downloads while delegating to an inner fetcher.
pub struct RecordingImageFetcher {
    inner: Box<dyn ImageFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageFetcher {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn ImageFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageFetcher for RecordingImageFetcher {
    fn fetch_image(&self, image_ref: &str) -> FetchFuture<'_> {
        let image_ref = image_ref.to_string();
        Box::pin(async move {
            let result = self.inner.fetch_image(&image_ref).await;
            record_result(&self.recorder, PORT, "fetch_image", &image_ref, &result);
            result
        })
    }
}
