//! Recording adapter for the `Publisher` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::publisher::{MediaUpload, PostFuture, PostRequest, Publisher, UploadFuture, PORT};

/// Records uploads and posts while delegating to an inner publisher.
pub struct RecordingPublisher {
    inner: Box<dyn Publisher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingPublisher {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn Publisher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Publisher for RecordingPublisher {
    fn upload_media(&self, media: &MediaUpload) -> UploadFuture<'_> {
        let media = media.clone();
        Box::pin(async move {
            let result = self.inner.upload_media(&media).await;
            record_result(&self.recorder, PORT, "upload_media", &media, &result);
            result
        })
    }

    fn create_post(&self, request: &PostRequest) -> PostFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.create_post(&request).await;
            record_result(&self.recorder, PORT, "create_post", &request, &result);
            result
        })
    }
}
