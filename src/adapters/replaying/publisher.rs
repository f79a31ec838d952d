//! Replaying adapter for the `Publisher` port.

use std::sync::{Arc, Mutex};

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::publisher::{
    MediaHandle, MediaUpload, PostFuture, PostReceipt, PostRequest, Publisher, UploadFuture, PORT,
};

/// Serves recorded uploads and posts from a cassette.
pub struct ReplayingPublisher {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingPublisher {
    /// Create a publisher backed by `replayer`.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl Publisher for ReplayingPublisher {
    fn upload_media(&self, _media: &MediaUpload) -> UploadFuture<'_> {
        let result = replay::<MediaHandle>(&self.replayer, PORT, "upload_media");
        Box::pin(async move { result })
    }

    fn create_post(&self, _request: &PostRequest) -> PostFuture<'_> {
        let result = replay::<PostReceipt>(&self.replayer, PORT, "create_post");
        Box::pin(async move { result })
    }
}
