//! Recording adapter for the `QuoteSource` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::quote_source::{QuoteFuture, QuoteSource, PORT};

/// Records quote fetches while delegating to an inner source.
pub struct RecordingQuoteSource {
    inner: Box<dyn QuoteSource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingQuoteSource {
    /// Wrap `inner`, recording into `recorder`.
    pub fn new(inner: Box<dyn QuoteSource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl QuoteSource for RecordingQuoteSource {
    fn fetch_quote(&self, number: i64) -> QuoteFuture<'_> {
        Box::pin(async move {
            let result = self.inner.fetch_quote(number).await;
            record_result(&self.recorder, PORT, "fetch_quote", &number, &result);
            result
        })
    }
}
