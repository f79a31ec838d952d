//! Replaying adapter for the `QuoteSource` port.

use std::sync::{Arc, Mutex};

use super::replay;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::quote_source::{QuoteFuture, QuoteRecord, QuoteSource, PORT};

/// Serves recorded quotes from a cassette.
pub struct ReplayingQuoteSource {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingQuoteSource {
    /// Create a source backed by `replayer`.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl QuoteSource for ReplayingQuoteSource {
    fn fetch_quote(&self, number: i64) -> QuoteFuture<'_> {
        let result = replay::<QuoteRecord>(&self.replayer, PORT, "fetch_quote");
        // The recorded number belongs to the recording run; report the one drawn now.
        Box::pin(async move { result.map(|record| QuoteRecord { number, ..record }) })
    }
}
