//! Quote source port for the content API.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::BotError;

/// One quote as returned by the content API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// The allocated number this quote was fetched for.
    pub number: i64,
    /// Sketch title.
    pub title: String,
    /// Human readable label, e.g. `"Season 1, Episode 3"`.
    pub season_episode: String,
    /// The quote text.
    pub quote: String,
    /// Asset reference of the character image (e.g. `"image-abc123-700x700-jpg"`).
    pub image_ref: String,
}

/// Port name used in cassettes.
pub const PORT: &str = "quote_source";

/// Boxed future type returned by [`QuoteSource::fetch_quote`].
pub type QuoteFuture<'a> = Pin<Box<dyn Future<Output = Result<QuoteRecord, BotError>> + Send + 'a>>;

/// Turns an allocated number into a quote record.
pub trait QuoteSource: Send + Sync {
    /// Fetch the quote stored at index `number`.
    fn fetch_quote(&self, number: i64) -> QuoteFuture<'_>;
}
