//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the application core and an
//! external system. Implementations live in `src/adapters/`.

pub mod image_fetcher;
pub mod number_store;
pub mod publisher;
pub mod quote_source;

pub use image_fetcher::ImageFetcher;
pub use number_store::NumberStore;
pub use publisher::Publisher;
pub use quote_source::{QuoteRecord, QuoteSource};
