//! Adapter implementations for port traits.
//!
//! - `live/` — Real API implementations
//! - `memory` / `redis_store` — Number store backends
//! - `recording/` — Record interactions to cassettes
//! - `replaying/` — Replay interactions from cassettes

pub mod live;
pub mod memory;
pub mod recording;
pub mod redis_store;
pub mod replaying;
