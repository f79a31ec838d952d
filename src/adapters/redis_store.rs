//! Redis-backed number store.
//!
//! Issued numbers live in one Redis set, so they survive across runs of the
//! bot. A single connection is opened at construction and reused for every
//! command.

use redis::{Client, Commands, Connection};
use tracing::debug;

use crate::error::BotError;
use crate::ports::NumberStore;

/// Number store backed by a Redis set.
pub struct RedisStore {
    conn: Connection,
    key: String,
}

impl RedisStore {
    /// Connect to the Redis server at `url` and track members under `key`.
    ///
    /// Use a `rediss://` URL for TLS; append `#insecure` to skip certificate
    /// verification on hosts that present self-signed certificates.
    ///
    /// # Errors
    ///
    /// Returns [`BotError::MissingStoreUrl`] if `url` is empty, or a store
    /// error if the URL is invalid or the server cannot be reached.
    pub fn connect(url: &str, key: impl Into<String>) -> Result<Self, BotError> {
        if url.trim().is_empty() {
            return Err(BotError::MissingStoreUrl);
        }
        let client = Client::open(url)?;
        let conn = client.get_connection()?;
        let key = key.into();
        debug!(key = %key, "connected to redis");
        Ok(Self { conn, key })
    }
}

impl NumberStore for RedisStore {
    fn add(&mut self, value: i64) -> Result<bool, BotError> {
        let added: i64 = self.conn.sadd(&self.key, value)?;
        Ok(added > 0)
    }

    fn contains(&mut self, value: i64) -> Result<bool, BotError> {
        Ok(self.conn.sismember(&self.key, value)?)
    }

    fn count(&mut self) -> Result<u64, BotError> {
        Ok(self.conn.scard(&self.key)?)
    }

    fn clear(&mut self) -> Result<bool, BotError> {
        let deleted: i64 = self.conn.del(&self.key)?;
        Ok(deleted > 0)
    }
}
