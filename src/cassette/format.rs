//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: metadata plus every port interaction in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Recorded interactions.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the session, starting at 0.
    pub seq: u64,
    /// Port name, e.g. `quote_source`.
    pub port: String,
    /// Method name, e.g. `fetch_quote`.
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// `{"Ok": value}` or `{"Err": message}`.
    pub output: serde_json::Value,
}
