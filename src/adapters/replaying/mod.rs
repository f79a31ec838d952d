//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_fetcher;
pub mod publisher;
pub mod quote_source;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::BotError;

/// Take the next recorded output for `port`/`method` and decode it.
///
/// A recorded `Err` comes back as an API error carrying the recorded message.
pub(crate) fn replay<T: DeserializeOwned>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<T, BotError> {
    let interaction = replayer
        .lock()
        .map_err(|e| BotError::Config(format!("Replayer lock poisoned: {e}")))?
        .next_interaction(port, method)
        .map_err(BotError::Config)?;

    let output = interaction.output;
    if let Some(err) = output.get("Err").or_else(|| output.get("err")) {
        let message = err.as_str().unwrap_or("replayed error").to_string();
        return Err(BotError::Api { status: 0, message });
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| {
        BotError::Config(format!("Recorded {port}::{method} output does not decode: {e}"))
    })
}
