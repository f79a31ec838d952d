//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::sanity::{SanityImageFetcher, SanityQuoteSource};
use crate::adapters::live::x::XPublisher;
use crate::adapters::memory::MemoryStore;
use crate::adapters::recording::image_fetcher::RecordingImageFetcher;
use crate::adapters::recording::publisher::RecordingPublisher;
use crate::adapters::recording::quote_source::RecordingQuoteSource;
use crate::adapters::redis_store::RedisStore;
use crate::adapters::replaying::image_fetcher::ReplayingImageFetcher;
use crate::adapters::replaying::publisher::ReplayingPublisher;
use crate::adapters::replaying::quote_source::ReplayingQuoteSource;
use crate::cassette::loader::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::config::Config;
use crate::error::BotError;
use crate::ports::{ImageFetcher, NumberStore, Publisher, QuoteSource};

/// Bundles the HTTP-facing ports used by a post run.
pub struct ServiceContext {
    /// Quote source port.
    pub quotes: Box<dyn QuoteSource>,
    /// Image fetcher port.
    pub images: Box<dyn ImageFetcher>,
    /// Publisher port; absent when the run will not publish.
    pub publisher: Option<Box<dyn Publisher>>,
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        tracing::debug!(interactions = recorder.interaction_count(), "writing cassette");
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a live context. The publisher is only built when `publish` is set,
    /// so dry runs need no access token.
    ///
    /// # Errors
    ///
    /// Returns an error if a content URL or the access token is not configured.
    pub fn live(config: &Config, publish: bool) -> Result<Self, BotError> {
        let query_url = config.content.query_url.clone().ok_or_else(|| {
            BotError::Config(
                "No content query URL. Add [content] query_url to the config file.".into(),
            )
        })?;
        let image_base_url = config.content.image_base_url.clone().ok_or_else(|| {
            BotError::Config(
                "No image base URL. Add [content] image_base_url to the config file.".into(),
            )
        })?;

        let publisher: Option<Box<dyn Publisher>> = if publish {
            let token = config.x_token().ok_or(BotError::MissingCredential {
                service: "X".into(),
                env_var: "X_ACCESS_TOKEN".into(),
            })?;
            Some(Box::new(XPublisher::new(config.x.api_base.clone(), token)))
        } else {
            None
        };

        Ok(Self {
            quotes: Box::new(SanityQuoteSource::new(query_url)),
            images: Box::new(SanityImageFetcher::new(image_base_url, config.content.image_width)),
            publisher,
            replayer: None,
        })
    }

    /// Create a recording context that wraps the live adapters with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be built.
    pub fn recording(config: &Config, publish: bool) -> Result<(Self, RecordingSession), BotError> {
        let live = Self::live(config, publish)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".quotebot/cassettes")
            .join(&timestamp)
            .join("session.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-session"),
            get_commit_hash(),
        )));

        let ctx = Self {
            quotes: Box::new(RecordingQuoteSource::new(live.quotes, Arc::clone(&recorder))),
            images: Box::new(RecordingImageFetcher::new(live.images, Arc::clone(&recorder))),
            publisher: live.publisher.map(|p| {
                Box::new(RecordingPublisher::new(p, Arc::clone(&recorder))) as Box<dyn Publisher>
            }),
            replayer: None,
        };

        Ok((ctx, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path, publish: bool) -> Result<Self, BotError> {
        let replayer = Arc::new(Mutex::new(load_cassette(path)?));
        let publisher: Option<Box<dyn Publisher>> = if publish {
            Some(Box::new(ReplayingPublisher::new(Arc::clone(&replayer))))
        } else {
            None
        };
        Ok(Self {
            quotes: Box::new(ReplayingQuoteSource::new(Arc::clone(&replayer))),
            images: Box::new(ReplayingImageFetcher::new(Arc::clone(&replayer))),
            publisher,
            replayer: Some(replayer),
        })
    }

    /// Recorded interactions not consumed by this run, when replaying.
    #[must_use]
    pub fn unreplayed(&self) -> Option<usize> {
        let replayer = self.replayer.as_ref()?;
        replayer.lock().ok().map(|r| r.remaining())
    }
}

/// Open the issued-number store.
///
/// Replay runs use a fresh in-memory store so they never touch shared state.
///
/// # Errors
///
/// Returns [`BotError::MissingStoreUrl`] if no URL is configured, or a store
/// error if the connection fails.
pub fn open_store(config: &Config, replaying: bool) -> Result<Box<dyn NumberStore>, BotError> {
    if replaying {
        return Ok(Box::new(MemoryStore::default()));
    }
    let url = config.store_url().ok_or(BotError::MissingStoreUrl)?;
    Ok(Box::new(RedisStore::connect(&url, config.store.key.clone())?))
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> Config {
        let mut config = Config::default();
        config.content.query_url = Some("https://example.com/query".into());
        config.content.image_base_url = Some("https://cdn.example.com".into());
        config.x.access_token = Some("token".into());
        config
    }

    #[test]
    fn live_requires_query_url() {
        let mut config = configured();
        config.content.query_url = None;
        let err = ServiceContext::live(&config, false).err().unwrap();
        assert!(err.to_string().contains("query_url"));
    }

    #[test]
    fn live_dry_run_needs_no_token() {
        let mut config = configured();
        config.x.access_token = None;
        let ctx = ServiceContext::live(&config, false).unwrap();
        assert!(ctx.publisher.is_none());
        assert!(ctx.unreplayed().is_none());
    }

    #[test]
    fn live_publish_builds_publisher() {
        let ctx = ServiceContext::live(&configured(), true).unwrap();
        assert!(ctx.publisher.is_some());
    }

    #[test]
    fn replay_store_is_in_memory() {
        let mut store = open_store(&Config::default(), true).unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn missing_cassette_fails() {
        assert!(ServiceContext::replaying(Path::new("/nonexistent.cassette.yaml"), true).is_err());
    }
}
