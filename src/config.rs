//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::adapters::live::x::X_API_BASE;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Issued-number store.
    pub store: StoreConfig,
    /// Range numbers are drawn from.
    pub range: RangeConfig,
    /// Content API endpoints.
    pub content: ContentConfig,
    /// Post formatting and local image handling.
    pub post: PostConfig,
    /// X API settings.
    pub x: XConfig,
}

/// Issued-number store settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis connection URL.
    pub url: Option<String>,
    /// Key of the set holding issued numbers.
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { url: None, key: "used_numbers".to_string() }
    }
}

/// Closed range of quote indices.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Lowest index (inclusive).
    pub min: i64,
    /// Highest index (inclusive).
    pub max: i64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self { min: 0, max: 879 }
    }
}

/// Content API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Query URL selecting the quote list; `[n]` is appended per request.
    pub query_url: Option<String>,
    /// Image CDN base URL.
    pub image_base_url: Option<String>,
    /// Width images are requested at.
    pub image_width: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self { query_url: None, image_base_url: None, image_width: 700 }
    }
}

/// Post formatting and local image handling.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    /// Hashtag appended to every post. Empty to omit.
    pub hashtag: String,
    /// Maximum post length in characters.
    pub max_length: usize,
    /// How many extra numbers to draw when a post is too long.
    pub max_redraws: u32,
    /// Directory downloaded images are saved to.
    pub image_dir: PathBuf,
    /// Format images are saved in: jpeg, png or webp.
    pub image_format: String,
    /// Keep the image on disk after a successful post.
    pub keep_images: bool,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            hashtag: "#itysl".to_string(),
            max_length: 280,
            max_redraws: 5,
            image_dir: PathBuf::from("images"),
            image_format: "jpeg".to_string(),
            keep_images: false,
        }
    }
}

/// X API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct XConfig {
    /// API host.
    pub api_base: String,
    /// OAuth 2.0 user-context access token.
    pub access_token: Option<String>,
}

impl Default for XConfig {
    fn default() -> Self {
        Self { api_base: X_API_BASE.to_string(), access_token: None }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the store URL, preferring the `REDIS_URL` environment variable.
    #[must_use]
    pub fn store_url(&self) -> Option<String> {
        non_empty(std::env::var("REDIS_URL").ok()).or_else(|| non_empty(self.store.url.clone()))
    }

    /// Get the X access token, preferring the `X_ACCESS_TOKEN` environment variable.
    #[must_use]
    pub fn x_token(&self) -> Option<String> {
        non_empty(std::env::var("X_ACCESS_TOKEN").ok())
            .or_else(|| non_empty(self.x.access_token.clone()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `QUOTEBOT_CONFIG` environment variable
/// 3. `~/.config/quotebot/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("QUOTEBOT_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/quotebot/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/quotebot/config.toml")
    } else {
        PathBuf::from("quotebot.toml")
    }
}
