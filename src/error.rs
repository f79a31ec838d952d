//! Unified error type for quotebot.

use thiserror::Error;

/// Errors that can occur while drawing, fetching or posting a quote.
#[derive(Debug, Error)]
pub enum BotError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store rejected a command or could not be reached.
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No store URL configured.
    #[error("No store URL configured. Set REDIS_URL or add [store] url to the config file.")]
    MissingStoreUrl,

    /// No credential configured for an external service.
    #[error("No credential for {service}. Set {env_var} or add it to config file.")]
    MissingCredential {
        /// The service name.
        service: String,
        /// The environment variable name.
        env_var: String,
    },

    /// The allocation range contains no values.
    #[error("Empty range: min {min} is greater than max {max}")]
    EmptyRange {
        /// Lower bound (inclusive).
        min: i64,
        /// Upper bound (inclusive).
        max: i64,
    },

    /// Sampling kept hitting used values; the store disagrees with the range.
    #[error("Allocation stalled after {attempts} draws; store holds {used} of {size} values")]
    AllocationStalled {
        /// Number of draws attempted.
        attempts: u64,
        /// Values the store reported as used.
        used: u64,
        /// Size of the range.
        size: u64,
    },

    /// Every drawn quote produced a post over the length limit.
    #[error("Post is {length} characters, limit is {limit} (gave up after {draws} draws)")]
    PostTooLong {
        /// Length of the last formatted post.
        length: usize,
        /// Configured limit.
        limit: usize,
        /// Numbers drawn before giving up.
        draws: u32,
    },
}
