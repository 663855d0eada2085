//! Error types and handling for newsdeck-core operations.
//!
//! Provider failures are categorized so that the feed layer can surface a
//! distinct user-facing message per failure class (quota, rate limit,
//! missing resource, everything else). Ambient variants cover configuration,
//! storage, and serialization failures.
//!
//! Errors carry a recoverability hint for retry logic:
//!
//! ```rust
//! use newsdeck_core::Error;
//!
//! let err = Error::RateLimited;
//! assert!(err.is_recoverable());
//! assert_eq!(err.user_message(), "too many requests, wait and retry");
//! ```

use thiserror::Error;

/// The main error type for newsdeck-core operations.
///
/// All public functions in newsdeck-core return `Result<T, Error>` for
/// consistent error handling. Provider-facing variants map one-to-one onto
/// the HTTP statuses the news and weather APIs actually emit.
#[derive(Error, Debug)]
pub enum Error {
    /// The provider's daily request quota is exhausted (HTTP 403).
    ///
    /// Not worth retrying until the quota window rolls over.
    #[error("provider quota exceeded")]
    QuotaExceeded,

    /// The provider is rate limiting this client (HTTP 429).
    ///
    /// Retryable after a short delay; no automatic retry is performed.
    #[error("provider rate limit hit")]
    RateLimited,

    /// Requested resource was not found.
    ///
    /// Covers HTTP 404 responses, weather lookups for unknown locations
    /// (`cod == "404"` in a 2xx body), and missing blog posts. Not-found
    /// results are never cached, so an identical later request retries.
    #[error("not found: {0}")]
    NotFound(String),

    /// The provider returned a non-success status outside the mapped set.
    #[error("request failed with status {status}")]
    Http {
        /// HTTP status code returned by the server.
        status: u16,
    },

    /// Network operation failed below the HTTP status level.
    ///
    /// Covers connection failures, timeouts, TLS errors, and bodies that
    /// could not be decoded as JSON. The underlying `reqwest::Error` is
    /// preserved for detailed inspection.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    #[error("configuration error: {0}")]
    Config(String),

    /// Blog storage operation failed beyond basic file I/O.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

/// Result alias used throughout newsdeck-core.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Human-readable message surfaced to the view layer as the `error`
    /// field of a [`FetchState`](crate::feed::FetchState).
    ///
    /// Each provider failure class gets a distinct message so the UI can
    /// tell quota exhaustion apart from transient rate limiting.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::QuotaExceeded => "daily request limit reached, retry later".to_string(),
            Self::RateLimited => "too many requests, wait and retry".to_string(),
            Self::NotFound(_) => "resource not found".to_string(),
            Self::Http { status } => format!("request failed (status {status})"),
            _ => "request failed".to_string(),
        }
    }

    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` for failures that are typically temporary: rate
    /// limits, server-side errors, network timeouts and connection drops.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::RateLimited => true,
            Self::Http { status } => *status >= 500,
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }
}
