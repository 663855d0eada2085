//! HTTP transport for provider requests.
//!
//! [`Fetcher`] wraps a configured `reqwest` client and maps provider status
//! codes onto the error taxonomy. Timeouts are enforced here and only here;
//! the subscription layer above deliberately imposes none.

use crate::{Error, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP client for fetching provider JSON payloads.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with the default 30 second request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Creates a new fetcher with a custom request timeout (primarily for tests).
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("newsdeck/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Fetches `url` and parses the body as JSON.
    ///
    /// Status mapping follows the providers' documented behavior: 403 means
    /// the daily quota is spent, 429 means rate limiting, 404 means the
    /// resource does not exist. Every other non-2xx status and any
    /// non-JSON body becomes a transport-level failure.
    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(%status, url, "provider response");

        match status.as_u16() {
            403 => Err(Error::QuotaExceeded),
            429 => Err(Error::RateLimited),
            404 => Err(Error::NotFound(format!("no resource at '{url}'"))),
            s if !status.is_success() => Err(Error::Http { status: s }),
            _ => {
                let payload = response.json::<Value>().await?;
                Ok(payload)
            },
        }
    }
}
