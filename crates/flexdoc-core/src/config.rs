//! Configuration module
//!
//! Environment-driven configuration for the API client. The base URL and the
//! overall request timeout are the only externally configurable values; all
//! endpoint paths are fixed constants in [`crate::constants`].

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API client configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the conversion backend, without a trailing slash.
    pub base_url: String,
    /// Overall request timeout. Some conversions take a while; the default
    /// is 30 seconds.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolve from the environment: `FLEXDOC_API_URL` and
    /// `FLEXDOC_TIMEOUT_SECS`, with local-development defaults.
    pub fn from_env() -> Self {
        let base_url = env::var("FLEXDOC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = env::var("FLEXDOC_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
