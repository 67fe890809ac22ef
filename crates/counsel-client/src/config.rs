//! Client configuration.
//!
//! Configuration is environment-variable driven with sensible defaults, so the
//! same binary can point at a local or deployed backend without rebuilds.

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the REST client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. Transport-level only; the core imposes none.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from environment variables.
    ///
    /// - `COUNSEL_API_URL`: backend base URL (default `http://localhost:8000`)
    /// - `COUNSEL_TIMEOUT_SECS`: request timeout in seconds (default 30)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let base_url = env::var("COUNSEL_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = env::var("COUNSEL_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        Self { base_url, timeout }
    }
}
