//! Client configuration.
//!
//! Defaults match the upstream-facing behavior of the original service:
//! 5-minute response cache, 10-second request timeout, 1000 most recent
//! submissions per fetch. Every value can be overridden through environment
//! variables (`CFTRACK_*`).

use std::time::Duration;

use serde::Serialize;

const DEFAULT_API_BASE_URL: &str = "https://codeforces.com/api";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SUBMISSION_LIMIT: u32 = 1000;

/// Configuration for [`JudgeClient`](crate::client::JudgeClient) and its
/// transport.
#[derive(Debug, Clone, Serialize)]
pub struct ClientConfig {
    /// Base URL of the judge's REST API, without a trailing slash.
    pub api_base_url: String,
    /// How long a cached upstream response stays valid.
    pub cache_ttl: Duration,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Maximum number of submissions requested per fetch (newest first).
    pub submission_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            submission_limit: DEFAULT_SUBMISSION_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Build a config from defaults plus `CFTRACK_*` environment overrides.
    ///
    /// Unparseable numeric values fall back to the default rather than
    /// failing startup.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(url) = std::env::var("CFTRACK_API_BASE_URL") {
            if !url.is_empty() {
                cfg.api_base_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Some(secs) = env_u64("CFTRACK_CACHE_TTL_SECS") {
            cfg.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = env_u64("CFTRACK_REQUEST_TIMEOUT_SECS") {
            cfg.request_timeout = Duration::from_secs(secs);
        }
        if let Some(limit) = env_u64("CFTRACK_SUBMISSION_LIMIT") {
            cfg.submission_limit = limit.min(u32::MAX as u64) as u32;
        }
        cfg
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}
