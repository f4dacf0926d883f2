// SPDX-License-Identifier: MIT
//! Typed client for the judge's public REST API.
//!
//! Every request goes through the shared [`ResponseCache`] first; a hit
//! returns without network I/O. On a miss the client performs a GET through
//! the [`Transport`], validates the `{status, result, comment}` envelope,
//! and caches the `result` payload under the canonical request key. Failed
//! calls are never cached.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::error::JudgeError;
use crate::model::{RatingChange, RatingChangeWire, Submission, UserInfo};
use crate::transport::{HttpTransport, Transport};

/// The upstream response envelope. `result` is only present on success,
/// `comment` only on failure.
#[derive(Debug, serde::Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    comment: Option<String>,
}

/// Client for the three user-facing endpoints the pipeline needs.
pub struct JudgeClient {
    config: ClientConfig,
    cache: Arc<ResponseCache>,
    transport: Arc<dyn Transport>,
}

impl JudgeClient {
    /// Build a client over an injected cache and transport.
    pub fn new(
        config: ClientConfig,
        cache: Arc<ResponseCache>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            cache,
            transport,
        }
    }

    /// Build a client with a fresh cache and the real HTTP transport.
    pub fn from_config(config: ClientConfig) -> anyhow::Result<Self> {
        let cache = Arc::new(ResponseCache::new(config.cache_ttl));
        let transport = Arc::new(HttpTransport::new(config.request_timeout)?);
        Ok(Self::new(config, cache, transport))
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Canonical request signature: endpoint plus params sorted by name.
    /// Used both as the cache key and as the request query order.
    fn canonical_key(endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<(&str, &str)> = params.to_vec();
        sorted.sort_by_key(|&(name, _)| name);
        let mut key = endpoint.to_string();
        for (i, (name, value)) in sorted.iter().enumerate() {
            key.push(if i == 0 { '?' } else { '&' });
            key.push_str(name);
            key.push('=');
            key.push_str(value);
        }
        key
    }

    /// Fetch `endpoint` with `params`, consulting the cache first.
    ///
    /// Returns the envelope's `result` payload. Upstream rejections carry
    /// the upstream comment verbatim; transport failures and non-JSON
    /// bodies surface as [`JudgeError::Transport`].
    pub async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, JudgeError> {
        let key = Self::canonical_key(endpoint, params);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let url = format!("{}{}", self.config.api_base_url, key);
        debug!(%url, "fetching from upstream");
        let body = self
            .transport
            .get(&url)
            .await
            .map_err(|e| JudgeError::Transport(format!("{e:#}")))?;

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| JudgeError::Transport(format!("invalid JSON from upstream: {e}")))?;

        if envelope.status != "OK" {
            let comment = envelope
                .comment
                .unwrap_or_else(|| "upstream returned a failure status".to_string());
            warn!(endpoint, %comment, "upstream rejected request");
            return Err(JudgeError::UpstreamRejected(comment));
        }

        let result = envelope.result.ok_or_else(|| {
            JudgeError::UpstreamRejected("envelope status OK but result missing".to_string())
        })?;

        self.cache.insert(&key, result.clone());
        Ok(result)
    }

    /// Fetch a single user's info.
    ///
    /// The upstream endpoint accepts a batch of handles; this client only
    /// ever requests one and unwraps the single element.
    pub async fn get_user_info(&self, handle: &str) -> Result<UserInfo, JudgeError> {
        let result = self
            .fetch("/user.info", &[("handles", handle)])
            .await
            .map_err(|e| refine_not_found(e, handle))?;
        let mut users: Vec<UserInfo> = decode("/user.info", result)?;
        if users.is_empty() {
            return Err(JudgeError::HandleNotFound(handle.to_string()));
        }
        Ok(users.swap_remove(0))
    }

    /// Fetch a user's rated contest history, chronological order.
    pub async fn get_rating_history(&self, handle: &str) -> Result<Vec<RatingChange>, JudgeError> {
        let result = self
            .fetch("/user.rating", &[("handle", handle)])
            .await
            .map_err(|e| refine_not_found(e, handle))?;
        let wire: Vec<RatingChangeWire> = decode("/user.rating", result)?;
        Ok(wire.into_iter().map(RatingChange::from).collect())
    }

    /// Fetch a user's most recent submissions, newest first.
    ///
    /// The newest-first ordering is an upstream guarantee that the
    /// aggregator's dedup attribution relies on.
    pub async fn get_submissions(&self, handle: &str) -> Result<Vec<Submission>, JudgeError> {
        let count = self.config.submission_limit.to_string();
        let result = self
            .fetch("/user.status", &[("handle", handle), ("count", &count)])
            .await
            .map_err(|e| refine_not_found(e, handle))?;
        decode("/user.status", result)
    }
}

fn decode<T: serde::de::DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, JudgeError> {
    serde_json::from_value(value)
        .map_err(|e| JudgeError::Transport(format!("unexpected {endpoint} payload shape: {e}")))
}

/// Refine an upstream rejection into [`JudgeError::HandleNotFound`] when the
/// comment indicates the user does not exist.
///
/// The upstream has no machine-readable failure vocabulary; all known
/// missing-handle comments contain the phrase "not found". Kept in one place
/// so a typed classification can replace it without touching callers.
fn refine_not_found(err: JudgeError, handle: &str) -> JudgeError {
    match err {
        JudgeError::UpstreamRejected(comment)
            if comment.to_ascii_lowercase().contains("not found") =>
        {
            JudgeError::HandleNotFound(handle.to_string())
        }
        other => other,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
