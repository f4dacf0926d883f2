// SPDX-License-Identifier: MIT
// Time-bounded cache for raw upstream responses.
//
// Keyed by the canonical request signature (endpoint + sorted params).
// Entries expire strictly after the fixed TTL; expiry is checked lazily on
// lookup — there is no background sweep. No eviction beyond TTL: the cache
// is unbounded in entry count.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// TTL key/value store for upstream response payloads.
///
/// Thread-safety: interior `Mutex`, so a shared `Arc<ResponseCache>` can be
/// used from concurrent tasks. Concurrent misses for the same key are not
/// coalesced; each caller issues its own upstream request.
pub struct ResponseCache {
    ttl: Duration,
    inner: Mutex<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    map: HashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl ResponseCache {
    /// Create a cache where every entry lives for `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Look up a key. Expired entries are removed and treated as absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        let cached = inner
            .map
            .get(key)
            .map(|entry| (entry.expires_at > now, entry.value.clone()));
        match cached {
            Some((true, value)) => {
                inner.hits += 1;
                debug!(key, "cache hit");
                Some(value)
            }
            Some((false, _)) => {
                // Stale — purge on the way out.
                inner.map.remove(key);
                inner.misses += 1;
                None
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert a value under `key`, replacing any previous entry.
    pub fn insert(&self, key: &str, value: Value) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.map.insert(key.to_string(), entry);
    }

    /// Current number of entries, including not-yet-purged stale ones.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache lock poisoned").map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (hits, misses) counters since construction.
    pub fn stats(&self) -> (u64, u64) {
        let inner = self.inner.lock().expect("cache lock poisoned");
        (inner.hits, inner.misses)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
