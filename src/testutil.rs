//! Test-only scripted transport with call-count instrumentation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::transport::Transport;

/// A [`Transport`] that answers from scripted routes and records every URL
/// it is asked for. Routes match by substring, first match wins.
pub struct MockTransport {
    routes: Vec<(String, Result<String, String>)>,
    calls: AtomicU32,
    urls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: AtomicU32::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// A transport that answers every request with the same body.
    pub fn always(body: String) -> Self {
        Self::new().route("", body)
    }

    /// Answer URLs containing `pattern` with `body`.
    pub fn route(mut self, pattern: &str, body: String) -> Self {
        self.routes.push((pattern.to_string(), Ok(body)));
        self
    }

    /// Fail URLs containing `pattern` with a connection-level error.
    pub fn route_err(mut self, pattern: &str, message: &str) -> Self {
        self.routes
            .push((pattern.to_string(), Err(message.to_string())));
        self
    }

    /// Total number of `get` calls observed.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Number of `get` calls whose URL contained `pattern`.
    pub fn calls_to(&self, pattern: &str) -> u32 {
        let urls = self.urls.lock().expect("url log poisoned");
        urls.iter().filter(|u| u.contains(pattern)).count() as u32
    }

    pub fn last_url(&self) -> Option<String> {
        let urls = self.urls.lock().expect("url log poisoned");
        urls.last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.urls
            .lock()
            .expect("url log poisoned")
            .push(url.to_string());

        for (pattern, response) in &self.routes {
            if url.contains(pattern.as_str()) {
                return match response {
                    Ok(body) => Ok(body.clone()),
                    Err(message) => Err(anyhow!("{message}")),
                };
            }
        }
        Err(anyhow!("no scripted route for {url}"))
    }
}
