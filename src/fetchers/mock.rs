use crate::error::FetchError;
use crate::fetchers::{FetchOutcome, Fetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory fetcher that serves canned bodies and records every request
/// together with the timeout it was given
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
    slow: HashMap<String, Duration>,
    requests: Mutex<Vec<(String, Duration)>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    /// Serve `body` only after `delay` has passed
    pub fn with_delayed_body(mut self, url: &str, body: &str, delay: Duration) -> Self {
        self.slow.insert(url.to_string(), delay);
        self.with_body(url, body)
    }

    /// URLs requested so far, in call order
    pub fn requests(&self) -> Vec<String> {
        self.timeouts().into_iter().map(|(url, _)| url).collect()
    }

    /// `(url, timeout)` pairs requested so far, in call order
    pub fn timeouts(&self) -> Vec<(String, Duration)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchOutcome {
        self.requests.lock().unwrap().push((url.to_string(), timeout));

        if let Some(delay) = self.slow.get(url) {
            if *delay > timeout {
                tokio::time::sleep(timeout).await;
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(*delay).await;
        }

        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}
