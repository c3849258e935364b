use crate::error::FetchError;
use async_trait::async_trait;
use std::time::Duration;

/// Result of one fetch attempt.
///
/// Sub-resource failures are carried as values so the caller decides what
/// to drop; only the page fetch is allowed to fail a request.
pub type FetchOutcome = Result<String, FetchError>;

/// Retrieves a URL's body as text
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, giving up after `timeout`
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchOutcome;
}
