use std::time::Duration;
use thiserror::Error;

/// Failure of a single fetch attempt (page or sub-resource)
#[derive(Debug, Error)]
pub enum FetchError {
    /// The target could not be parsed as an absolute URL
    #[error("not a fetchable URL: {url}")]
    InvalidUrl { url: String },

    /// No complete response within the allotted time
    #[error("request to {url} timed out after {secs}s", secs = .timeout.as_secs())]
    Timeout { url: String, timeout: Duration },

    /// The server answered with a non-success status
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    /// Connection, TLS or body decoding failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The URL the failed fetch was aimed at
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { url }
            | FetchError::Timeout { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Transport { url, .. } => url,
        }
    }
}

/// Errors that terminate a scrape request
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Missing or unusable URL, or no recognized category
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The top-level page could not be retrieved
    #[error("failed to fetch page: {0}")]
    PageFetch(#[from] FetchError),
}

impl ScrapeError {
    /// Whether the caller is at fault (as opposed to the remote page)
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScrapeError::InvalidRequest(_))
    }
}
