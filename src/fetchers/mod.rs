pub mod fetcher;
pub mod http;

pub use fetcher::{FetchOutcome, Fetcher};
pub use http::HttpFetcher;

#[cfg(test)]
pub(crate) mod mock;
