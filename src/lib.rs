// Re-export modules
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod filter;
pub mod orchestrator;
pub mod parsers;
pub mod request;
pub mod resolver;
pub mod results;
pub mod server;

// Re-export commonly used types for convenience
pub use error::{FetchError, ScrapeError};
pub use request::{CategoryKind, ScrapeRequest};
pub use results::{CategoryPayload, ExtractionResult};

use config::{AppConfig, ScraperConfig};
use fetchers::{Fetcher, HttpFetcher};
use filter::VideoLinkFilter;
use std::error::Error;
use std::path::Path;

/// Fetches a page and extracts the requested content categories from it
pub struct PageScraper<F = HttpFetcher> {
    fetcher: F,
    config: ScraperConfig,
    video_filter: VideoLinkFilter,
}

impl PageScraper<HttpFetcher> {
    /// Create a scraper that fetches over HTTP, using the given configuration
    pub fn from_config(config: ScraperConfig) -> Result<Self, Box<dyn Error>> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Ok(Self::with_fetcher(fetcher).with_config(config)?)
    }

    /// Create an HTTP scraper from a configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let config = AppConfig::from_file(path)?;
        Self::from_config(config.scraper)
    }
}

impl<F: Fetcher> PageScraper<F> {
    /// Create a scraper with default settings around any fetcher
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            config: ScraperConfig::default(),
            video_filter: VideoLinkFilter::default(),
        }
    }

    /// Set the timeout for the top-level page fetch
    pub fn with_page_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.page_timeout_secs = timeout_seconds;
        self
    }

    /// Set the timeout for each stylesheet/script fetch
    pub fn with_resource_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.resource_timeout_secs = timeout_seconds;
        self
    }

    /// Set the maximum number of concurrent sub-resource fetches
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrent_fetches = max_concurrency;
        self
    }

    /// Replace the whole scraper configuration.
    ///
    /// The fetcher is kept as is, so `user_agent` only takes effect through
    /// [`PageScraper::from_config`].
    pub fn with_config(mut self, config: ScraperConfig) -> Result<Self, regex::Error> {
        self.video_filter = VideoLinkFilter::new(&config.video_extensions)?;
        self.config = config;
        Ok(self)
    }

    /// Load the scraper section of a configuration file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let config = AppConfig::from_file(path)?;
        Ok(self.with_config(config.scraper)?)
    }

    /// Load the scraper section of a JSON configuration string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn Error>> {
        let config = AppConfig::from_json(config_str)?;
        Ok(self.with_config(config.scraper)?)
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Validate raw input and scrape; nothing is fetched for an invalid request
    pub async fn scrape_url<S: AsRef<str>>(
        &self,
        url: &str,
        categories: &[S],
    ) -> Result<ExtractionResult, ScrapeError> {
        let request = ScrapeRequest::new(url, categories)?;
        self.scrape(&request).await
    }

    /// Fetch the target page and extract every requested category.
    ///
    /// Only a failed page fetch is an error; broken stylesheets or scripts
    /// are left out of their category.
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ExtractionResult, ScrapeError> {
        let url = request.target_url();
        ::log::info!("Scraping {} for {:?}", url, request.categories());
        let started = std::time::Instant::now();

        let markup = match self.fetcher.fetch(url, self.config.page_timeout()).await {
            Ok(markup) => markup,
            Err(e) => {
                ::log::error!("Failed to fetch page {}: {}", url, e);
                return Err(e.into());
            }
        };

        let result = self.extract(request, &markup).await;
        ::log::info!(
            "Scraped {} ({} categories) in {:.2} seconds",
            url,
            result.len(),
            started.elapsed().as_secs_f64()
        );
        Ok(result)
    }

    /// Extract from markup that has already been fetched
    pub async fn extract(&self, request: &ScrapeRequest, markup: &str) -> ExtractionResult {
        orchestrator::extract(
            &self.fetcher,
            &self.config,
            &self.video_filter,
            request,
            markup,
        )
        .await
    }
}
