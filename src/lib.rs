pub mod config;
pub mod dataset;
pub mod error;
pub mod fetchers;
pub mod parsers;
pub mod results;
pub mod rules;
pub mod synth;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{Config, GeneratorLimits};
pub use error::{Error, Result};
pub use results::{QaPair, ScrapedPage};

use fetchers::{PageFetcher, WebDriverFetcher};
use std::path::PathBuf;

/// Where a page comes from
#[derive(Debug, Clone)]
pub enum Source {
    /// Web URL, loaded through WebDriver
    Web(String),
    /// Local HTML (or plain text) document
    Document(PathBuf),
    /// Previously scraped page in JSON form
    Page(PathBuf),
}

/// Builder for turning one page into a rule-generated dataset
pub struct QaDataset {
    source: Source,
    config: Config,
}

impl QaDataset {
    /// Create a new builder for the given source with default configuration.
    ///
    /// `WEBDRIVER_URL` overrides the default WebDriver address.
    pub fn new(source: Source) -> Self {
        let mut config = Config::default();
        config.apply_env();
        Self { source, config }
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = Config::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Override the generator field limits
    pub fn with_limits(mut self, limits: GeneratorLimits) -> Self {
        self.config.generator = limits;
        self
    }

    /// Override the WebDriver URL
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.config.webdriver.webdriver_url = url.into();
        self
    }

    /// Acquire the page from the source
    pub async fn page(&self) -> Result<ScrapedPage> {
        match &self.source {
            Source::Web(url) => {
                let mut fetcher = WebDriverFetcher::new(self.config.webdriver.clone());
                let page = fetchers::scrape_page(&mut fetcher, url).await;
                fetcher.close().await;
                page
            }
            Source::Document(path) => {
                let location = path.to_string_lossy().into_owned();
                let source = tokio::fs::read_to_string(path).await?;
                let mut fetcher =
                    fetchers::StaticFetcher::new().with_document(location.clone(), source);
                self.page_with(&mut fetcher, &location).await
            }
            Source::Page(path) => ScrapedPage::from_file(path),
        }
    }

    /// Acquire the page through a caller-supplied fetcher
    pub async fn page_with<F: PageFetcher>(
        &self,
        fetcher: &mut F,
        url: &str,
    ) -> Result<ScrapedPage> {
        fetchers::scrape_page(fetcher, url).await
    }

    /// Acquire the page and run the rule catalogue over it
    pub async fn generate(&self) -> Result<Vec<QaPair>> {
        let page = self.page().await?;
        Ok(rules::generate(&page, &self.config.generator))
    }
}
