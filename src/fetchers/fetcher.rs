use crate::error::{Error, Result};
use crate::parsers::Parser;
use crate::results::ScrapedPage;
use std::collections::HashMap;

/// Something that can return the raw source of a document by URL
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetch the raw document at `url`
    async fn fetch(&mut self, url: &str) -> Result<String>;
}

/// Fetch a single page and extract its structured fields
pub async fn scrape_page<F: PageFetcher>(fetcher: &mut F, url: &str) -> Result<ScrapedPage> {
    ::log::info!("Scraping {}", url);
    let source = fetcher.fetch(url).await?;
    ::log::debug!("Fetched {} bytes from {}", source.len(), url);

    Ok(Parser::parse_from_url(&source, url))
}

/// Serves documents from memory; used for local HTML files and tests
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    documents: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: impl Into<String>, source: impl Into<String>) -> Self {
        self.documents.insert(url.into(), source.into());
        self
    }
}

impl PageFetcher for StaticFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Http(format!("no document for {}", url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scrape_page_parses_fetched_source() {
        let mut fetcher = StaticFetcher::new().with_document(
            "https://example.com/",
            "<html><head><title>Example</title></head><body><p>Hi</p></body></html>",
        );

        let page = scrape_page(&mut fetcher, "https://example.com/").await.unwrap();
        assert_eq!(page.url.as_deref(), Some("https://example.com/"));
        assert_eq!(page.title(), Some("Example"));
        assert_eq!(page.paragraphs.unwrap(), vec!["Hi"]);
    }

    #[tokio::test]
    async fn test_missing_document_is_an_error() {
        let mut fetcher = StaticFetcher::new();
        let err = scrape_page(&mut fetcher, "https://example.com/").await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
