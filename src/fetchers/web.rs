use crate::config::WebDriverConfig;
use crate::error::{Error, Result};
use crate::fetchers::PageFetcher;
use fantoccini::{Client, ClientBuilder};
use tokio::time::{Duration, timeout};
use url::Url;

/// Common alternative WebDriver addresses tried when the configured one fails
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Loads pages through a WebDriver server so client-rendered content is present.
///
/// The session is opened lazily on the first fetch and reused until
/// [`WebDriverFetcher::close`] is called. A failed attempt drops the session
/// and the next attempt reconnects.
pub struct WebDriverFetcher {
    config: WebDriverConfig,
    client: Option<Client>,
}

impl WebDriverFetcher {
    pub fn new(config: WebDriverConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Close the WebDriver session if one is open
    pub async fn close(&mut self) {
        if let Some(client) = self.client.take() {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver client: {}", e);
            }
        }
    }

    async fn client(&mut self) -> Result<&Client> {
        if self.client.is_none() {
            ::log::debug!("Connecting to WebDriver");
            self.client = Some(connect_to_webdriver(&self.config.webdriver_url).await?);
        }
        self.client
            .as_ref()
            .ok_or_else(|| Error::WebDriver("no WebDriver session".to_string()))
    }
}

impl PageFetcher for WebDriverFetcher {
    async fn fetch(&mut self, url: &str) -> Result<String> {
        Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let attempts = self.config.max_attempts.max(1);
        let page_timeout = Duration::from_secs(self.config.page_timeout_secs);
        let mut last_error = None;

        for attempt in 1..=attempts {
            if attempt > 1 {
                ::log::warn!("Retrying {} (attempt {} of {})", url, attempt, attempts);
                self.close().await;
            }

            let client = match self.client().await {
                Ok(client) => client,
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            };

            match load_source(client, url, page_timeout).await {
                Ok(source) => {
                    ::log::debug!("Completed scraping: {}", url);
                    return Ok(source);
                }
                Err(e) => {
                    ::log::warn!("Attempt {} for {} failed: {}", attempt, url, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::WebDriver(format!("failed to fetch {}", url))))
    }
}

/// Navigates to `url` and returns the rendered page source
async fn load_source(client: &Client, url: &str, page_timeout: Duration) -> Result<String> {
    let loaded = timeout(page_timeout, async {
        client
            .goto(url)
            .await
            .map_err(|e| navigation_error(e, "accessing", url))?;
        client
            .source()
            .await
            .map_err(|e| navigation_error(e, "getting source for", url))
    })
    .await;

    match loaded {
        Ok(result) => result,
        Err(_) => Err(Error::WebDriver(format!(
            "timeout after {}s loading {}",
            page_timeout.as_secs(),
            url
        ))),
    }
}

/// Connects to the WebDriver instance, falling back to common local addresses
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!(
                "Failed to connect to WebDriver at {}: {}",
                webdriver_url,
                e
            );
        }
    }

    for url in FALLBACK_WEBDRIVER_URLS {
        if url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        // Fallback failures are not logged to avoid log spam
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(Error::WebDriver(format!(
        "could not connect to {} or any fallback WebDriver server",
        webdriver_url
    )))
}

fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> Error {
    if error.to_string().contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    }
    Error::WebDriver(format!("failed {} {}: {}", context, url, error))
}
