use thiserror::Error;

/// Errors surfaced by the dataset pipelines.
///
/// The rule-based generator itself is total and never produces one of these;
/// they come from reading input documents, fetching pages and talking to the
/// text-generation endpoint.
#[derive(Debug, Error)]
pub enum Error {
    /// The input document does not have the expected shape
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// WebDriver session or navigation failure
    #[error("webdriver error: {0}")]
    WebDriver(String),

    #[error("HTTP error: {0}")]
    Http(String),

    /// The text-generation model returned something that is not a list of pairs
    #[error("unparseable model output: {0}")]
    ModelOutput(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Http(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
