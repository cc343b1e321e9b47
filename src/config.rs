use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Field limits for the rule-based generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorLimits {
    /// Number of leading paragraphs that get their own pair
    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: usize,

    /// Number of link texts surfaced in the links pair
    #[serde(default = "default_max_links")]
    pub max_links: usize,

    /// Number of alt texts surfaced in the images pair
    #[serde(default = "default_max_images")]
    pub max_images: usize,

    /// Number of leading lists that get their own pair
    #[serde(default = "default_max_lists")]
    pub max_lists: usize,

    /// Number of rows of the first table in the table pair
    #[serde(default = "default_max_table_rows")]
    pub max_table_rows: usize,

    /// Number of ". "-separated segments kept in the summary pair
    #[serde(default = "default_summary_sentences")]
    pub summary_sentences: usize,
}

/// Configuration for fetching pages through a WebDriver server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebDriverConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Upper bound for loading a single page, in seconds
    #[serde(default = "default_page_timeout")]
    pub page_timeout_secs: u64,

    /// Attempts per page before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

/// Configuration for model-driven synthesis from book text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Base URL of the text-generation server
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Words per chunk of source text
    #[serde(default = "default_chunk_words")]
    pub chunk_words: usize,

    /// Pairs requested from the model for each chunk
    #[serde(default = "default_pairs_per_chunk")]
    pub pairs_per_chunk: usize,

    /// Only process this many chunks (all when unset)
    #[serde(default)]
    pub max_chunks: Option<usize>,

    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Attempts per HTTP request (model call or text download)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Log and skip chunks whose output is not valid JSON instead of aborting
    #[serde(default)]
    pub skip_malformed: bool,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorLimits,

    #[serde(default)]
    pub webdriver: WebDriverConfig,

    #[serde(default)]
    pub synth: SynthConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.apply_env();
        Ok(config)
    }

    /// Override settings from the environment
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver.webdriver_url = webdriver_url;
            }
        }
    }
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            max_paragraphs: default_max_paragraphs(),
            max_links: default_max_links(),
            max_images: default_max_images(),
            max_lists: default_max_lists(),
            max_table_rows: default_max_table_rows(),
            summary_sentences: default_summary_sentences(),
        }
    }
}

impl Default for WebDriverConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            page_timeout_secs: default_page_timeout(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            chunk_words: default_chunk_words(),
            pairs_per_chunk: default_pairs_per_chunk(),
            max_chunks: None,
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            max_attempts: default_max_attempts(),
            skip_malformed: false,
        }
    }
}

fn default_max_paragraphs() -> usize {
    5
}

fn default_max_links() -> usize {
    3
}

fn default_max_images() -> usize {
    3
}

fn default_max_lists() -> usize {
    2
}

fn default_max_table_rows() -> usize {
    3
}

fn default_summary_sentences() -> usize {
    3
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_page_timeout() -> u64 {
    45
}

fn default_max_attempts() -> usize {
    3
}

fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_chunk_words() -> usize {
    500
}

fn default_pairs_per_chunk() -> usize {
    5
}

fn default_max_new_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.generator, GeneratorLimits::default());
        assert_eq!(config.generator.max_paragraphs, 5);
        assert_eq!(config.webdriver.max_attempts, 3);
        assert_eq!(config.synth.chunk_words, 500);
        assert!(!config.synth.skip_malformed);
    }

    #[test]
    fn test_partial_sections() {
        let json = r#"{
            "generator": {"max_paragraphs": 2},
            "synth": {"endpoint": "http://model:80", "pairs_per_chunk": 10}
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.generator.max_paragraphs, 2);
        assert_eq!(config.generator.max_links, 3);
        assert_eq!(config.synth.endpoint, "http://model:80");
        assert_eq!(config.synth.pairs_per_chunk, 10);
        assert_eq!(config.synth.max_new_tokens, 1024);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"webdriver": {"page_timeout_secs": 10}}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.webdriver.page_timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::from_file("/nonexistent/config.json").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
