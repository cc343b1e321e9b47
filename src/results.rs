use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Heading levels in the order the generator visits them
pub const HEADING_LEVELS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Structured extraction of a single web document.
///
/// Every field is optional and checked independently. String values are
/// expected to be trimmed already; nothing downstream re-trims them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// Source address of the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Meta-tag name (or property) to content, plus `title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,

    /// Whitespace-normalized visible text
    #[serde(default, alias = "fullText", skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,

    /// Heading level tag (`h1`..`h6`) to headings in document order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<BTreeMap<String, Vec<String>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lists: Option<Vec<PageList>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<Table>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default)]
    pub src: String,
    /// Empty when the tag carried no alt text
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    #[serde(alias = "ol")]
    Ordered,
    #[serde(alias = "ul")]
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageList {
    #[serde(rename = "type")]
    pub kind: ListKind,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl ScrapedPage {
    /// Parse a page document, rejecting anything that is not page-shaped
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::MalformedInput(e.to_string()))
    }

    /// Load a page document from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Pretty JSON with non-ASCII characters left as-is
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Page title from the metadata, if any
    pub fn title(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("title"))
            .map(String::as_str)
    }
}

/// One question/answer unit destined for a fine-tuning dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}
