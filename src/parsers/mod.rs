pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::results::ScrapedPage;

/// Enum to represent the kinds of documents a page can be built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserType {
    /// HTML parser
    Html,
    /// Plain text parser
    Text,
}

impl ParserType {
    /// Determines the parser type based on the URL or file path
    pub fn from_url(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);

        if path.ends_with(".txt") || path.ends_with(".md") {
            ::log::debug!("Classifying as Text: {}", url);
            ParserType::Text
        } else if path.ends_with(".yaml") || path.ends_with(".yml") {
            ::log::debug!("Classifying as Text (YAML): {}", url);
            ParserType::Text
        } else if path.contains("/_sources/") {
            ::log::debug!("Classifying as Text (_sources): {}", url);
            ParserType::Text
        } else {
            // Default to HTML for most URLs
            ::log::debug!("Classifying as HTML: {}", url);
            ParserType::Html
        }
    }
}

/// Main parser that delegates to specific format parsers
pub struct Parser;

impl Parser {
    /// Parse a document into a page based on the parser type
    pub fn parse(content: &str, url: &str, parser_type: ParserType) -> ScrapedPage {
        match parser_type {
            ParserType::Html => html::extract(content, url),
            ParserType::Text => text::parse(content, url),
        }
    }

    /// Determine parser type from URL and then parse content
    pub fn parse_from_url(content: &str, url: &str) -> ScrapedPage {
        let parser_type = ParserType::from_url(url);
        Self::parse(content, url, parser_type)
    }
}
