use crate::results::ScrapedPage;

/// Normalizes raw visible text the way the page's `full_text` is stored:
/// - Trimming whitespace from each line
/// - Splitting each line on runs of two spaces
/// - Dropping empty pieces
/// - Joining the remaining pieces with single newlines
pub fn normalize_visible_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds a page from a plain text document.
///
/// Only `url`, `full_text` and `paragraphs` are filled in; blank lines mark
/// paragraph boundaries.
pub fn parse(text: &str, url: &str) -> ScrapedPage {
    let paragraphs = split_into_paragraphs(text)
        .iter()
        .map(|lines| normalize_whitespace_in_segment(&lines.join(" ")))
        .collect();

    ScrapedPage {
        url: Some(url.to_string()),
        full_text: Some(normalize_visible_text(text)),
        paragraphs: Some(paragraphs),
        ..ScrapedPage::default()
    }
}

/// Splits text into paragraphs based on empty lines
pub fn split_into_paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current_paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if !current_paragraph.is_empty() {
                paragraphs.push(std::mem::take(&mut current_paragraph));
            }
        } else {
            current_paragraph.push(trimmed);
        }
    }

    if !current_paragraph.is_empty() {
        paragraphs.push(current_paragraph);
    }

    paragraphs
}

/// Normalizes whitespace within a single line or paragraph
pub fn normalize_whitespace_in_segment(segment: &str) -> String {
    segment.split_whitespace().collect::<Vec<_>>().join(" ")
}
