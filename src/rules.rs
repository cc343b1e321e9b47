//! Rule-based question/answer generation from a scraped page.
//!
//! Each rule is gated on the presence of its field and contributes at most a
//! fixed number of pairs. Rules run in catalogue order and the output order is
//! part of the contract: callers display pairs in the order they are returned.

use crate::config::GeneratorLimits;
use crate::results::{HEADING_LEVELS, QaPair, ScrapedPage};

/// Question for the catch-all pair; the bracketed token is kept literally
pub const EXTRACTION_QUESTION: &str =
    "Extract the main content text from this webpage data: [insert full_text here]";

/// Answer for the catch-all pair when the page carries no text
pub const NO_TEXT_SENTINEL: &str = "No text available";

const ITEM_SEPARATOR: &str = "; ";
const SENTENCE_SEPARATOR: &str = ". ";

/// Generate pairs with the default field limits
pub fn generate_default(page: &ScrapedPage) -> Vec<QaPair> {
    generate(page, &GeneratorLimits::default())
}

/// Map one page to its question/answer pairs.
///
/// Never fails: an absent field or an empty collection skips its rule, and the
/// final extraction pair is always emitted.
pub fn generate(page: &ScrapedPage, limits: &GeneratorLimits) -> Vec<QaPair> {
    let mut pairs = Vec::new();

    if let Some(url) = &page.url {
        pairs.push(QaPair::new("What is the URL of the webpage?", url.as_str()));
    }

    if let Some(title) = page.title() {
        pairs.push(QaPair::new("What is the title of the webpage?", title));
    }

    heading_pairs(page, &mut pairs);
    paragraph_pairs(page, limits, &mut pairs);

    if let Some(links) = page.links.as_deref().filter(|l| !l.is_empty()) {
        let texts: Vec<&str> = links
            .iter()
            .take(limits.max_links)
            .map(|link| link.text.as_str())
            .collect();
        pairs.push(QaPair::new(
            "What are some key links on the webpage?",
            texts.join(ITEM_SEPARATOR),
        ));
    }

    if let Some(images) = &page.images {
        // Filter before truncating so empty alts never use up a slot
        let alts: Vec<&str> = images
            .iter()
            .map(|img| img.alt.as_str())
            .filter(|alt| !alt.is_empty())
            .take(limits.max_images)
            .collect();
        if !alts.is_empty() {
            pairs.push(QaPair::new(
                "What are the alt texts of images on the webpage?",
                alts.join(ITEM_SEPARATOR),
            ));
        }
    }

    if let Some(lists) = &page.lists {
        for (i, list) in lists.iter().take(limits.max_lists).enumerate() {
            pairs.push(QaPair::new(
                format!("What are the items in the {}th list on the webpage?", i + 1),
                list.items.join(ITEM_SEPARATOR),
            ));
        }
    }

    if let Some(table) = page.tables.as_ref().and_then(|t| t.first()) {
        let rows: Vec<String> = table
            .rows
            .iter()
            .take(limits.max_table_rows)
            .map(|row| row.join(", "))
            .collect();
        pairs.push(QaPair::new(
            "What is a summary of the first table on the webpage?",
            rows.join("\n"),
        ));
    }

    if let Some(full_text) = &page.full_text {
        pairs.push(QaPair::new(
            "Provide a brief summary of the webpage content.",
            naive_summary(full_text, limits.summary_sentences),
        ));
    }

    pairs.push(QaPair::new(
        EXTRACTION_QUESTION,
        page.full_text.as_deref().unwrap_or(NO_TEXT_SENTINEL),
    ));

    ::log::debug!("Generated {} pairs", pairs.len());
    pairs
}

fn heading_pairs(page: &ScrapedPage, pairs: &mut Vec<QaPair>) {
    let Some(headings) = &page.headings else {
        return;
    };

    for level in HEADING_LEVELS {
        match headings.get(level) {
            Some(texts) if !texts.is_empty() => pairs.push(QaPair::new(
                format!("What are the {} headings on the webpage?", level),
                texts.join(ITEM_SEPARATOR),
            )),
            _ => {}
        }
    }
}

fn paragraph_pairs(page: &ScrapedPage, limits: &GeneratorLimits, pairs: &mut Vec<QaPair>) {
    let Some(paragraphs) = &page.paragraphs else {
        return;
    };

    for (i, paragraph) in paragraphs.iter().take(limits.max_paragraphs).enumerate() {
        pairs.push(QaPair::new(
            format!("What does the {}th paragraph on the webpage say?", i + 1),
            paragraph.as_str(),
        ));
    }
}

/// First `sentences` segments of `text` split on the literal ". ", rejoined
/// with ". " and terminated by a period.
///
/// This is not sentence segmentation: abbreviations and decimals split too.
pub fn naive_summary(text: &str, sentences: usize) -> String {
    let segments: Vec<&str> = text.split(SENTENCE_SEPARATOR).take(sentences).collect();
    format!("{}.", segments.join(SENTENCE_SEPARATOR))
}
