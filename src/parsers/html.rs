use crate::parsers::text;
use crate::results::{HEADING_LEVELS, Image, Link, ListKind, PageList, ScrapedPage, Table};
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::BTreeMap;
use url::Url;

/// Elements whose whole subtree is treated as non-content
pub const EXCLUDED_TAGS: [&str; 6] = ["script", "style", "nav", "footer", "header", "aside"];

/// Extracts every structured field of an HTML document.
///
/// `url` is recorded as the page address and used as the base for resolving
/// relative link and image URLs.
pub fn extract(html: &str, url: &str) -> ScrapedPage {
    let doc = Html::parse_document(html);
    let base = Url::parse(url).ok();

    let page = ScrapedPage {
        url: Some(url.to_string()),
        metadata: Some(extract_metadata(&doc)),
        full_text: Some(text::normalize_visible_text(&element_text(
            doc.root_element(),
        ))),
        headings: Some(extract_headings(&doc)),
        paragraphs: Some(extract_paragraphs(&doc)),
        links: Some(extract_links(&doc, base.as_ref())),
        images: Some(extract_images(&doc, base.as_ref())),
        lists: Some(extract_lists(&doc)),
        tables: Some(extract_tables(&doc)),
    };

    ::log::debug!(
        "HTML parser found {} links, {} images, {} lists, {} tables",
        page.links.as_ref().map_or(0, Vec::len),
        page.images.as_ref().map_or(0, Vec::len),
        page.lists.as_ref().map_or(0, Vec::len),
        page.tables.as_ref().map_or(0, Vec::len),
    );

    page
}

/// Title plus every named `<meta>` tag with content
pub fn extract_metadata(doc: &Html) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();

    if let Some(title) = doc.select(&selector("title")).next() {
        metadata.insert("title".to_string(), element_text(title));
    }

    for meta in doc.select(&selector("meta")) {
        let element = meta.value();
        let name = element
            .attr("name")
            .filter(|n| !n.is_empty())
            .or_else(|| element.attr("property"))
            .filter(|n| !n.is_empty());
        let content = element.attr("content").filter(|c| !c.is_empty());

        if let (Some(name), Some(content)) = (name, content) {
            metadata.insert(name.to_string(), content.to_string());
        }
    }

    metadata
}

/// One entry per heading level, present even when the level has no headings
pub fn extract_headings(doc: &Html) -> BTreeMap<String, Vec<String>> {
    HEADING_LEVELS
        .iter()
        .map(|level| {
            let texts = content_elements(doc, level).map(element_text).collect();
            (level.to_string(), texts)
        })
        .collect()
}

pub fn extract_paragraphs(doc: &Html) -> Vec<String> {
    content_elements(doc, "p")
        .map(element_text)
        .filter(|p| !p.is_empty())
        .collect()
}

pub fn extract_links(doc: &Html, base: Option<&Url>) -> Vec<Link> {
    content_elements(doc, "a[href]")
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            Some(Link {
                text: element_text(a),
                href: resolve(base, href),
            })
        })
        .collect()
}

pub fn extract_images(doc: &Html, base: Option<&Url>) -> Vec<Image> {
    content_elements(doc, "img[src]")
        .filter_map(|img| {
            let element = img.value();
            let src = element.attr("src")?;
            Some(Image {
                src: resolve(base, src),
                alt: element.attr("alt").unwrap_or_default().trim().to_string(),
            })
        })
        .collect()
}

/// Ordered and unordered lists in document order; lists without items are dropped
pub fn extract_lists(doc: &Html) -> Vec<PageList> {
    let item_selector = selector("li");

    content_elements(doc, "ul, ol")
        .filter_map(|list| {
            let items: Vec<String> = list
                .select(&item_selector)
                .map(element_text)
                .filter(|item| !item.is_empty())
                .collect();
            if items.is_empty() {
                return None;
            }
            let kind = if list.value().name() == "ol" {
                ListKind::Ordered
            } else {
                ListKind::Unordered
            };
            Some(PageList { kind, items })
        })
        .collect()
}

/// Tables as rows of cell text; empty rows and empty tables are dropped
pub fn extract_tables(doc: &Html) -> Vec<Table> {
    let row_selector = selector("tr");
    let cell_selector = selector("td, th");

    content_elements(doc, "table")
        .filter_map(|table| {
            let rows: Vec<Vec<String>> = table
                .select(&row_selector)
                .map(|tr| tr.select(&cell_selector).map(element_text).collect::<Vec<_>>())
                .filter(|cells| !cells.is_empty())
                .collect();
            if rows.is_empty() {
                None
            } else {
                Some(Table { rows })
            }
        })
        .collect()
}

/// Trimmed text of an element, skipping excluded subtrees
pub fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out.trim().to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if !EXCLUDED_TAGS.contains(&child_element.value().name()) {
                collect_text(child_element, out);
            }
        } else if let Node::Text(text) = child.value() {
            out.push_str(text);
        }
    }
}

/// Elements matching `css` that are not inside an excluded subtree
fn content_elements<'a>(doc: &'a Html, css: &str) -> std::vec::IntoIter<ElementRef<'a>> {
    doc.select(&selector(css))
        .filter(|element| !is_excluded(element))
        .collect::<Vec<_>>()
        .into_iter()
}

fn is_excluded(element: &ElementRef<'_>) -> bool {
    EXCLUDED_TAGS.contains(&element.value().name())
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| EXCLUDED_TAGS.contains(&ancestor.value().name()))
}

fn resolve(base: Option<&Url>, href: &str) -> String {
    base.and_then(|b| b.join(href).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| href.to_string())
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title> Frontend Handbook </title>
  <meta name="description" content="All about the frontend">
  <meta property="og:type" content="article">
  <meta name="empty" content="">
  <style>body { color: red; }</style>
</head>
<body>
  <header><h1>Site banner</h1></header>
  <nav><ul><li>Home</li><li>Blog</li></ul><a href="/nav">Nav link</a></nav>
  <h1>Main title</h1>
  <h2>Intro</h2>
  <h2>Details</h2>
  <p>First paragraph.<script>var x = 1;</script></p>
  <p>   </p>
  <p>Second <b>bold</b> paragraph.</p>
  <a href="/about">About us</a>
  <a href="https://other.org/x">Other</a>
  <a>No href</a>
  <img src="img/logo.png" alt=" Logo ">
  <img src="/pixel.gif">
  <img alt="no source">
  <ol><li>One</li><li> </li><li>Two</li></ol>
  <ul></ul>
  <table>
    <tr><th>Name</th><th>Age</th></tr>
    <tr><td>Ann</td><td>31</td></tr>
    <tr></tr>
  </table>
  <table><tr></tr></table>
  <aside><p>Sidebar paragraph</p></aside>
  <footer><p>Copyright</p></footer>
</body>
</html>"#;

    fn page() -> ScrapedPage {
        extract(PAGE, "https://example.com/docs/page.html")
    }

    #[test]
    fn test_metadata() {
        let metadata = page().metadata.unwrap();
        assert_eq!(metadata.get("title").map(String::as_str), Some("Frontend Handbook"));
        assert_eq!(
            metadata.get("description").map(String::as_str),
            Some("All about the frontend")
        );
        assert_eq!(metadata.get("og:type").map(String::as_str), Some("article"));
        assert!(!metadata.contains_key("empty"));
    }

    #[test]
    fn test_headings_skip_excluded_regions() {
        let headings = page().headings.unwrap();
        assert_eq!(headings.len(), 6);
        assert_eq!(headings["h1"], vec!["Main title"]);
        assert_eq!(headings["h2"], vec!["Intro", "Details"]);
        assert!(headings["h6"].is_empty());
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(
            page().paragraphs.unwrap(),
            vec!["First paragraph.", "Second bold paragraph."]
        );
    }

    #[test]
    fn test_links_are_resolved() {
        let links = page().links.unwrap();
        assert_eq!(
            links,
            vec![
                Link {
                    text: "About us".into(),
                    href: "https://example.com/about".into()
                },
                Link {
                    text: "Other".into(),
                    href: "https://other.org/x".into()
                },
            ]
        );
    }

    #[test]
    fn test_images() {
        let images = page().images.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].src, "https://example.com/docs/img/logo.png");
        assert_eq!(images[0].alt, "Logo");
        assert_eq!(images[1].src, "https://example.com/pixel.gif");
        assert_eq!(images[1].alt, "");
    }

    #[test]
    fn test_lists() {
        let lists = page().lists.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].kind, ListKind::Ordered);
        assert_eq!(lists[0].items, vec!["One", "Two"]);
    }

    #[test]
    fn test_tables() {
        let tables = page().tables.unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, vec![vec!["Name", "Age"], vec!["Ann", "31"]]);
    }

    #[test]
    fn test_full_text_drops_non_content() {
        let full_text = page().full_text.unwrap();
        assert!(full_text.starts_with("Frontend Handbook"));
        assert!(full_text.contains("Main title"));
        assert!(full_text.contains("Second bold paragraph."));
        assert!(!full_text.contains("color: red"));
        assert!(!full_text.contains("var x"));
        assert!(!full_text.contains("Site banner"));
        assert!(!full_text.contains("Sidebar paragraph"));
        assert!(!full_text.contains("Copyright"));
        assert!(full_text.lines().all(|line| line == line.trim() && !line.is_empty()));
    }

    #[test]
    fn test_relative_links_kept_without_base() {
        let page = extract(r#"<a href="/x">X</a>"#, "not a url");
        assert_eq!(page.url.as_deref(), Some("not a url"));
        assert_eq!(page.links.unwrap()[0].href, "/x");
    }

    #[test]
    fn test_empty_document() {
        let page = extract("", "https://example.com");
        assert_eq!(page.full_text.as_deref(), Some(""));
        assert!(page.paragraphs.unwrap().is_empty());
        assert!(page.metadata.unwrap().is_empty());
    }
}
