use crate::parsers::{Parser, ParserType};
use crate::rules;

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = "<html><head><title>Hello</title></head><body>\
        <h1>Welcome</h1><p>Hello, world. Second sentence. Third. Fourth.</p>\
        <a href=\"https://example.com\">Link</a></body></html>";

    #[test]
    fn test_parse_with_parser_type() {
        let page = Parser::parse(HTML, "https://example.org/", ParserType::Html);
        assert_eq!(page.title(), Some("Hello"));
        assert_eq!(page.links.as_ref().unwrap().len(), 1);
        assert_eq!(page.links.unwrap()[0].href, "https://example.com/");

        let page = Parser::parse("Line 1\nLine 2", "notes", ParserType::Text);
        assert_eq!(page.paragraphs.unwrap(), vec!["Line 1 Line 2"]);
        assert!(page.links.is_none());
    }

    #[test]
    fn test_parse_from_url() {
        let page = Parser::parse_from_url(HTML, "https://example.org/page");
        assert!(page.headings.is_some());

        let page = Parser::parse_from_url(HTML, "https://example.org/file.txt");
        assert!(page.headings.is_none());
    }

    #[test]
    fn test_different_file_extensions() {
        let types = [
            ("file.txt", ParserType::Text),
            ("file.md", ParserType::Text),
            ("file.html", ParserType::Html),
            ("file.yml", ParserType::Text),
            ("https://example.org/_sources/index.rst", ParserType::Text),
            ("https://example.org/notes.txt?raw=1", ParserType::Text),
            ("https://example.org/page", ParserType::Html),
        ];

        for (url, expected_type) in types {
            assert_eq!(
                ParserType::from_url(url),
                expected_type,
                "URL '{}' should be parsed as {:?}",
                url,
                expected_type
            );
        }
    }

    #[test]
    fn test_html_page_to_pairs() {
        let page = Parser::parse_from_url(HTML, "https://example.org/page");
        let pairs = rules::generate_default(&page);
        let questions: Vec<&str> = pairs.iter().map(|p| p.question.as_str()).collect();

        assert_eq!(
            questions,
            vec![
                "What is the URL of the webpage?",
                "What is the title of the webpage?",
                "What are the h1 headings on the webpage?",
                "What does the 1th paragraph on the webpage say?",
                "What are some key links on the webpage?",
                "Provide a brief summary of the webpage content.",
                rules::EXTRACTION_QUESTION,
            ]
        );
        assert_eq!(pairs[4].answer, "Link");
        // Adjacent elements without whitespace run together, as in the visible text
        assert_eq!(
            pairs[5].answer,
            "HelloWelcomeHello, world. Second sentence. Third."
        );
    }
}
