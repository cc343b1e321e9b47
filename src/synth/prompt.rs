use crate::error::{Error, Result};
use crate::results::QaPair;
use regex::Regex;
use std::sync::LazyLock;

/// Where an array of objects (or an empty array) may begin
static ARRAY_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\s*[{\]]").unwrap());

/// Instruction asking the model for `pairs` question/answer pairs about `chunk`
pub fn build_prompt(chunk: &str, pairs: usize) -> String {
    format!(
        "Generate {pairs} question and answer pairs based on the following text. \
         Respond only with a JSON array of objects, each with a \"question\" and an \
         \"answer\" key.\n\nText:\n{chunk}\n\nJSON:"
    )
}

/// Pull the first JSON array of pairs out of raw model output.
///
/// Models often wrap the array in prose or code fences, and the prose may carry
/// brackets of its own. Each candidate `[` is tried in order and the first one
/// that parses as a list of pairs wins; anything after it is ignored. Pairs
/// with an empty question or answer are dropped.
pub fn parse_pairs(output: &str) -> Result<Vec<QaPair>> {
    let mut first_error = None;

    for candidate in ARRAY_START.find_iter(output) {
        let rest = &output[candidate.start()..];
        match serde_json::Deserializer::from_str(rest)
            .into_iter::<Vec<QaPair>>()
            .next()
        {
            Some(Ok(pairs)) => return Ok(clean(pairs)),
            Some(Err(e)) => {
                first_error.get_or_insert_with(|| format!("{} in {:?}", e, excerpt(rest)));
            }
            None => {}
        }
    }

    Err(Error::ModelOutput(first_error.unwrap_or_else(|| {
        format!("no JSON array in {:?}", excerpt(output))
    })))
}

fn clean(pairs: Vec<QaPair>) -> Vec<QaPair> {
    pairs
        .into_iter()
        .map(|p| QaPair::new(p.question.trim(), p.answer.trim()))
        .filter(|p| !p.question.is_empty() && !p.answer.is_empty())
        .collect()
}

fn excerpt(text: &str) -> String {
    text.chars().take(120).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_count_and_text() {
        let prompt = build_prompt("Rust is a systems language.", 4);
        assert!(prompt.starts_with("Generate 4 question and answer pairs"));
        assert!(prompt.contains("Text:\nRust is a systems language.\n"));
        assert!(prompt.ends_with("JSON:"));
    }

    #[test]
    fn test_plain_array() {
        let pairs = parse_pairs(r#"[{"question": "Q1?", "answer": "A1"}]"#).unwrap();
        assert_eq!(pairs, vec![QaPair::new("Q1?", "A1")]);
    }

    #[test]
    fn test_array_wrapped_in_prose_and_fences() {
        let output = "Sure! Here are the pairs:\n```json\n[\n  {\"question\": \" What is [x]? \", \"answer\": \"A value\", \"difficulty\": \"easy\"},\n  {\"question\": \"Empty?\", \"answer\": \"\"}\n]\n```\nHope this helps.";
        let pairs = parse_pairs(output).unwrap();
        assert_eq!(pairs, vec![QaPair::new("What is [x]?", "A value")]);
    }

    #[test]
    fn test_bracket_in_prose_after_array() {
        let output = "[{\"question\": \"Q\", \"answer\": \"A\"}]\n\nSource: chapter [3].";
        let pairs = parse_pairs(output).unwrap();
        assert_eq!(pairs, vec![QaPair::new("Q", "A")]);
    }

    #[test]
    fn test_bracket_in_prose_before_array() {
        let output = "Here are [2] pairs:\n[{\"question\": \"Q1\", \"answer\": \"A1\"}, {\"question\": \"Q2\", \"answer\": \"A2\"}]";
        let pairs = parse_pairs(output).unwrap();
        assert_eq!(pairs, vec![QaPair::new("Q1", "A1"), QaPair::new("Q2", "A2")]);
    }

    #[test]
    fn test_first_parsable_array_wins() {
        let output = "See [{note}] then [{\"question\": \"Q\", \"answer\": \"A\"}] or [{\"question\": \"Other\", \"answer\": \"B\"}]";
        let pairs = parse_pairs(output).unwrap();
        assert_eq!(pairs, vec![QaPair::new("Q", "A")]);
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_pairs("Nothing to ask: []").unwrap().is_empty());
    }

    #[test]
    fn test_missing_array() {
        let err = parse_pairs("I cannot help with that.").unwrap_err();
        assert!(matches!(err, Error::ModelOutput(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_pairs(r#"[{"question": "Q1?", "answer": }]"#).unwrap_err();
        assert!(matches!(err, Error::ModelOutput(_)));
    }

    #[test]
    fn test_wrong_shape() {
        let err = parse_pairs(r#"["just", "strings"]"#).unwrap_err();
        assert!(matches!(err, Error::ModelOutput(_)));
    }
}
