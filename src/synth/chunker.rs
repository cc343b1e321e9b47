/// Splits text into consecutive windows of at most `chunk_words` words.
///
/// Windows do not overlap; the last one holds whatever is left. Words are
/// rejoined with single spaces, so line structure is not preserved.
pub fn chunk_words(text: &str, chunk_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || chunk_words == 0 {
        return Vec::new();
    }

    words
        .chunks(chunk_words)
        .map(|window| window.join(" "))
        .collect()
}
