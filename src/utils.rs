/// Convert a URL to a sanitized filename stem
pub fn sanitize_filename(url: &str) -> String {
    // Remove protocol and replace invalid filename characters
    let mut name = url.replace("http://", "").replace("https://", "");
    name = name.trim_end_matches('/').to_string();
    name = name.replace(['/', ':', '?', '&', '=', '#', '%'], "_");

    // Limit filename length on a char boundary
    match name.char_indices().nth(100) {
        Some((idx, _)) => name[..idx].to_string(),
        None => name,
    }
}

/// Default path for a scraped page document derived from its URL
pub fn page_file_name(url: &str) -> String {
    let stem = sanitize_filename(url);
    if stem.is_empty() {
        "page.json".to_string()
    } else {
        format!("{}.json", stem)
    }
}
