use scraper::{Html, Selector};

/// Trimmed `content` attribute of the first element matching `selector`,
/// or `None` when missing or blank.
pub fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

/// Trimmed text of every match in document order, blanks skipped.
pub fn collect_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}
