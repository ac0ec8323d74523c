use std::collections::HashSet;

use gk_core::{Config, SearchResult, NO_DESCRIPTION};
use serde::Deserialize;

use super::script::MAX_SNIPPET_CHARS;

/// One item as reported by the in-page script. Every field is optional so a
/// malformed item can be dropped instead of failing the whole batch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Re-checks what the page returned before handing it out: titles are
/// trimmed, non-empty and unique (exact match), URLs are rebuilt from the
/// title, snippets are bounded, and at most `max_search_results` survive.
pub fn validate_results(raw: Vec<RawSearchResult>, config: &Config) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    let mut results = Vec::new();

    for item in raw {
        if results.len() >= config.max_search_results {
            break;
        }

        let title = match item.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => continue,
        };
        if !seen.insert(title.clone()) {
            continue;
        }

        let url = config.page_url(&title);
        if item.url.as_deref().is_some_and(|reported| reported != url) {
            tracing::debug!("Replacing page-reported URL for {:?} with {}", title, url);
        }

        results.push(SearchResult {
            snippet: bounded_snippet(item.snippet.as_deref()),
            title,
            url,
        });
    }

    results
}

fn bounded_snippet(snippet: Option<&str>) -> String {
    match snippet {
        Some(text) if !text.trim().is_empty() => text.chars().take(MAX_SNIPPET_CHARS).collect(),
        _ => NO_DESCRIPTION.to_string(),
    }
}
