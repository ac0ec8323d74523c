use gk_core::{Config, Result, NO_DESCRIPTION};
use serde::Deserialize;
use serde_json::json;

use super::results::RawSearchResult;

/// Bumped whenever the shape returned by [`EXTRACTION_SCRIPT`] changes.
pub const EXTRACTION_SCRIPT_VERSION: u32 = 1;

pub const MIN_SNIPPET_CHARS: usize = 20;
pub const MAX_SNIPPET_CHARS: usize = 200;

/// Runs inside the rendered search page. `__PARAMS__` is replaced by a JSON
/// object built in [`extraction_script`].
const EXTRACTION_SCRIPT: &str = r#"
(() => {
    const params = __PARAMS__;
    const results = [];
    const seen = new Set();

    for (const item of document.querySelectorAll(params.itemSelector)) {
        if (results.length >= params.maxResults) break;

        const titleNode = item.querySelector(params.titleSelector);
        if (!titleNode) continue;

        const title = titleNode.textContent.trim();
        if (!title || seen.has(title)) continue;
        seen.add(title);

        const url = params.pageBase + encodeURIComponent(title.replace(/ /g, '_'));

        let snippet = '';
        for (const node of item.querySelectorAll(params.snippetSelector)) {
            const text = node.textContent.trim();
            if (text.length > params.minSnippetChars) {
                snippet = text.substring(0, params.maxSnippetChars);
                break;
            }
        }

        results.push({ title, url, snippet: snippet || params.sentinel });
    }

    return { version: params.version, results };
})()
"#;

const VISIBILITY_SCRIPT: &str = r#"
(() => {
    const el = document.querySelector(__SELECTOR__);
    if (!el) return false;
    const style = window.getComputedStyle(el);
    const rect = el.getBoundingClientRect();
    return style.display !== 'none'
        && style.visibility !== 'hidden'
        && (rect.width > 0 || rect.height > 0);
})()
"#;

/// CSS selectors for the rendered search page.
#[derive(Debug, Clone)]
pub struct SearchSelectors {
    /// Region that must be visible before extraction starts.
    pub content_root: String,
    pub item: String,
    /// Relative to an item.
    pub title: String,
    /// Relative to an item.
    pub snippet: String,
}

impl Default for SearchSelectors {
    fn default() -> Self {
        Self {
            content_root: "main".to_string(),
            item: "main div.cursor-pointer".to_string(),
            title: "span.line-clamp-1 span".to_string(),
            snippet: "p".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ScriptOutput {
    pub version: u32,
    #[serde(default)]
    pub results: Vec<RawSearchResult>,
}

pub fn extraction_script(selectors: &SearchSelectors, config: &Config) -> Result<String> {
    let params = json!({
        "version": EXTRACTION_SCRIPT_VERSION,
        "itemSelector": selectors.item,
        "titleSelector": selectors.title,
        "snippetSelector": selectors.snippet,
        "pageBase": config.page_url(""),
        "maxResults": config.max_search_results,
        "minSnippetChars": MIN_SNIPPET_CHARS,
        "maxSnippetChars": MAX_SNIPPET_CHARS,
        "sentinel": NO_DESCRIPTION,
    });
    Ok(EXTRACTION_SCRIPT.replace("__PARAMS__", &serde_json::to_string(&params)?))
}

pub fn visibility_script(selector: &str) -> Result<String> {
    Ok(VISIBILITY_SCRIPT.replace("__SELECTOR__", &serde_json::to_string(selector)?))
}
