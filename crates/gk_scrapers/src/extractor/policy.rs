/// What the walker does with one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    Accept,
    AcceptAsSummaryCandidate,
    Skip,
}

/// Tag and class rules for the content walk. The defaults match the markup
/// rendered by grokipedia.com; adjust them here when the site changes rather
/// than touching the walker.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Regions tried in order as the body root.
    pub root_selectors: Vec<String>,
    pub title_selector: String,
    pub fallback_title_selector: String,
    pub category_selector: String,
    pub description_selector: String,
    pub og_description_selector: String,
    pub modified_time_selector: String,

    pub block_tags: Vec<String>,
    pub summary_tags: Vec<String>,
    /// Generic inline wrapper that only counts when it carries a body-text
    /// class.
    pub inline_tag: String,
    pub body_text_markers: Vec<String>,
    /// Checked before `body_text_markers`: math and screen-reader nodes.
    pub skip_markers: Vec<String>,
    /// Subtrees left out of a block's text.
    pub stripped_tags: Vec<String>,

    pub min_block_chars: usize,
    pub min_summary_chars: usize,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            root_selectors: strings(&["article", "main"]),
            title_selector: "h1".to_string(),
            fallback_title_selector: "title".to_string(),
            category_selector: ".categories a, .category a".to_string(),
            description_selector: r#"meta[name="description"]"#.to_string(),
            og_description_selector: r#"meta[property="og:description"]"#.to_string(),
            modified_time_selector: r#"meta[property="article:modified_time"]"#.to_string(),
            block_tags: strings(&["h2", "h3", "h4", "h5", "h6", "pre", "li"]),
            summary_tags: strings(&["p", "blockquote"]),
            inline_tag: "span".to_string(),
            body_text_markers: strings(&["break-words", "leading-7"]),
            skip_markers: strings(&["katex", "sr-only"]),
            stripped_tags: strings(&["button", "svg", "style", "script"]),
            min_block_chars: 3,
            min_summary_chars: 50,
        }
    }
}

impl ExtractionRules {
    /// Classifies an element by tag name and raw `class` attribute. Class
    /// markers match as substrings, so `katex-display` counts as `katex`.
    pub fn classify(&self, tag: &str, class: Option<&str>) -> NodeAction {
        if self.summary_tags.iter().any(|t| t == tag) {
            return NodeAction::AcceptAsSummaryCandidate;
        }
        if self.block_tags.iter().any(|t| t == tag) {
            return NodeAction::Accept;
        }
        if tag != self.inline_tag {
            return NodeAction::Skip;
        }

        let class = class.unwrap_or_default();
        if self.skip_markers.iter().any(|m| class.contains(m.as_str())) {
            NodeAction::Skip
        } else if self.body_text_markers.iter().any(|m| class.contains(m.as_str())) {
            NodeAction::AcceptAsSummaryCandidate
        } else {
            NodeAction::Skip
        }
    }

    pub fn is_stripped(&self, tag: &str) -> bool {
        self.stripped_tags.iter().any(|t| t == tag)
    }
}
