//! Heuristic article extraction over a parsed page.
//!
//! The walk visits every element under the article root in document order
//! and asks [`ExtractionRules::classify`] what to do with it. Accepted text
//! goes through [`ExtractionContext`], which owns length filtering,
//! adjacent-duplicate suppression and summary selection.

use gk_core::{Article, Error, Result};
use scraper::{ElementRef, Html, Selector};

mod context;
mod metadata;
mod policy;

pub use context::{normalize_whitespace, ContentBlock, ExtractionContext};
pub use policy::{ExtractionRules, NodeAction};

#[derive(Debug)]
struct Selectors {
    roots: Vec<Selector>,
    title: Selector,
    fallback_title: Selector,
    categories: Selector,
    description: Selector,
    og_description: Selector,
    modified_time: Selector,
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| Error::Parse(format!("Invalid selector {:?}: {}", selector, e)))
}

/// Turns a rendered article page into an [`Article`]. Pure: the same
/// document always yields the same article.
#[derive(Debug)]
pub struct ContentExtractor {
    rules: ExtractionRules,
    selectors: Selectors,
}

impl ContentExtractor {
    pub fn new(rules: ExtractionRules) -> Result<Self> {
        let selectors = Selectors {
            roots: rules
                .root_selectors
                .iter()
                .map(|s| parse_selector(s))
                .collect::<Result<_>>()?,
            title: parse_selector(&rules.title_selector)?,
            fallback_title: parse_selector(&rules.fallback_title_selector)?,
            categories: parse_selector(&rules.category_selector)?,
            description: parse_selector(&rules.description_selector)?,
            og_description: parse_selector(&rules.og_description_selector)?,
            modified_time: parse_selector(&rules.modified_time_selector)?,
        };
        Ok(Self { rules, selectors })
    }

    pub fn extract(&self, document: &Html, url: &str) -> Article {
        let ctx = self.extract_blocks(document);

        let summary = ctx
            .summary()
            .map(str::to_string)
            .or_else(|| metadata::meta_content(document, &self.selectors.description))
            .or_else(|| metadata::meta_content(document, &self.selectors.og_description))
            .unwrap_or_default();

        Article {
            title: self.title(document),
            url: url.to_string(),
            content: ctx.content(),
            summary,
            categories: metadata::collect_texts(document, &self.selectors.categories),
            last_updated: metadata::meta_content(document, &self.selectors.modified_time)
                .unwrap_or_default(),
        }
    }

    /// Walks the preferred root, then the whole document if that produced
    /// nothing.
    pub fn extract_blocks(&self, document: &Html) -> ExtractionContext {
        let mut ctx = self.new_context();
        for root in self.select_roots(document) {
            self.walk(root, &mut ctx);
        }

        if ctx.is_empty() {
            tracing::debug!("No blocks under article root, walking the whole document");
            ctx = self.new_context();
            self.walk(document.root_element(), &mut ctx);
        }
        ctx
    }

    fn new_context(&self) -> ExtractionContext {
        ExtractionContext::new(self.rules.min_block_chars, self.rules.min_summary_chars)
    }

    /// Matches of the first root selector that hits anything, minus matches
    /// nested inside another match so no subtree is walked twice.
    fn select_roots<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for selector in &self.selectors.roots {
            let matches: Vec<ElementRef<'a>> = document.select(selector).collect();
            if matches.is_empty() {
                continue;
            }
            let ids: Vec<_> = matches.iter().map(|el| el.id()).collect();
            return matches
                .into_iter()
                .filter(|el| !el.ancestors().any(|a| ids.contains(&a.id())))
                .collect();
        }
        Vec::new()
    }

    fn walk(&self, root: ElementRef<'_>, ctx: &mut ExtractionContext) {
        for node in root.descendants().skip(1) {
            let Some(element) = ElementRef::wrap(node) else {
                continue;
            };
            let value = element.value();
            match self.rules.classify(value.name(), value.attr("class")) {
                NodeAction::Skip => {}
                NodeAction::Accept => {
                    ctx.offer(&self.element_text(element), false);
                }
                NodeAction::AcceptAsSummaryCandidate => {
                    ctx.offer(&self.element_text(element), true);
                }
            }
        }
    }

    /// Raw text of `element` with stripped subtrees (buttons, svg, styles,
    /// scripts) left out.
    pub fn element_text(&self, element: ElementRef<'_>) -> String {
        let mut out = String::new();
        self.collect_text(element, &mut out);
        out
    }

    fn collect_text(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(text);
            } else if let Some(child) = ElementRef::wrap(child) {
                if !self.rules.is_stripped(child.value().name()) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    fn title(&self, document: &Html) -> String {
        [&self.selectors.title, &self.selectors.fallback_title]
            .into_iter()
            .filter_map(|selector| document.select(selector).next())
            .map(|el| normalize_whitespace(&self.element_text(el)))
            .find(|title| !title.is_empty())
            .unwrap_or_default()
    }
}
