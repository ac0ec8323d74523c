#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub text: String,
    pub summary_eligible: bool,
}

/// Running state of one extraction pass.
#[derive(Debug)]
pub struct ExtractionContext {
    blocks: Vec<ContentBlock>,
    summary: Option<String>,
    min_block_chars: usize,
    min_summary_chars: usize,
}

impl ExtractionContext {
    pub fn new(min_block_chars: usize, min_summary_chars: usize) -> Self {
        Self {
            blocks: Vec::new(),
            summary: None,
            min_block_chars,
            min_summary_chars,
        }
    }

    /// Offers already-collected element text. Returns whether it was accepted.
    pub fn offer(&mut self, raw: &str, summary_eligible: bool) -> bool {
        let text = normalize_whitespace(raw);
        if text.is_empty() || text.chars().count() < self.min_block_chars {
            return false;
        }
        if self.last_accepted() == Some(text.as_str()) {
            return false;
        }

        if summary_eligible
            && self.summary.is_none()
            && text.chars().count() > self.min_summary_chars
        {
            self.summary = Some(text.clone());
        }
        self.blocks.push(ContentBlock {
            text,
            summary_eligible,
        });
        true
    }

    pub fn last_accepted(&self) -> Option<&str> {
        self.blocks.last().map(|b| b.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Joins the accepted blocks with a blank line.
    pub fn content(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Collapses whitespace runs to single spaces and trims.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
