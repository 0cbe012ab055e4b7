//! Query normalization.

/// A free-text query reduced to its matching form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedQuery {
    /// Trimmed, lowercased query text
    pub text: String,
    /// Non-empty whitespace-delimited tokens of `text`
    pub tokens: Vec<String>,
}

impl NormalizedQuery {
    /// Normalize a raw query string.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        let tokens = text.split_whitespace().map(str::to_string).collect();
        Self { text, tokens }
    }

    /// An empty query matches every candidate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
