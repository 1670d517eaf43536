//! Normalized search queries.

/// Lowercase `text` one character at a time.
///
/// Unlike `str::to_lowercase` this ignores context (a final `Σ` folds to `σ`),
/// so every folded string lines up with the per-character folding highlights use.
pub fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// A query ready for matching: trimmed and folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    needle: String,
}

impl Query {
    /// Normalize `raw`. Returns `None` for a query that clears the search:
    /// blank, or shorter than `min_chars` characters once trimmed.
    pub fn parse(raw: &str, min_chars: usize) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().count() < min_chars {
            return None;
        }
        Some(Self {
            needle: fold(trimmed),
        })
    }

    /// The folded needle.
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring test against arbitrary text.
    pub fn is_in(&self, text: &str) -> bool {
        fold(text).contains(&self.needle)
    }
}
