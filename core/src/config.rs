//! Engine configuration

use serde::Deserialize;

/// Configuration shared by the engine crates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Separator placed between ancestor names in `path`
    pub path_separator: String,
    /// Prefix of the level badge shown next to each node (`L2`)
    pub level_badge_prefix: String,
    /// Queries shorter than this (after trimming) match nothing
    pub min_query_chars: usize,
    /// Whether search looks at assigned users' name, email and title
    pub search_users: bool,
    /// Roots without a recorded expand choice render expanded
    pub expand_roots: bool,
    /// Maximum number of undoable mutations kept per session
    pub journal_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path_separator: "/".to_string(),
            level_badge_prefix: "L".to_string(),
            min_query_chars: 1,
            search_users: true,
            expand_roots: true,
            journal_capacity: 128,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing keys fall back to the defaults.
    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn with_path_separator(mut self, separator: impl Into<String>) -> Self {
        self.path_separator = separator.into();
        self
    }

    pub fn with_level_badge_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.level_badge_prefix = prefix.into();
        self
    }

    pub fn with_min_query_chars(mut self, count: usize) -> Self {
        self.min_query_chars = count;
        self
    }

    pub fn with_search_users(mut self, enabled: bool) -> Self {
        self.search_users = enabled;
        self
    }

    pub fn with_expand_roots(mut self, enabled: bool) -> Self {
        self.expand_roots = enabled;
        self
    }

    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal_capacity = capacity;
        self
    }
}
