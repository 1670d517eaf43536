//! orgtree Search
//!
//! Case-insensitive substring search over nodes and their users.
//!
//! A search yields the directly matching nodes in display order together with
//! the ancestors that must be force-expanded for every match to be visible.
//! The [`SearchIndex`] caches a lowercased haystack per node and is refreshed
//! from the change set of each applied mutation.

mod highlight;
mod index;
mod query;

pub use highlight::{highlight, node_highlights, FieldHighlight, MatchField, Span};
pub use index::{matches, SearchIndex, VisibleSet};
pub use query::{fold, Query};
