//! Snapshot error types.

use orgtree_core::TreeError;
use thiserror::Error;

/// Errors raised while loading or exporting a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The records do not form a valid forest.
    #[error("invalid snapshot: {0}")]
    Tree(#[from] TreeError),

    /// Malformed JSON.
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SnapshotError {
    /// The underlying tree error, if any.
    pub fn tree_error(&self) -> Option<&TreeError> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Json(_) => None,
        }
    }
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
