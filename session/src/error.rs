//! Session error types.

use orgtree_access::AccessError;
use orgtree_core::TreeError;
use orgtree_journal::JournalError;
use orgtree_snapshot::SnapshotError;
use thiserror::Error;

/// Errors that can occur in a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl SessionError {
    /// The tree error behind this failure, if any.
    pub fn tree_error(&self) -> Option<&TreeError> {
        match self {
            Self::Tree(err) => Some(err),
            Self::Snapshot(err) => err.tree_error(),
            Self::Access(_) | Self::Journal(_) => None,
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
