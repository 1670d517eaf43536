//! Journal error types.

use thiserror::Error;

use crate::journal::Seq;

/// Journal errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// The journal holds no records.
    #[error("nothing to undo")]
    NothingToUndo,

    /// The most recent record cannot be compensated.
    #[error("{op} at seq {seq} cannot be undone")]
    Irreversible { seq: Seq, op: &'static str },
}

impl JournalError {
    pub fn irreversible(seq: Seq, op: &'static str) -> Self {
        Self::Irreversible { seq, op }
    }
}

/// Result type for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;
