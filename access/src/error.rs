//! Access error types.

use orgtree_core::NodeId;
use thiserror::Error;

use crate::resolver::Action;

/// Errors raised while resolving or enforcing permissions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Not permitted to {action} {node}")]
    Denied { action: Action, node: NodeId },

    #[error("Not permitted to {action} the root level")]
    DeniedAtRoot { action: Action },

    #[error("Unknown capability: {name}")]
    UnknownCapability { name: String },
}

impl AccessError {
    pub fn denied(action: Action, node: NodeId) -> Self {
        Self::Denied { action, node }
    }

    pub fn denied_at_root(action: Action) -> Self {
        Self::DeniedAtRoot { action }
    }

    pub fn unknown_capability(name: impl Into<String>) -> Self {
        Self::UnknownCapability { name: name.into() }
    }
}

/// Result type for access checks.
pub type AccessResult<T> = Result<T, AccessError>;
