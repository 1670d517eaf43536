//! Common error types for orgtree.

use crate::{NodeId, UserId};
use thiserror::Error;

/// Errors that can occur during tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// User not found anywhere in the tree.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// A move would make a node its own ancestor.
    #[error("Moving {node} under {new_parent} would create a cycle")]
    CycleDetected { node: NodeId, new_parent: NodeId },

    /// Non-cascading delete of a node that still has children or users.
    #[error("Node {node} is not empty ({children} children, {users} users)")]
    SubtreeNotEmpty {
        node: NodeId,
        children: usize,
        users: usize,
    },

    /// Unassign of a user that is not on the given node.
    #[error("User {user} is not assigned to {node}")]
    NotAssigned { user: UserId, node: NodeId },

    /// Insert with an id that is live or was retired by a delete.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// Node names must contain at least one non-whitespace character.
    #[error("Node name must not be empty")]
    EmptyName,
}

impl TreeError {
    pub fn cycle(node: NodeId, new_parent: NodeId) -> Self {
        Self::CycleDetected { node, new_parent }
    }

    pub fn subtree_not_empty(node: NodeId, children: usize, users: usize) -> Self {
        Self::SubtreeNotEmpty {
            node,
            children,
            users,
        }
    }

    pub fn not_assigned(user: UserId, node: NodeId) -> Self {
        Self::NotAssigned { user, node }
    }

    pub fn duplicate_node(id: NodeId) -> Self {
        Self::DuplicateId(id.to_string())
    }

    pub fn duplicate_user(id: UserId) -> Self {
        Self::DuplicateId(id.to_string())
    }

    /// Returns true for either flavor of missing reference.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound(_) | Self::UserNotFound(_))
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
