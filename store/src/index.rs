//! Indexes for efficient store lookups.

use orgtree_core::{NodeId, UserId};
use std::collections::HashMap;

/// Placement index: UserId -> NodeId
#[derive(Debug, Clone, Default)]
pub struct PlacementIndex {
    index: HashMap<UserId, NodeId>,
}

impl PlacementIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a placement, returning the previous node if there was one.
    pub fn insert(&mut self, user_id: UserId, node_id: NodeId) -> Option<NodeId> {
        self.index.insert(user_id, node_id)
    }

    pub fn remove(&mut self, user_id: UserId) -> Option<NodeId> {
        self.index.remove(&user_id)
    }

    pub fn get(&self, user_id: UserId) -> Option<NodeId> {
        self.index.get(&user_id).copied()
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.index.contains_key(&user_id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
