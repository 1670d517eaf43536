//! Expansion state of a tree-view session.

use std::collections::{BTreeSet, HashMap};

use orgtree_core::{EngineConfig, NodeId, OrganizationNode};
use orgtree_search::VisibleSet;

/// Which nodes are expanded.
///
/// User choices and search-forced expansion are kept apart: clearing a search
/// drops the forced set and leaves every user choice as it was. None of this
/// affects the structure of the forest.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    user: HashMap<NodeId, bool>,
    forced: BTreeSet<NodeId>,
    expand_roots: bool,
}

impl ExpansionState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            user: HashMap::new(),
            forced: BTreeSet::new(),
            expand_roots: config.expand_roots,
        }
    }

    /// The user's choice for a node, falling back to the default policy.
    pub fn user_expanded(&self, node: &OrganizationNode) -> bool {
        self.user
            .get(&node.id)
            .copied()
            .unwrap_or(self.expand_roots && node.is_root())
    }

    pub fn is_forced(&self, id: NodeId) -> bool {
        self.forced.contains(&id)
    }

    /// Forced by a search, or expanded by the user.
    pub fn is_expanded(&self, node: &OrganizationNode) -> bool {
        self.is_forced(node.id) || self.user_expanded(node)
    }

    /// Flip the user's choice. Returns the new choice.
    pub fn toggle(&mut self, node: &OrganizationNode) -> bool {
        let expanded = !self.user_expanded(node);
        self.user.insert(node.id, expanded);
        expanded
    }

    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        self.user.insert(id, expanded);
    }

    pub fn expand_all(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.user.extend(ids.into_iter().map(|id| (id, true)));
    }

    pub fn collapse_all(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        self.user.extend(ids.into_iter().map(|id| (id, false)));
    }

    /// Replace the forced set with the ancestors a search needs open.
    pub fn apply_search(&mut self, visible: &VisibleSet) {
        self.forced = visible.force_expand().clone();
    }

    pub fn clear_search(&mut self) {
        self.forced.clear();
    }

    /// Drop all state held for deleted nodes.
    pub fn forget(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        for id in ids {
            self.user.remove(&id);
            self.forced.remove(&id);
        }
    }

    /// Nodes with a recorded user choice.
    pub fn recorded(&self) -> usize {
        self.user.len()
    }
}
