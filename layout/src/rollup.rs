//! Bottom-up user roll-ups.

use orgtree_core::{NodeId, TreeResult};
use orgtree_store::NodeStore;

/// Maintains `total_users` = direct users + the totals of every child.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Recompute `id` from its direct users and its children's cached totals,
    /// then walk up the ancestor chain.
    ///
    /// The walk stops at the first node whose total is unchanged: every node
    /// above it already agrees with its children.
    pub fn rollup(&self, store: &mut NodeStore, id: NodeId) -> TreeResult<Vec<NodeId>> {
        store.require(id)?;
        let chain: Vec<NodeId> = std::iter::once(id).chain(store.ancestors(id)).collect();

        let mut changed = Vec::new();
        for node_id in chain {
            if !self.refresh(store, node_id) {
                break;
            }
            changed.push(node_id);
        }
        Ok(changed)
    }

    /// Recompute every node of the subtree rooted at `id`, children first.
    ///
    /// Ancestors of `id` are left alone.
    pub fn rollup_subtree(&self, store: &mut NodeStore, id: NodeId) -> TreeResult<Vec<NodeId>> {
        store.require(id)?;
        let order = store.subtree(id);
        Ok(order
            .into_iter()
            .rev()
            .filter(|node_id| self.refresh(store, *node_id))
            .collect())
    }

    /// Recompute the whole forest. Only needed when no totals are cached yet.
    pub fn rollup_all(&self, store: &mut NodeStore) -> Vec<NodeId> {
        let order = store.walk();
        order
            .into_iter()
            .rev()
            .filter(|node_id| self.refresh(store, *node_id))
            .collect()
    }

    /// Recompute a single node. Returns true if its total changed.
    fn refresh(&self, store: &mut NodeStore, id: NodeId) -> bool {
        let Some(node) = store.get(id) else {
            return false;
        };
        let total = node.users.len()
            + node
                .children
                .iter()
                .filter_map(|child| store.get(*child))
                .map(|child| child.total_users)
                .sum::<usize>();

        match store.get_mut(id) {
            Some(node) if node.total_users != total => {
                node.total_users = total;
                true
            }
            _ => false,
        }
    }
}
