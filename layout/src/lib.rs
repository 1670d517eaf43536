//! orgtree Layout
//!
//! Maintains the derived fields of every node:
//! - `level` and `path` from the ancestor chain (PathResolver)
//! - `total_users` rolled up bottom-up (AggregationEngine)
//!
//! Both consume the [`Invalidation`] reported by the store after a structural
//! change and touch only the stale part of the forest.

mod path;
mod rollup;

pub use path::PathResolver;
pub use rollup::AggregationEngine;

use orgtree_core::{EngineConfig, NodeId, TreeResult};
use orgtree_store::{Invalidation, NodeStore};

/// Ids whose derived fields changed during a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refresh {
    /// Nodes whose `level` or `path` changed.
    pub relaid: Vec<NodeId>,
    /// Nodes whose `total_users` changed.
    pub rolled: Vec<NodeId>,
}

/// Path resolver and aggregation engine applied in the right order.
#[derive(Debug, Clone)]
pub struct Layout {
    paths: PathResolver,
    totals: AggregationEngine,
}

impl Layout {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            paths: PathResolver::from_config(config),
            totals: AggregationEngine::new(),
        }
    }

    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    pub fn totals(&self) -> &AggregationEngine {
        &self.totals
    }

    /// Bring every stale id named by `invalidation` up to date.
    pub fn apply(&self, store: &mut NodeStore, invalidation: &Invalidation) -> TreeResult<Refresh> {
        let mut refresh = Refresh::default();
        if let Some(root) = invalidation.relayout {
            refresh.relaid = self.paths.recompute(store, root)?;
        }
        for id in &invalidation.rollup {
            if !store.contains(*id) {
                continue;
            }
            for changed in self.totals.rollup(store, *id)? {
                if !refresh.rolled.contains(&changed) {
                    refresh.rolled.push(changed);
                }
            }
        }
        Ok(refresh)
    }

    /// Recompute every derived field from scratch.
    pub fn rebuild(&self, store: &mut NodeStore) {
        let relaid = self.paths.recompute_all(store);
        let rolled = self.totals.rollup_all(store);
        tracing::debug!(
            nodes = store.len(),
            relaid = relaid.len(),
            rolled = rolled.len(),
            "rebuilt layout"
        );
    }
}
