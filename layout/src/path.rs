//! Level and path derivation.

use orgtree_core::{EngineConfig, NodeId, TreeResult};
use orgtree_store::NodeStore;

/// Derives `level` and `path` from a node's ancestor chain.
#[derive(Debug, Clone)]
pub struct PathResolver {
    separator: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new("/")
    }
}

impl PathResolver {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.path_separator.clone())
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Recompute `level` and `path` for `id` and every node below it.
    ///
    /// The parent of `id` is assumed to be up to date. Returns the ids whose
    /// fields actually changed, in display order.
    pub fn recompute(&self, store: &mut NodeStore, id: NodeId) -> TreeResult<Vec<NodeId>> {
        let (level, prefix) = match store.require(id)?.parent_id {
            Some(parent_id) => {
                let parent = store.require(parent_id)?;
                (parent.level + 1, Some(parent.path.clone()))
            }
            None => (0, None),
        };

        let mut changed = Vec::new();
        let mut stack = vec![(id, level, prefix)];
        while let Some((current, level, prefix)) = stack.pop() {
            let Some(node) = store.get_mut(current) else {
                continue;
            };
            let path = match prefix {
                Some(prefix) => format!("{}{}{}", prefix, self.separator, node.name),
                None => node.name.clone(),
            };
            if node.level != level || node.path != path {
                node.level = level;
                node.path = path.clone();
                changed.push(current);
            }
            for child in node.children.iter().rev() {
                stack.push((*child, level + 1, Some(path.clone())));
            }
        }

        tracing::trace!(node = %id, changed = changed.len(), "recomputed paths");
        Ok(changed)
    }

    /// Recompute every root and its subtree.
    pub fn recompute_all(&self, store: &mut NodeStore) -> Vec<NodeId> {
        let roots = store.roots().to_vec();
        let mut changed = Vec::new();
        for root in roots {
            if let Ok(ids) = self.recompute(store, root) {
                changed.extend(ids);
            }
        }
        changed
    }
}
