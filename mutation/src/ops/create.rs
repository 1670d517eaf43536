//! Create operation.

use orgtree_core::{NodeId, TreeError, TreeResult};
use orgtree_layout::Layout;
use orgtree_store::NodeStore;

use super::settle;
use crate::mutation::{Mutation, NodeDraft};
use crate::result::{Applied, Change, ChangeSet};

/// Create a node from `draft` under `parent`, or as a new root.
pub fn execute_create(
    store: &mut NodeStore,
    layout: &Layout,
    parent: Option<NodeId>,
    draft: NodeDraft,
    index: Option<usize>,
) -> TreeResult<Applied> {
    if draft.name.trim().is_empty() {
        return Err(TreeError::EmptyName);
    }
    if let Some(parent_id) = parent {
        store.require(parent_id)?;
    }

    let id = store.allocate_id();
    let invalidation = store.insert(draft.into_node(id), parent, index)?;

    let mut changes = ChangeSet::new();
    changes.push(Change::NodeCreated { id, parent });
    settle(store, layout, &invalidation, Some(id), &mut changes)?;

    Ok(Applied::new(changes, Some(Mutation::delete(id, false))))
}
