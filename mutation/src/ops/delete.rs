//! Delete operation with opt-in cascade.

use orgtree_core::{NodeId, TreeError, TreeResult};
use orgtree_layout::Layout;
use orgtree_store::NodeStore;

use super::settle;
use crate::result::{Applied, Change, ChangeSet};

/// Delete a node.
///
/// Without `cascade` only a vacant leaf may go. With it, the whole subtree is
/// removed and every user in it is unassigned.
pub fn execute_delete(
    store: &mut NodeStore,
    layout: &Layout,
    id: NodeId,
    cascade: bool,
) -> TreeResult<Applied> {
    let node = store.require(id)?;
    if !cascade && !node.is_vacant() {
        return Err(TreeError::subtree_not_empty(
            id,
            node.children.len(),
            node.users.len(),
        ));
    }

    let removal = store.remove(id)?;

    let mut changes = ChangeSet::new();
    for removed in &removal.nodes {
        for user in &removed.users {
            changes.push(Change::UserUnassigned {
                user: user.id,
                from: removed.id,
            });
        }
        changes.push(Change::NodeDeleted { id: removed.id });
    }
    if removal.nodes.len() > 1 {
        tracing::debug!(node = %id, removed = removal.nodes.len(), "cascaded delete");
    }
    settle(store, layout, &removal.invalidation, None, &mut changes)?;

    Ok(Applied::new(changes, None))
}
