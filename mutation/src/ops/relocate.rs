//! Move operation - reparenting and reordering.

use orgtree_core::{NodeId, TreeError, TreeResult};
use orgtree_layout::Layout;
use orgtree_store::NodeStore;

use super::settle;
use crate::mutation::Mutation;
use crate::result::{Applied, Change, ChangeSet};

/// Move `id` with its subtree under `parent` (a root when `None`) at `index`.
pub fn execute_move(
    store: &mut NodeStore,
    layout: &Layout,
    id: NodeId,
    parent: Option<NodeId>,
    index: Option<usize>,
) -> TreeResult<Applied> {
    let from = store.require(id)?.parent_id;
    let position = store.position(id).ok_or(TreeError::NodeNotFound(id))?;

    if from == parent {
        // Index applies after detaching, so the last valid slot is len - 1.
        let last = store.list(from)?.len().saturating_sub(1);
        if index.map_or(last, |i| i.min(last)) == position {
            return Ok(Applied::unchanged());
        }
    }

    let invalidation = store.reparent(id, parent, index)?;

    let mut changes = ChangeSet::new();
    changes.push(Change::NodeMoved {
        id,
        from,
        to: parent,
    });
    settle(store, layout, &invalidation, Some(id), &mut changes)?;

    Ok(Applied::new(
        changes,
        Some(Mutation::move_to(id, from, Some(position))),
    ))
}
