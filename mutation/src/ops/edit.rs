//! Edit operation - renames and descriptive fields.

use orgtree_core::{NodeId, TreeError, TreeResult};
use orgtree_layout::Layout;
use orgtree_store::{Invalidation, NodeStore};

use super::settle;
use crate::mutation::{Mutation, NodePatch};
use crate::result::{Applied, Change, ChangeSet, NodeField};

/// Apply `patch` to a node. A rename relays the whole subtree.
pub fn execute_edit(
    store: &mut NodeStore,
    layout: &Layout,
    id: NodeId,
    patch: NodePatch,
) -> TreeResult<Applied> {
    let node = store.require(id)?;
    if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(TreeError::EmptyName);
    }

    let patch = patch.against(node);
    if patch.is_empty() {
        return Ok(Applied::unchanged());
    }
    let inverse = patch.inverse_for(node);

    let mut fields = Vec::new();
    let renamed = patch.name.is_some();
    if let Some(node) = store.get_mut(id) {
        if let Some(name) = patch.name {
            node.name = name;
            fields.push(NodeField::Name);
        }
        if let Some(description) = patch.description {
            node.description = description;
            fields.push(NodeField::Description);
        }
        if let Some(kind) = patch.kind {
            node.kind = kind;
            fields.push(NodeField::Kind);
        }
        if let Some(metadata) = patch.metadata {
            node.metadata = metadata;
            fields.push(NodeField::Metadata);
        }
    }

    let mut changes = ChangeSet::new();
    changes.push(Change::NodeUpdated { id, fields });
    if renamed {
        settle(store, layout, &Invalidation::relayout(id), Some(id), &mut changes)?;
    }

    Ok(Applied::new(changes, Some(Mutation::edit(id, inverse))))
}
