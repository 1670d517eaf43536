//! Mutation engine - owns the forest and coordinates operations.
//!
//! The engine delegates to specialized operation modules in `ops/`:
//! - `ops/create.rs` - child and root creation
//! - `ops/edit.rs` - renames and descriptive edits
//! - `ops/relocate.rs` - reparenting and reordering
//! - `ops/delete.rs` - deletion with opt-in cascade
//! - `ops/assign.rs` - user assignment and unassignment

use orgtree_core::{EngineConfig, NodeId, OrganizationUser, TreeResult, UserId};
use orgtree_layout::Layout;
use orgtree_store::NodeStore;

use crate::mutation::{Mutation, NodeDraft, NodePatch};
use crate::ops;
use crate::result::Applied;

/// Applies mutations to a forest and keeps its derived fields current.
#[derive(Debug, Clone)]
pub struct MutationEngine {
    store: NodeStore,
    layout: Layout,
}

impl MutationEngine {
    /// Create an engine over an empty forest.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            store: NodeStore::new(),
            layout: Layout::new(config),
        }
    }

    /// Take over a populated store, recomputing every derived field.
    pub fn with_store(mut store: NodeStore, config: &EngineConfig) -> Self {
        let layout = Layout::new(config);
        layout.rebuild(&mut store);
        Self { store, layout }
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_store(self) -> NodeStore {
        self.store
    }

    /// Apply a mutation.
    ///
    /// On error the forest is exactly as it was before the call.
    pub fn apply(&mut self, mutation: Mutation) -> TreeResult<Applied> {
        let op = mutation.name();
        let target = mutation.target();
        let store = &mut self.store;
        let layout = &self.layout;

        let result = match mutation {
            Mutation::CreateChild {
                parent,
                draft,
                index,
            } => ops::execute_create(store, layout, parent, draft, index),
            Mutation::Edit { id, patch } => ops::execute_edit(store, layout, id, patch),
            Mutation::Move { id, parent, index } => {
                ops::execute_move(store, layout, id, parent, index)
            }
            Mutation::Delete { id, cascade } => ops::execute_delete(store, layout, id, cascade),
            Mutation::AssignUser { user, node, index } => {
                ops::execute_assign(store, layout, user, node, index)
            }
            Mutation::UnassignUser { user, node } => {
                ops::execute_unassign(store, layout, user, node)
            }
        };

        match &result {
            Ok(applied) => tracing::debug!(
                op,
                target = ?target,
                changes = applied.changes.len(),
                rolled_up = applied.changes.rolled_up.len(),
                "applied mutation"
            ),
            Err(err) => tracing::debug!(op, target = ?target, error = %err, "rejected mutation"),
        }
        result
    }

    /// Create a node under `parent` (a new root when `None`), appended last.
    pub fn create_child(&mut self, parent: Option<NodeId>, draft: NodeDraft) -> TreeResult<Applied> {
        self.apply(Mutation::create_child(parent, draft))
    }

    /// Create a node at `index` among its siblings.
    pub fn create_child_at(
        &mut self,
        parent: Option<NodeId>,
        draft: NodeDraft,
        index: usize,
    ) -> TreeResult<Applied> {
        self.apply(Mutation::CreateChild {
            parent,
            draft,
            index: Some(index),
        })
    }

    pub fn edit(&mut self, id: NodeId, patch: NodePatch) -> TreeResult<Applied> {
        self.apply(Mutation::edit(id, patch))
    }

    pub fn rename(&mut self, id: NodeId, name: impl Into<String>) -> TreeResult<Applied> {
        self.apply(Mutation::rename(id, name))
    }

    /// Reparent `id` under `parent`, or promote it to a root.
    pub fn move_node(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
        index: Option<usize>,
    ) -> TreeResult<Applied> {
        self.apply(Mutation::move_to(id, parent, index))
    }

    pub fn delete_node(&mut self, id: NodeId, cascade: bool) -> TreeResult<Applied> {
        self.apply(Mutation::delete(id, cascade))
    }

    pub fn assign_user(&mut self, user: OrganizationUser, node: NodeId) -> TreeResult<Applied> {
        self.apply(Mutation::assign(user, node))
    }

    pub fn unassign_user(&mut self, user: UserId, node: NodeId) -> TreeResult<Applied> {
        self.apply(Mutation::unassign(user, node))
    }
}
