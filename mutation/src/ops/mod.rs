//! Mutation operation implementations.
//!
//! Each operation validates its preconditions against the store before the
//! first write, so a failing operation leaves the forest untouched.

mod assign;
mod create;
mod delete;
mod edit;
mod relocate;

pub use assign::{execute_assign, execute_unassign};
pub use create::execute_create;
pub use delete::execute_delete;
pub use edit::execute_edit;
pub use relocate::execute_move;

use orgtree_core::{NodeId, TreeResult};
use orgtree_layout::Layout;
use orgtree_store::{Invalidation, NodeStore};

use crate::result::{Change, ChangeSet};

/// Refresh derived fields and record the nodes relaid as a side effect.
///
/// `origin` is the node the mutation targeted; its own relayout is already
/// described by the primary change.
fn settle(
    store: &mut NodeStore,
    layout: &Layout,
    invalidation: &Invalidation,
    origin: Option<NodeId>,
    changes: &mut ChangeSet,
) -> TreeResult<()> {
    let refresh = layout.apply(store, invalidation)?;
    for id in refresh.relaid {
        if Some(id) == origin {
            continue;
        }
        if let Some(node) = store.get(id) {
            changes.push(Change::NodeRelaid {
                id,
                level: node.level,
                path: node.path.clone(),
            });
        }
    }
    changes.rolled_up = refresh.rolled;
    Ok(())
}
