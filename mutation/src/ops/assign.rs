//! User assignment operations.

use orgtree_core::{NodeId, OrganizationUser, TreeResult, UserId};
use orgtree_layout::Layout;
use orgtree_store::NodeStore;

use super::settle;
use crate::mutation::Mutation;
use crate::result::{Applied, Change, ChangeSet};

/// Where a user sat before an assignment, and the record it had there.
struct Prior {
    node: NodeId,
    position: usize,
    record: OrganizationUser,
}

fn prior(store: &NodeStore, user_id: UserId) -> Option<Prior> {
    let node_id = store.user_location(user_id)?;
    let node = store.get(node_id)?;
    let position = node.users.iter().position(|u| u.id == user_id)?;
    Some(Prior {
        node: node_id,
        position,
        record: node.users[position].clone(),
    })
}

/// Assign `user` to `node_id`, detaching it from its prior node.
pub fn execute_assign(
    store: &mut NodeStore,
    layout: &Layout,
    user: OrganizationUser,
    node_id: NodeId,
    index: Option<usize>,
) -> TreeResult<Applied> {
    let target = store.require(node_id)?;
    let prior = prior(store, user.id);

    if let Some(prior) = &prior {
        if prior.node == node_id && prior.record == user {
            let last = target.users.len().saturating_sub(1);
            if index.map_or(last, |i| i.min(last)) == prior.position {
                return Ok(Applied::unchanged());
            }
        }
    }

    let user_id = user.id;
    let placement = store.place_user_at(user, node_id, index)?;

    let mut changes = ChangeSet::new();
    changes.push(Change::UserAssigned {
        user: user_id,
        from: placement.previous,
        to: node_id,
    });
    settle(store, layout, &placement.invalidation, None, &mut changes)?;

    let inverse = match prior {
        Some(prior) => Mutation::AssignUser {
            user: prior.record,
            node: prior.node,
            index: Some(prior.position),
        },
        None => Mutation::unassign(user_id, node_id),
    };
    Ok(Applied::new(changes, Some(inverse)))
}

/// Remove a user from `node_id`. Fails with `NotAssigned` if it is not there.
pub fn execute_unassign(
    store: &mut NodeStore,
    layout: &Layout,
    user_id: UserId,
    node_id: NodeId,
) -> TreeResult<Applied> {
    let release = store.release_user(user_id, node_id)?;

    let mut changes = ChangeSet::new();
    changes.push(Change::UserUnassigned {
        user: user_id,
        from: node_id,
    });
    settle(store, layout, &release.invalidation, None, &mut changes)?;

    Ok(Applied::new(
        changes,
        Some(Mutation::AssignUser {
            user: release.user,
            node: node_id,
            index: Some(release.position),
        }),
    ))
}
