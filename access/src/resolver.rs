//! Permission resolution.

use orgtree_core::OrganizationNode;
use serde::Serialize;
use std::fmt;

use crate::capability::CapabilitySet;
use crate::error::{AccessError, AccessResult};

/// Flags exposed to the rendering layer to gate which actions show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_create: bool,
    pub can_assign: bool,
}

/// An action an actor may attempt on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Edit,
    Delete,
    Create,
    Assign,
    Move,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Create => "create under",
            Action::Assign => "assign users on",
            Action::Move => "move",
        };
        f.write_str(name)
    }
}

/// Resolve the permission flags of `actor` on `node`.
///
/// Delete is offered for a populated node only to `moveAny` holders; the
/// engine still refuses it unless the caller confirms a cascade.
pub fn resolve(actor: CapabilitySet, node: &OrganizationNode) -> Permissions {
    let can_delete = actor.contains(CapabilitySet::DELETE)
        && (node.is_vacant() || actor.contains(CapabilitySet::MOVE_ANY));

    Permissions {
        can_edit: actor.contains(CapabilitySet::EDIT),
        can_delete,
        can_create: actor.contains(CapabilitySet::CREATE),
        can_assign: actor.contains(CapabilitySet::ASSIGN),
    }
}

/// Fail with [`AccessError::Denied`] unless `actor` may perform `action` on `node`.
pub fn authorize(actor: CapabilitySet, action: Action, node: &OrganizationNode) -> AccessResult<()> {
    let permissions = resolve(actor, node);
    let allowed = match action {
        Action::Edit => permissions.can_edit,
        Action::Delete => permissions.can_delete,
        Action::Create => permissions.can_create,
        Action::Assign => permissions.can_assign,
        Action::Move => actor.intersects(CapabilitySet::EDIT | CapabilitySet::MOVE_ANY),
    };

    if allowed {
        Ok(())
    } else {
        Err(AccessError::denied(action, node.id))
    }
}

/// Fail unless `actor` may create new roots.
pub fn authorize_root(actor: CapabilitySet, action: Action) -> AccessResult<()> {
    let allowed = match action {
        Action::Create => actor.contains(CapabilitySet::CREATE),
        Action::Move => actor.intersects(CapabilitySet::EDIT | CapabilitySet::MOVE_ANY),
        Action::Edit | Action::Delete | Action::Assign => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(AccessError::denied_at_root(action))
    }
}
