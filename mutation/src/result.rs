//! Mutation result types.

use orgtree_core::{NodeId, UserId};
use serde::Serialize;

use crate::mutation::Mutation;

/// A descriptive field of a node touched by an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeField {
    Name,
    Description,
    #[serde(rename = "type")]
    Kind,
    Metadata,
}

/// One entry of a change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Change {
    NodeCreated {
        id: NodeId,
        parent: Option<NodeId>,
    },
    NodeUpdated {
        id: NodeId,
        fields: Vec<NodeField>,
    },
    /// `path`/`level` changed because an ancestor was renamed or moved.
    NodeRelaid {
        id: NodeId,
        level: u32,
        path: String,
    },
    NodeMoved {
        id: NodeId,
        from: Option<NodeId>,
        to: Option<NodeId>,
    },
    NodeDeleted {
        id: NodeId,
    },
    UserAssigned {
        user: UserId,
        from: Option<NodeId>,
        to: NodeId,
    },
    UserUnassigned {
        user: UserId,
        from: NodeId,
    },
}

impl Change {
    /// Nodes whose own record this change touches.
    fn nodes(&self) -> Vec<NodeId> {
        match self {
            Change::NodeCreated { id, .. }
            | Change::NodeUpdated { id, .. }
            | Change::NodeRelaid { id, .. }
            | Change::NodeMoved { id, .. }
            | Change::NodeDeleted { id } => vec![*id],
            Change::UserAssigned { from, to, .. } => from.iter().copied().chain([*to]).collect(),
            Change::UserUnassigned { from, .. } => vec![*from],
        }
    }
}

/// Ordered description of everything a mutation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub changes: Vec<Change>,
    /// Nodes whose `totalUsers` changed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rolled_up: Vec<NodeId>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    /// Ids of created nodes.
    pub fn created(&self) -> Vec<NodeId> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                Change::NodeCreated { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Ids of nodes that still exist and whose record changed, without duplicates.
    pub fn updated(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for change in &self.changes {
            if let Change::NodeUpdated { id, .. }
            | Change::NodeRelaid { id, .. }
            | Change::NodeMoved { id, .. } = change
            {
                if !ids.contains(id) {
                    ids.push(*id);
                }
            }
        }
        ids
    }

    /// Ids of deleted nodes, children before parents.
    pub fn deleted(&self) -> Vec<NodeId> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                Change::NodeDeleted { id } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Users whose placement changed.
    pub fn reassigned_users(&self) -> Vec<UserId> {
        let mut users = Vec::new();
        for change in &self.changes {
            if let Change::UserAssigned { user, .. } | Change::UserUnassigned { user, .. } = change {
                if !users.contains(user) {
                    users.push(*user);
                }
            }
        }
        users
    }

    /// Every node whose record or user list changed, including deleted ones.
    pub fn touched(&self) -> Vec<NodeId> {
        let mut ids = Vec::new();
        for id in self.changes.iter().flat_map(Change::nodes) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

/// Outcome of an applied mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub changes: ChangeSet,
    /// Mutation that restores the prior state, if one exists.
    ///
    /// Deletes have none because ids are never reused. No-ops have none
    /// because there is nothing to restore.
    pub inverse: Option<Mutation>,
}

impl Applied {
    pub fn new(changes: ChangeSet, inverse: Option<Mutation>) -> Self {
        Self { changes, inverse }
    }

    /// An applied mutation that changed nothing.
    pub fn unchanged() -> Self {
        Self::new(ChangeSet::new(), None)
    }

    /// Id of the node a create produced.
    pub fn created_node(&self) -> Option<NodeId> {
        self.changes.created().first().copied()
    }

    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}
