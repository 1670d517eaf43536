//! Mutation descriptions.

use orgtree_core::{Metadata, NodeId, OrganizationNode, OrganizationUser, UserId};
use serde::{Deserialize, Deserializer, Serialize};

/// A single write against the forest.
///
/// Mutations are plain values so they can be journaled and replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Create a node under `parent`, or a new root when `parent` is `None`.
    CreateChild {
        parent: Option<NodeId>,
        draft: NodeDraft,
        index: Option<usize>,
    },
    /// Rename a node or edit its descriptive fields.
    Edit { id: NodeId, patch: NodePatch },
    /// Reparent a node, or promote it to a root when `parent` is `None`.
    Move {
        id: NodeId,
        parent: Option<NodeId>,
        index: Option<usize>,
    },
    /// Delete a node. Populated nodes need `cascade`.
    Delete { id: NodeId, cascade: bool },
    /// Assign a user to a node, moving it off any prior node.
    AssignUser {
        user: OrganizationUser,
        node: NodeId,
        index: Option<usize>,
    },
    /// Remove a user from the node it is assigned to.
    UnassignUser { user: UserId, node: NodeId },
}

impl Mutation {
    pub fn create_child(parent: Option<NodeId>, draft: NodeDraft) -> Self {
        Mutation::CreateChild {
            parent,
            draft,
            index: None,
        }
    }

    pub fn edit(id: NodeId, patch: NodePatch) -> Self {
        Mutation::Edit { id, patch }
    }

    pub fn rename(id: NodeId, name: impl Into<String>) -> Self {
        Mutation::Edit {
            id,
            patch: NodePatch::new().name(name),
        }
    }

    pub fn move_to(id: NodeId, parent: Option<NodeId>, index: Option<usize>) -> Self {
        Mutation::Move { id, parent, index }
    }

    pub fn delete(id: NodeId, cascade: bool) -> Self {
        Mutation::Delete { id, cascade }
    }

    pub fn assign(user: OrganizationUser, node: NodeId) -> Self {
        Mutation::AssignUser {
            user,
            node,
            index: None,
        }
    }

    pub fn unassign(user: UserId, node: NodeId) -> Self {
        Mutation::UnassignUser { user, node }
    }

    /// Short operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::CreateChild { .. } => "createChild",
            Mutation::Edit { .. } => "edit",
            Mutation::Move { .. } => "move",
            Mutation::Delete { .. } => "delete",
            Mutation::AssignUser { .. } => "assignUser",
            Mutation::UnassignUser { .. } => "unassignUser",
        }
    }

    /// The node this mutation is aimed at. Creates are aimed at their parent.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            Mutation::CreateChild { parent, .. } => *parent,
            Mutation::Edit { id, .. } | Mutation::Move { id, .. } | Mutation::Delete { id, .. } => {
                Some(*id)
            }
            Mutation::AssignUser { node, .. } | Mutation::UnassignUser { node, .. } => Some(*node),
        }
    }
}

/// Caller-supplied fields of a node to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl NodeDraft {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            description: None,
            metadata: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub(crate) fn into_node(self, id: NodeId) -> OrganizationNode {
        OrganizationNode {
            description: self.description,
            metadata: self.metadata,
            ..OrganizationNode::new(id, self.name, self.kind)
        }
    }
}

/// Fields to change on an existing node. `None` leaves a field alone.
///
/// `description` and `metadata` are doubly optional: `Some(None)` clears them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Option<Metadata>>,
}

/// A field that is present, even as `null`, becomes `Some`. Absent fields fall
/// back to `None` through `default`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl NodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn metadata(mut self, metadata: Option<Metadata>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.kind.is_none()
            && self.metadata.is_none()
    }

    /// Drop every field that already holds the requested value.
    pub(crate) fn against(self, node: &OrganizationNode) -> Self {
        Self {
            name: self.name.filter(|name| *name != node.name),
            description: self.description.filter(|d| *d != node.description),
            kind: self.kind.filter(|kind| *kind != node.kind),
            metadata: self.metadata.filter(|m| *m != node.metadata),
        }
    }

    /// The patch that restores `node` after `self` has been applied to it.
    pub(crate) fn inverse_for(&self, node: &OrganizationNode) -> Self {
        Self {
            name: self.name.as_ref().map(|_| node.name.clone()),
            description: self.description.as_ref().map(|_| node.description.clone()),
            kind: self.kind.as_ref().map(|_| node.kind.clone()),
            metadata: self.metadata.as_ref().map(|_| node.metadata.clone()),
        }
    }
}
