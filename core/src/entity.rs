//! Entity structures for orgtree.
//!
//! Organizational nodes form a forest; users are attached to at most one node.

use crate::{NodeId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An organizational unit (division, team, sub-team).
///
/// `level`, `path` and `total_users` are derived fields. They are maintained by
/// the layout crate and are only trustworthy after the engine has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationNode {
    /// Unique identifier for this node.
    pub id: NodeId,
    /// Display name; also the last segment of `path`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category tag such as "division" or "team".
    #[serde(rename = "type")]
    pub kind: String,
    /// Depth in the forest (roots are 0).
    #[serde(default)]
    pub level: u32,
    /// Ancestor names joined by the configured separator, ending in `name`.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    /// Child ids in display order.
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Users assigned directly to this node, unique by id.
    #[serde(default)]
    pub users: Vec<OrganizationUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Direct users plus the totals of every child.
    #[serde(default)]
    pub total_users: usize,
}

impl OrganizationNode {
    /// Create a detached node with empty derived fields.
    pub fn new(id: NodeId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            kind: kind.into(),
            level: 0,
            path: String::new(),
            parent_id: None,
            children: Vec::new(),
            users: Vec::new(),
            metadata: None,
            total_users: 0,
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

    /// Returns true if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of users assigned directly to this node.
    pub fn direct_users(&self) -> usize {
        self.users.len()
    }

    /// A leaf with no users; the only shape a non-cascading delete accepts.
    pub fn is_vacant(&self) -> bool {
        self.is_leaf() && self.users.is_empty()
    }

    /// Get a directly assigned user.
    pub fn user(&self, user_id: UserId) -> Option<&OrganizationUser> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Check if a user is assigned directly to this node.
    pub fn has_user(&self, user_id: UserId) -> bool {
        self.users.iter().any(|u| u.id == user_id)
    }

    /// Position of a child in display order.
    pub fn child_position(&self, child: NodeId) -> Option<usize> {
        self.children.iter().position(|c| *c == child)
    }
}

/// A person referenced by the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<UserId>,
}

impl OrganizationUser {
    /// Create an active user with no title, avatar or manager.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role: role.into(),
            title: None,
            avatar: None,
            status: UserStatus::Active,
            manager_id: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_manager(mut self, manager_id: UserId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    /// A user whose manager is themselves leads their unit.
    pub fn is_unit_lead(&self) -> bool {
        self.manager_id == Some(self.id)
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Account status of a user.
///
/// Only `active` carries meaning for the engine; any other status string is
/// preserved verbatim so it round-trips to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserStatus {
    #[default]
    Active,
    Other(String),
}

impl From<String> for UserStatus {
    fn from(s: String) -> Self {
        if s.eq_ignore_ascii_case("active") {
            UserStatus::Active
        } else {
            UserStatus::Other(s)
        }
    }
}

impl From<UserStatus> for String {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => "active".to_string(),
            UserStatus::Other(s) => s,
        }
    }
}

/// Advisory node metadata. No invariants are attached to any field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headcount: Option<u32>,
    /// Any other keys supplied by the backend.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
