//! Nested snapshot records.

use orgtree_core::{Metadata, NodeId, OrganizationNode, OrganizationUser};
use serde::{Deserialize, Serialize};

/// A node as exchanged with the persistence collaborator, children inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_users: Option<usize>,
    #[serde(default)]
    pub users: Vec<OrganizationUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, alias = "subModules")]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    pub fn new(id: NodeId, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            kind: kind.into(),
            level: None,
            path: None,
            total_users: None,
            users: Vec::new(),
            metadata: None,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: NodeRecord) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_user(mut self, user: OrganizationUser) -> Self {
        self.users.push(user);
        self
    }

    /// Split into a detached node and the child records.
    pub(crate) fn into_parts(self) -> (OrganizationNode, Vec<NodeRecord>) {
        let node = OrganizationNode {
            description: self.description,
            users: self.users,
            metadata: self.metadata,
            ..OrganizationNode::new(self.id, self.name, self.kind)
        };
        (node, self.children)
    }

    /// Export a node with its derived fields; children are filled in by the caller.
    pub(crate) fn from_node(node: &OrganizationNode) -> Self {
        Self {
            id: node.id,
            name: node.name.clone(),
            description: node.description.clone(),
            kind: node.kind.clone(),
            level: Some(node.level),
            path: Some(node.path.clone()),
            total_users: Some(node.total_users),
            users: node.users.clone(),
            metadata: node.metadata.clone(),
            children: Vec::new(),
        }
    }

    /// Number of records in this subtree.
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(record) = stack.pop() {
            count += 1;
            stack.extend(&record.children);
        }
        count
    }
}
