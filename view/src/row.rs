//! Per-node view models and visible rows.

use orgtree_access::{resolve, CapabilitySet, Permissions};
use orgtree_core::{EngineConfig, NodeId, OrganizationNode};
use orgtree_search::{node_highlights, FieldHighlight, VisibleSet};
use orgtree_store::NodeStore;
use serde::Serialize;

use crate::expansion::ExpansionState;

/// Everything a view model is computed from besides the node itself.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub config: &'a EngineConfig,
    pub expansion: &'a ExpansionState,
    pub actor: CapabilitySet,
    /// Active search, if any.
    pub search: Option<&'a VisibleSet>,
}

/// Rendering data for one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: NodeId,
    pub name: String,
    pub path: String,
    pub level: u32,
    /// Short level label such as "L2".
    pub level_badge: String,
    pub direct_users: usize,
    pub total_users: usize,
    pub permissions: Permissions,
    pub expanded: bool,
    /// Expanded only because a search match lies below.
    pub forced: bool,
    pub has_children: bool,
    pub matched: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<FieldHighlight>,
}

impl NodeView {
    pub fn new(node: &OrganizationNode, ctx: &ViewContext<'_>) -> Self {
        let forced = ctx.expansion.is_forced(node.id);
        let matched = ctx.search.is_some_and(|search| search.is_match(node.id));
        let highlights = match ctx.search.and_then(VisibleSet::query) {
            Some(query) if matched => node_highlights(query, node, ctx.config.search_users),
            _ => Vec::new(),
        };

        Self {
            id: node.id,
            name: node.name.clone(),
            path: node.path.clone(),
            level: node.level,
            level_badge: format!("{}{}", ctx.config.level_badge_prefix, node.level),
            direct_users: node.direct_users(),
            total_users: node.total_users,
            permissions: resolve(ctx.actor, node),
            expanded: ctx.expansion.is_expanded(node),
            forced,
            has_children: !node.is_leaf(),
            matched,
            highlights,
        }
    }
}

/// A row of the flattened tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleRow {
    pub depth: usize,
    pub node: NodeView,
}

/// Flatten the forest in display order, descending only into expanded nodes.
pub fn visible_rows(store: &NodeStore, ctx: &ViewContext<'_>) -> Vec<VisibleRow> {
    let mut rows = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = store.roots().iter().rev().map(|id| (*id, 0)).collect();
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = store.get(id) else {
            continue;
        };
        let view = NodeView::new(node, ctx);
        if view.expanded {
            stack.extend(node.children.iter().rev().map(|child| (*child, depth + 1)));
        }
        rows.push(VisibleRow { depth, node: view });
    }
    rows
}
