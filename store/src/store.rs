//! Core node storage implementation.

use crate::index::PlacementIndex;
use orgtree_core::{NodeId, OrganizationNode, OrganizationUser, TreeError, TreeResult, UserId};
use std::collections::{HashMap, HashSet};

/// ID allocator for nodes.
#[derive(Debug, Clone)]
struct IdAllocator {
    next_node_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_node_id: 1 }
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Keep allocation ahead of ids supplied from outside.
    fn observe(&mut self, id: NodeId) {
        if id.raw() >= self.next_node_id {
            self.next_node_id = id.raw() + 1;
        }
    }
}

/// Ids whose derived fields are stale after a structural change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invalidation {
    /// Root of a subtree whose `level` and `path` must be recomputed.
    pub relayout: Option<NodeId>,
    /// Nodes whose `total_users`, and that of every ancestor, must be rolled up.
    pub rollup: Vec<NodeId>,
}

impl Invalidation {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn relayout(id: NodeId) -> Self {
        Self {
            relayout: Some(id),
            rollup: Vec::new(),
        }
    }

    pub fn rollup_from(mut self, id: NodeId) -> Self {
        if !self.rollup.contains(&id) {
            self.rollup.push(id);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.relayout.is_none() && self.rollup.is_empty()
    }

    /// Every stale id, relayout root first.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.relayout.into_iter().collect();
        for id in &self.rollup {
            if !ids.contains(id) {
                ids.push(*id);
            }
        }
        ids
    }
}

/// A removed subtree.
#[derive(Debug, Clone)]
pub struct Removal {
    /// Removed nodes, children before their parents.
    pub nodes: Vec<OrganizationNode>,
    pub invalidation: Invalidation,
}

impl Removal {
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    /// Users whose placement was released with the subtree.
    pub fn released_users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.nodes.iter().flat_map(|n| n.users.iter().map(|u| u.id))
    }
}

/// Outcome of placing a user on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Node the user was on before, if any.
    pub previous: Option<NodeId>,
    pub invalidation: Invalidation,
}

/// Outcome of releasing a user from a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub user: OrganizationUser,
    /// Position the user held in the node's user list.
    pub position: usize,
    pub invalidation: Invalidation,
}

/// Iterator over the ancestors of a node, nearest first.
pub struct Ancestors<'s> {
    store: &'s NodeStore,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.store.nodes.get(&current).and_then(|n| n.parent_id);
        Some(current)
    }
}

/// The in-memory organizational forest.
#[derive(Debug, Clone)]
pub struct NodeStore {
    /// Node storage
    nodes: HashMap<NodeId, OrganizationNode>,
    /// Roots in display order
    roots: Vec<NodeId>,
    /// Ids of deleted nodes
    retired: HashSet<NodeId>,
    /// User placement index
    placements: PlacementIndex,
    /// ID allocator
    id_alloc: IdAllocator,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            retired: HashSet::new(),
            placements: PlacementIndex::new(),
            id_alloc: IdAllocator::new(),
        }
    }

    // ==================== Node Operations ====================

    /// Allocate an id that is neither live nor retired.
    pub fn allocate_id(&mut self) -> NodeId {
        self.id_alloc.alloc_node_id()
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&OrganizationNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// Structural fields (`parent_id`, `children`, `users`) must only be changed
    /// through the store's own methods.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut OrganizationNode> {
        self.nodes.get_mut(&id)
    }

    /// Get a node or fail with `NodeNotFound`.
    pub fn require(&self, id: NodeId) -> TreeResult<&OrganizationNode> {
        self.nodes.get(&id).ok_or(TreeError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns true if `id` was deleted from this store.
    pub fn is_retired(&self, id: NodeId) -> bool {
        self.retired.contains(&id)
    }

    /// Insert a detached node under `parent_id` (or as a root).
    ///
    /// Any `children` carried by `node` are ignored; attach them with further
    /// inserts. Users carried by `node` are placed on it.
    pub fn insert(
        &mut self,
        mut node: OrganizationNode,
        parent_id: Option<NodeId>,
        index: Option<usize>,
    ) -> TreeResult<Invalidation> {
        let id = node.id;
        if self.nodes.contains_key(&id) || self.retired.contains(&id) {
            return Err(TreeError::duplicate_node(id));
        }
        if let Some(parent) = parent_id {
            self.require(parent)?;
        }
        let mut seen = HashSet::new();
        for user in &node.users {
            if !seen.insert(user.id) || self.placements.contains(user.id) {
                return Err(TreeError::duplicate_user(user.id));
            }
        }

        node.parent_id = parent_id;
        node.children.clear();
        self.id_alloc.observe(id);
        for user in &node.users {
            self.placements.insert(user.id, id);
        }
        self.nodes.insert(id, node);
        self.attach(id, parent_id, index);

        Ok(Invalidation::relayout(id).rollup_from(id))
    }

    /// Remove a node together with its entire subtree.
    pub fn remove(&mut self, id: NodeId) -> TreeResult<Removal> {
        let parent_id = self.require(id)?.parent_id;
        let order = self.subtree(id);
        self.detach(id, parent_id);

        let mut nodes = Vec::with_capacity(order.len());
        for node_id in order.into_iter().rev() {
            if let Some(node) = self.nodes.remove(&node_id) {
                for user in &node.users {
                    self.placements.remove(user.id);
                }
                self.retired.insert(node_id);
                nodes.push(node);
            }
        }
        tracing::trace!(node = %id, removed = nodes.len(), "removed subtree");

        let invalidation = match parent_id {
            Some(parent) => Invalidation::none().rollup_from(parent),
            None => Invalidation::none(),
        };
        Ok(Removal {
            nodes,
            invalidation,
        })
    }

    /// Move a node (and its subtree) under `new_parent`, or promote it to a root.
    ///
    /// `index` is clamped to the sibling count and applies after the node has
    /// been detached, so it also reorders within the same parent.
    pub fn reparent(
        &mut self,
        id: NodeId,
        new_parent: Option<NodeId>,
        index: Option<usize>,
    ) -> TreeResult<Invalidation> {
        let old_parent = self.require(id)?.parent_id;
        if let Some(target) = new_parent {
            self.require(target)?;
            if target == id || self.is_ancestor(id, target) {
                return Err(TreeError::cycle(id, target));
            }
        }

        self.detach(id, old_parent);
        self.attach(id, new_parent, index);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent_id = new_parent;
        }
        tracing::trace!(node = %id, from = ?old_parent, to = ?new_parent, "reparented");

        let mut invalidation = Invalidation::relayout(id);
        for parent in old_parent.into_iter().chain(new_parent) {
            invalidation = invalidation.rollup_from(parent);
        }
        Ok(invalidation)
    }

    /// Children of `parent_id` in display order, or the roots when `None`.
    pub fn list(&self, parent_id: Option<NodeId>) -> TreeResult<&[NodeId]> {
        match parent_id {
            Some(parent) => Ok(self.require(parent)?.children.as_slice()),
            None => Ok(self.roots.as_slice()),
        }
    }

    /// Position of a node among its siblings.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        let parent_id = self.nodes.get(&id)?.parent_id;
        self.list(parent_id)
            .ok()?
            .iter()
            .position(|sibling| *sibling == id)
    }

    fn siblings_mut(&mut self, parent_id: Option<NodeId>) -> Option<&mut Vec<NodeId>> {
        match parent_id {
            Some(parent) => self.nodes.get_mut(&parent).map(|n| &mut n.children),
            None => Some(&mut self.roots),
        }
    }

    fn attach(&mut self, id: NodeId, parent_id: Option<NodeId>, index: Option<usize>) {
        if let Some(siblings) = self.siblings_mut(parent_id) {
            let at = index.map_or(siblings.len(), |i| i.min(siblings.len()));
            siblings.insert(at, id);
        }
    }

    fn detach(&mut self, id: NodeId, parent_id: Option<NodeId>) {
        if let Some(siblings) = self.siblings_mut(parent_id) {
            siblings.retain(|sibling| *sibling != id);
        }
    }

    // ==================== Traversal ====================

    /// Root ids in display order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            store: self,
            next: self.nodes.get(&id).and_then(|n| n.parent_id),
        }
    }

    /// Returns true if `ancestor` lies on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// `id` followed by all of its descendants in display (pre-)order.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                order.push(current);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Descendants of `id` in display order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = self.subtree(id);
        if !order.is_empty() {
            order.remove(0);
        }
        order
    }

    /// Every node of the forest in display order.
    pub fn walk(&self) -> Vec<NodeId> {
        self.roots.iter().flat_map(|root| self.subtree(*root)).collect()
    }

    // ==================== User Placement ====================

    /// Assign a user to a node, detaching it from any prior node.
    pub fn place_user(
        &mut self,
        user: OrganizationUser,
        node_id: NodeId,
    ) -> TreeResult<Placement> {
        self.place_user_at(user, node_id, None)
    }

    /// Like [`NodeStore::place_user`], inserting at `index` in the node's user list.
    pub fn place_user_at(
        &mut self,
        user: OrganizationUser,
        node_id: NodeId,
        index: Option<usize>,
    ) -> TreeResult<Placement> {
        self.require(node_id)?;
        let user_id = user.id;
        let previous = self.placements.get(user_id);

        if let Some(prev) = previous {
            if let Some(node) = self.nodes.get_mut(&prev) {
                node.users.retain(|u| u.id != user_id);
            }
        }
        if let Some(node) = self.nodes.get_mut(&node_id) {
            let at = index.map_or(node.users.len(), |i| i.min(node.users.len()));
            node.users.insert(at, user);
        }
        self.placements.insert(user_id, node_id);

        let mut invalidation = Invalidation::none();
        for id in previous.into_iter().chain(Some(node_id)) {
            invalidation = invalidation.rollup_from(id);
        }
        Ok(Placement {
            previous,
            invalidation,
        })
    }

    /// Unassign a user from `node_id`.
    ///
    /// Fails with `NotAssigned` unless the user is currently on that node.
    pub fn release_user(&mut self, user_id: UserId, node_id: NodeId) -> TreeResult<Release> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or_else(|| TreeError::not_assigned(user_id, node_id))?;
        let position = node
            .users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| TreeError::not_assigned(user_id, node_id))?;
        let user = node.users.remove(position);
        self.placements.remove(user_id);

        Ok(Release {
            user,
            position,
            invalidation: Invalidation::none().rollup_from(node_id),
        })
    }

    /// Node a user is currently assigned to.
    pub fn user_location(&self, user_id: UserId) -> Option<NodeId> {
        self.placements.get(user_id)
    }

    /// Look up a user record through its placement.
    pub fn find_user(&self, user_id: UserId) -> Option<&OrganizationUser> {
        let node_id = self.placements.get(user_id)?;
        self.nodes.get(&node_id)?.user(user_id)
    }

    // ==================== Statistics ====================

    /// Get the number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of placed users.
    pub fn user_count(&self) -> usize {
        self.placements.len()
    }

    /// Iterate over all nodes in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &OrganizationNode> + '_ {
        self.nodes.values()
    }

    /// Get all node IDs in arbitrary order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }
}
