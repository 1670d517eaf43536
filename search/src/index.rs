//! Cached search index and visible-set computation.

use std::collections::{BTreeSet, HashMap, HashSet};

use orgtree_core::{EngineConfig, NodeId, OrganizationNode};
use orgtree_mutation::ChangeSet;
use orgtree_store::NodeStore;

use crate::query::{fold, Query};

/// Case-insensitive substring test of `query` against a node's searchable text.
///
/// Searches `name`, `description`, `type` and, with `search_users`, each
/// user's `name`, `email` and `title`.
pub fn matches(query: &Query, node: &OrganizationNode, search_users: bool) -> bool {
    searchable(node, search_users).any(|text| query.is_in(text))
}

fn searchable(node: &OrganizationNode, search_users: bool) -> impl Iterator<Item = &str> {
    let own = [Some(node.name.as_str()), node.description.as_deref(), Some(node.kind.as_str())];
    let users = node
        .users
        .iter()
        .filter(move |_| search_users)
        .flat_map(|u| [Some(u.name.as_str()), Some(u.email.as_str()), u.title.as_deref()]);
    own.into_iter().chain(users).flatten()
}

/// Result of a search over the forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    query: Option<Query>,
    /// Directly matching nodes in display order.
    matches: Vec<NodeId>,
    /// Ancestors of every match.
    force_expand: BTreeSet<NodeId>,
    matched: HashSet<NodeId>,
}

impl VisibleSet {
    /// The result of a cleared search.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn matches(&self) -> &[NodeId] {
        &self.matches
    }

    pub fn force_expand(&self) -> &BTreeSet<NodeId> {
        &self.force_expand
    }

    pub fn is_match(&self, id: NodeId) -> bool {
        self.matched.contains(&id)
    }

    pub fn is_forced(&self, id: NodeId) -> bool {
        self.force_expand.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Lowercased haystack per node, kept in step with the forest.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    haystacks: HashMap<NodeId, Vec<String>>,
    min_query_chars: usize,
    search_users: bool,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl SearchIndex {
    /// Create an empty index.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            haystacks: HashMap::new(),
            min_query_chars: config.min_query_chars,
            search_users: config.search_users,
        }
    }

    /// Create an index over every node of `store`.
    pub fn build(store: &NodeStore, config: &EngineConfig) -> Self {
        let mut index = Self::new(config);
        index.rebuild(store);
        index
    }

    /// Drop the cache and index every node again.
    pub fn rebuild(&mut self, store: &NodeStore) {
        self.haystacks = store
            .iter()
            .map(|node| (node.id, self.haystack(node)))
            .collect();
        tracing::debug!(nodes = self.haystacks.len(), "rebuilt search index");
    }

    /// Re-index the nodes touched by `changes`; deleted nodes are dropped.
    pub fn refresh(&mut self, store: &NodeStore, changes: &ChangeSet) {
        let touched = changes.touched();
        for id in &touched {
            match store.get(*id) {
                Some(node) => {
                    let haystack = self.haystack(node);
                    self.haystacks.insert(*id, haystack);
                }
                None => {
                    self.haystacks.remove(id);
                }
            }
        }
        tracing::trace!(touched = touched.len(), "refreshed search index");
    }

    pub fn len(&self) -> usize {
        self.haystacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.haystacks.is_empty()
    }

    pub fn search_users(&self) -> bool {
        self.search_users
    }

    /// Normalize a raw query with this index's minimum length.
    pub fn parse(&self, raw: &str) -> Option<Query> {
        Query::parse(raw, self.min_query_chars)
    }

    /// Returns true if the node matches `query`.
    ///
    /// Nodes missing from the cache are matched against their live fields.
    pub fn is_match(&self, query: &Query, node: &OrganizationNode) -> bool {
        match self.haystacks.get(&node.id) {
            Some(haystack) => haystack.iter().any(|text| text.contains(query.as_str())),
            None => matches(query, node, self.search_users),
        }
    }

    /// Matches for `raw` and the ancestors that must be force-expanded.
    ///
    /// A query that clears the search yields an empty set.
    pub fn compute_visible_set(&self, raw: &str, store: &NodeStore) -> VisibleSet {
        let Some(query) = self.parse(raw) else {
            return VisibleSet::empty();
        };

        let mut matches = Vec::new();
        let mut force_expand = BTreeSet::new();
        for id in store.walk() {
            let Some(node) = store.get(id) else {
                continue;
            };
            if !self.is_match(&query, node) {
                continue;
            }
            matches.push(id);
            for ancestor in store.ancestors(id) {
                // An ancestor already forced has its whole chain forced.
                if !force_expand.insert(ancestor) {
                    break;
                }
            }
        }

        tracing::trace!(
            query = query.as_str(),
            matches = matches.len(),
            forced = force_expand.len(),
            "computed visible set"
        );
        VisibleSet {
            matched: matches.iter().copied().collect(),
            query: Some(query),
            matches,
            force_expand,
        }
    }

    fn haystack(&self, node: &OrganizationNode) -> Vec<String> {
        searchable(node, self.search_users)
            .map(fold)
            .collect()
    }
}
