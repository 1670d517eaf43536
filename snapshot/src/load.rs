//! Snapshot load and export.

use orgtree_core::{EngineConfig, NodeId, OrganizationNode};
use orgtree_mutation::MutationEngine;
use orgtree_store::NodeStore;

use crate::error::SnapshotResult;
use crate::record::NodeRecord;

/// Derived fields as the input claimed them.
struct Declared {
    id: NodeId,
    level: Option<u32>,
    path: Option<String>,
    total_users: Option<usize>,
}

impl Declared {
    fn disagrees_with(&self, node: &OrganizationNode) -> bool {
        self.level.is_some_and(|level| level != node.level)
            || self.path.as_ref().is_some_and(|path| *path != node.path)
            || self.total_users.is_some_and(|total| total != node.total_users)
    }
}

/// Parse a JSON array of root records.
pub fn from_json(source: &str) -> SnapshotResult<Vec<NodeRecord>> {
    Ok(serde_json::from_str(source)?)
}

/// Insert every record into a fresh store, parents before children.
///
/// Derived fields are left unset.
pub fn load_store(roots: Vec<NodeRecord>) -> SnapshotResult<NodeStore> {
    let (store, _) = insert_all(roots)?;
    Ok(store)
}

/// Load records into an engine with every derived field recomputed.
pub fn load_engine(roots: Vec<NodeRecord>, config: &EngineConfig) -> SnapshotResult<MutationEngine> {
    let (store, declared) = insert_all(roots)?;
    let engine = MutationEngine::with_store(store, config);

    let stale = declared
        .iter()
        .filter(|d| engine.store().get(d.id).is_some_and(|node| d.disagrees_with(node)))
        .count();
    if stale > 0 {
        tracing::warn!(stale, "snapshot carried stale derived fields, recomputed");
    }
    tracing::debug!(
        nodes = engine.store().len(),
        users = engine.store().user_count(),
        "loaded snapshot"
    );
    Ok(engine)
}

fn insert_all(roots: Vec<NodeRecord>) -> SnapshotResult<(NodeStore, Vec<Declared>)> {
    let mut store = NodeStore::new();
    let mut declared = Vec::new();
    let mut stack: Vec<(NodeRecord, Option<NodeId>)> =
        roots.into_iter().rev().map(|record| (record, None)).collect();

    while let Some((mut record, parent)) = stack.pop() {
        declared.push(Declared {
            id: record.id,
            level: record.level,
            path: record.path.take(),
            total_users: record.total_users,
        });
        let (node, children) = record.into_parts();
        let id = node.id;
        store.insert(node, parent, None)?;
        stack.extend(children.into_iter().rev().map(|child| (child, Some(id))));
    }
    Ok((store, declared))
}

/// Export the forest as nested records, derived fields included.
pub fn export_forest(store: &NodeStore) -> Vec<NodeRecord> {
    let mut roots = Vec::new();
    // A record under construction and the children it has yet to receive.
    let mut stack: Vec<(NodeRecord, std::slice::Iter<'_, NodeId>)> = Vec::new();
    let mut pending = store.roots().iter();

    loop {
        let next = match stack.last_mut() {
            Some((_, children)) => children.next(),
            None => pending.next(),
        };
        match next {
            Some(id) => {
                if let Some(node) = store.get(*id) {
                    stack.push((NodeRecord::from_node(node), node.children.iter()));
                }
            }
            None => match stack.pop() {
                Some((record, _)) => match stack.last_mut() {
                    Some((parent, _)) => parent.children.push(record),
                    None => roots.push(record),
                },
                None => break,
            },
        }
    }
    roots
}

/// Export the forest as pretty-printed JSON.
pub fn to_json(store: &NodeStore) -> SnapshotResult<String> {
    Ok(serde_json::to_string_pretty(&export_forest(store))?)
}
