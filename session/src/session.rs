//! Session manager.

use orgtree_access::{authorize, authorize_root, resolve, Action, CapabilitySet, Permissions};
use orgtree_core::{EngineConfig, NodeId};
use orgtree_journal::{JournalError, MemoryJournal};
use orgtree_mutation::{Applied, ChangeSet, Mutation, MutationEngine};
use orgtree_search::{SearchIndex, VisibleSet};
use orgtree_snapshot::{export_forest, from_json, load_engine, NodeRecord};
use orgtree_store::NodeStore;
use orgtree_view::{visible_rows, ExpansionState, NodeView, ViewContext, VisibleRow};

use crate::error::SessionResult;

/// A tree-view session.
///
/// Owns the forest together with everything that must follow it: the
/// journal, the search index, the active search and the expansion state.
#[derive(Debug, Clone)]
pub struct OrgSession {
    config: EngineConfig,
    engine: MutationEngine,
    journal: MemoryJournal,
    index: SearchIndex,
    expansion: ExpansionState,
    /// Raw text of the active search, empty when none.
    query: String,
    visible: VisibleSet,
}

impl OrgSession {
    /// Create a session over an empty forest.
    pub fn new(config: EngineConfig) -> Self {
        let engine = MutationEngine::new(&config);
        Self::with_engine(engine, config)
    }

    /// Create a session over a snapshot.
    pub fn from_records(roots: Vec<NodeRecord>, config: EngineConfig) -> SessionResult<Self> {
        let engine = load_engine(roots, &config)?;
        Ok(Self::with_engine(engine, config))
    }

    /// Create a session over a JSON snapshot.
    pub fn from_json(source: &str, config: EngineConfig) -> SessionResult<Self> {
        Self::from_records(from_json(source)?, config)
    }

    fn with_engine(engine: MutationEngine, config: EngineConfig) -> Self {
        Self {
            journal: MemoryJournal::new(config.journal_capacity),
            index: SearchIndex::build(engine.store(), &config),
            expansion: ExpansionState::new(&config),
            query: String::new(),
            visible: VisibleSet::empty(),
            engine,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &NodeStore {
        self.engine.store()
    }

    pub fn journal(&self) -> &MemoryJournal {
        &self.journal
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn expansion_mut(&mut self) -> &mut ExpansionState {
        &mut self.expansion
    }

    // ==================== Mutations ====================

    /// Apply a mutation without permission checks and journal it.
    pub fn apply(&mut self, mutation: Mutation) -> SessionResult<ChangeSet> {
        let applied = self.engine.apply(mutation.clone())?;
        let changes = applied.changes.clone();
        self.follow(&changes);
        if !applied.is_noop() {
            self.journal.record(mutation, applied);
        }
        Ok(changes)
    }

    /// Apply a mutation on behalf of `actor`.
    ///
    /// Fails with an access error, before anything changes, unless the
    /// actor's capabilities allow it.
    pub fn apply_as(&mut self, actor: CapabilitySet, mutation: Mutation) -> SessionResult<ChangeSet> {
        self.authorize(actor, &mutation)?;
        self.apply(mutation)
    }

    /// Apply a create and return the new node's id.
    pub fn create(&mut self, mutation: Mutation) -> SessionResult<Option<NodeId>> {
        let changes = self.apply(mutation)?;
        Ok(changes.created().first().copied())
    }

    fn authorize(&self, actor: CapabilitySet, mutation: &Mutation) -> SessionResult<()> {
        let store = self.engine.store();
        let (action, target) = match mutation {
            Mutation::CreateChild { parent: None, .. } => {
                return Ok(authorize_root(actor, Action::Create)?);
            }
            Mutation::CreateChild {
                parent: Some(parent),
                ..
            } => (Action::Create, *parent),
            Mutation::Edit { id, .. } => (Action::Edit, *id),
            Mutation::Move { id, .. } => (Action::Move, *id),
            Mutation::Delete { id, .. } => (Action::Delete, *id),
            Mutation::AssignUser { node, .. } | Mutation::UnassignUser { node, .. } => {
                (Action::Assign, *node)
            }
        };
        authorize(actor, action, store.require(target)?)?;
        Ok(())
    }

    /// Undo the most recent journaled mutation by applying its inverse.
    ///
    /// The inverse itself is not journaled.
    pub fn undo(&mut self) -> SessionResult<ChangeSet> {
        let record = self.journal.pop_undo()?;
        let inverse = record
            .inverse
            .ok_or_else(|| JournalError::irreversible(record.seq, record.mutation.name()))?;

        let Applied { changes, .. } = self.engine.apply(inverse)?;
        self.follow(&changes);
        tracing::debug!(seq = record.seq, op = record.mutation.name(), "undid mutation");
        Ok(changes)
    }

    pub fn can_undo(&self) -> bool {
        self.journal.can_undo()
    }

    /// Bring the index, the active search and expansion state up to date.
    fn follow(&mut self, changes: &ChangeSet) {
        if changes.is_empty() {
            return;
        }
        let store = self.engine.store();
        self.index.refresh(store, changes);
        self.expansion.forget(changes.deleted());
        if !self.query.is_empty() {
            self.visible = self.index.compute_visible_set(&self.query, store);
            self.expansion.apply_search(&self.visible);
        }
    }

    // ==================== Search ====================

    /// Run a search and force-expand the ancestors of every match.
    ///
    /// A query that is blank or too short clears the search.
    pub fn search(&mut self, raw: &str) -> &VisibleSet {
        if self.index.parse(raw).is_none() {
            self.clear_search();
            return &self.visible;
        }
        self.query = raw.to_string();
        self.visible = self.index.compute_visible_set(raw, self.engine.store());
        self.expansion.apply_search(&self.visible);
        &self.visible
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
        self.visible = VisibleSet::empty();
        self.expansion.clear_search();
    }

    /// The active search result.
    pub fn visible_set(&self) -> &VisibleSet {
        &self.visible
    }

    // ==================== View ====================

    /// Flip the user's expansion choice for a node.
    pub fn toggle(&mut self, id: NodeId) -> SessionResult<bool> {
        let node = self.engine.store().require(id)?;
        Ok(self.expansion.toggle(node))
    }

    pub fn permissions(&self, actor: CapabilitySet, id: NodeId) -> SessionResult<Permissions> {
        Ok(resolve(actor, self.engine.store().require(id)?))
    }

    pub fn view(&self, actor: CapabilitySet, id: NodeId) -> SessionResult<NodeView> {
        let node = self.engine.store().require(id)?;
        Ok(NodeView::new(node, &self.context(actor)))
    }

    /// Visible rows as `actor` sees them.
    pub fn rows(&self, actor: CapabilitySet) -> Vec<VisibleRow> {
        visible_rows(self.engine.store(), &self.context(actor))
    }

    fn context(&self, actor: CapabilitySet) -> ViewContext<'_> {
        ViewContext {
            config: &self.config,
            expansion: &self.expansion,
            actor,
            search: (!self.query.is_empty()).then_some(&self.visible),
        }
    }

    /// Export the forest as nested records.
    pub fn export(&self) -> Vec<NodeRecord> {
        export_forest(self.engine.store())
    }
}
