//! Random forest generation

use orgtree_core::{EngineConfig, NodeId, OrganizationUser, TreeResult, UserId};
use orgtree_mutation::{MutationEngine, NodeDraft};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::ForestConfig;

pub(crate) const UNIT_NAMES: &[&str] = &[
    "Sales", "Support", "Finance", "Platform", "Research", "West", "East", "Ops", "Legal",
];
pub(crate) const UNIT_KINDS: &[&str] = &["division", "department", "team", "squad"];

/// Builds a random forest through the mutation engine, so every generated
/// forest is one the engine itself can reach.
pub struct ForestGenerator {
    config: ForestConfig,
}

impl ForestGenerator {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    /// A user record with fields derived from its id.
    pub fn user(id: u64) -> OrganizationUser {
        let user = OrganizationUser::new(
            UserId::new(id),
            format!("User {id}"),
            format!("user{id}@acme.test"),
            "member",
        );
        if id % 3 == 0 {
            user.with_title("Lead")
        } else {
            user
        }
    }

    /// Generate a fresh engine holding a random forest.
    pub fn generate(&self, engine_config: &EngineConfig, rng: &mut impl Rng) -> TreeResult<MutationEngine> {
        let mut engine = MutationEngine::new(engine_config);
        self.populate(&mut engine, rng)?;
        Ok(engine)
    }

    /// Add random nodes and users to an existing engine.
    pub fn populate(&self, engine: &mut MutationEngine, rng: &mut impl Rng) -> TreeResult<()> {
        let mut ids: Vec<NodeId> = Vec::new();
        for i in 0..self.config.nodes {
            let parent = if i < self.config.roots {
                None
            } else {
                ids.choose(rng).copied()
            };
            let applied = engine.create_child(parent, draft(i, rng))?;
            ids.extend(applied.created_node());
        }

        for id in 1..=self.config.users as u64 {
            if let Some(node) = ids.choose(rng) {
                engine.assign_user(Self::user(id), *node)?;
            }
        }
        Ok(())
    }
}

pub(crate) fn draft(seq: usize, rng: &mut impl Rng) -> NodeDraft {
    let name = UNIT_NAMES.choose(rng).copied().unwrap_or("Unit");
    let kind = UNIT_KINDS.choose(rng).copied().unwrap_or("team");
    NodeDraft::new(format!("{name} {seq}"), kind)
}
