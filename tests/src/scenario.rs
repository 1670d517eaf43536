//! Scenarios, steps and their operations.

use std::collections::HashMap;

use orgtree_access::CapabilitySet;
use orgtree_core::{EngineConfig, NodeId, UserId};
use orgtree_mutation::{ChangeSet, Mutation, NodeDraft};
use orgtree_session::OrgSession;
use orgtree_testkit::{check_invariants, ForestGenerator};

use crate::assertion::{Assertion, AssertionBuilder};
use crate::error::{ScenarioError, ScenarioResult};

/// Node labels bound during a run.
#[derive(Debug, Default)]
pub struct Labels {
    ids: HashMap<String, NodeId>,
}

impl Labels {
    pub fn get(&self, label: &str) -> ScenarioResult<NodeId> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| ScenarioError::unknown_label(label))
    }

    pub fn bind(&mut self, label: impl Into<String>, id: NodeId) {
        self.ids.insert(label.into(), id);
    }

    fn optional(&self, label: Option<&str>) -> ScenarioResult<Option<NodeId>> {
        label.map(|l| self.get(l)).transpose()
    }
}

/// What a step does.
#[derive(Debug, Clone)]
pub enum Op {
    Create {
        label: String,
        parent: Option<String>,
        name: String,
    },
    Rename {
        label: String,
        name: String,
    },
    Move {
        label: String,
        parent: Option<String>,
        index: Option<usize>,
    },
    Delete {
        label: String,
        cascade: bool,
    },
    Assign {
        user: u64,
        label: String,
    },
    Unassign {
        user: u64,
        label: String,
    },
    Undo,
    Search(String),
    /// Apply the inner operation on behalf of an actor.
    As(CapabilitySet, Box<Op>),
}

impl Op {
    /// Create a node named `name` and bind it to `label`.
    pub fn create(label: &str, parent: Option<&str>, name: &str) -> Self {
        Op::Create {
            label: label.to_string(),
            parent: parent.map(str::to_string),
            name: name.to_string(),
        }
    }

    pub fn rename(label: &str, name: &str) -> Self {
        Op::Rename {
            label: label.to_string(),
            name: name.to_string(),
        }
    }

    pub fn move_to(label: &str, parent: Option<&str>) -> Self {
        Op::Move {
            label: label.to_string(),
            parent: parent.map(str::to_string),
            index: None,
        }
    }

    pub fn move_at(label: &str, parent: Option<&str>, index: usize) -> Self {
        Op::Move {
            label: label.to_string(),
            parent: parent.map(str::to_string),
            index: Some(index),
        }
    }

    pub fn delete(label: &str) -> Self {
        Op::Delete {
            label: label.to_string(),
            cascade: false,
        }
    }

    pub fn delete_cascade(label: &str) -> Self {
        Op::Delete {
            label: label.to_string(),
            cascade: true,
        }
    }

    pub fn assign(user: u64, label: &str) -> Self {
        Op::Assign {
            user,
            label: label.to_string(),
        }
    }

    pub fn unassign(user: u64, label: &str) -> Self {
        Op::Unassign {
            user,
            label: label.to_string(),
        }
    }

    pub fn undo() -> Self {
        Op::Undo
    }

    pub fn search(query: &str) -> Self {
        Op::Search(query.to_string())
    }

    /// Run this operation with the capabilities of `actor`.
    pub fn by(self, actor: CapabilitySet) -> Self {
        Op::As(actor, Box::new(self))
    }

    fn to_mutation(&self, labels: &Labels) -> ScenarioResult<Option<Mutation>> {
        let mutation = match self {
            Op::Create { parent, name, .. } => Mutation::create_child(
                labels.optional(parent.as_deref())?,
                NodeDraft::new(name.as_str(), "team"),
            ),
            Op::Rename { label, name } => Mutation::rename(labels.get(label)?, name.as_str()),
            Op::Move {
                label,
                parent,
                index,
            } => Mutation::move_to(labels.get(label)?, labels.optional(parent.as_deref())?, *index),
            Op::Delete { label, cascade } => Mutation::delete(labels.get(label)?, *cascade),
            Op::Assign { user, label } => {
                Mutation::assign(ForestGenerator::user(*user), labels.get(label)?)
            }
            Op::Unassign { user, label } => {
                Mutation::unassign(UserId::new(*user), labels.get(label)?)
            }
            Op::Undo | Op::Search(_) | Op::As(..) => return Ok(None),
        };
        Ok(Some(mutation))
    }

    /// Label to bind to the node this operation creates.
    fn creates(&self) -> Option<&str> {
        match self {
            Op::Create { label, .. } => Some(label),
            Op::As(_, inner) => inner.creates(),
            _ => None,
        }
    }
}

/// A named step and its assertion.
#[derive(Debug)]
pub struct Step {
    pub name: String,
    pub op: Op,
    pub assertion: Assertion,
}

/// An end-to-end scenario against one session.
#[derive(Debug)]
pub struct Scenario {
    name: String,
    config: EngineConfig,
    seed: Option<String>,
    steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: EngineConfig::default(),
            seed: None,
            steps: Vec::new(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from a JSON snapshot. Every node is bound to its lowercased name.
    pub fn seed(mut self, json: impl Into<String>) -> Self {
        self.seed = Some(json.into());
        self
    }

    pub fn step<F>(mut self, name: impl Into<String>, op: Op, f: F) -> Self
    where
        F: FnOnce(AssertionBuilder) -> AssertionBuilder,
    {
        self.steps.push(Step {
            name: name.into(),
            op,
            assertion: f(AssertionBuilder::new()).build(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order, checking forest invariants after each one.
    pub fn run(&self) -> ScenarioResult<()> {
        let mut labels = Labels::default();
        let mut session = match &self.seed {
            Some(json) => OrgSession::from_json(json, self.config.clone())
                .map_err(|e| ScenarioError::Seed(e.to_string()))?,
            None => OrgSession::new(self.config.clone()),
        };
        for node in session.store().iter() {
            labels.bind(node.name.to_lowercase(), node.id);
        }

        for step in &self.steps {
            let result = execute(&mut session, &step.op, &labels)?;
            if let (Ok(changes), Some(label)) = (&result, step.op.creates()) {
                if let Some(id) = changes.created().first() {
                    labels.bind(label, *id);
                }
            }

            step.assertion.verify(&step.name, &result, &session, &labels)?;
            check_invariants(session.store(), &self.config.path_separator)
                .map_err(|message| ScenarioError::invariant(&step.name, message))?;
        }
        Ok(())
    }
}

fn execute(
    session: &mut OrgSession,
    op: &Op,
    labels: &Labels,
) -> ScenarioResult<Result<ChangeSet, String>> {
    let result = match op {
        Op::Undo => session.undo(),
        Op::Search(query) => {
            session.search(query);
            Ok(ChangeSet::new())
        }
        Op::As(actor, inner) => match inner.to_mutation(labels)? {
            Some(mutation) => session.apply_as(*actor, mutation),
            None => return execute(session, inner, labels),
        },
        _ => match op.to_mutation(labels)? {
            Some(mutation) => session.apply(mutation),
            None => Ok(ChangeSet::new()),
        },
    };
    Ok(result.map_err(|e| e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_label_stops_the_run() {
        let scenario = Scenario::new("unknown").step("rename", Op::rename("ghost", "X"), |a| a);

        let err = scenario.run().unwrap_err();

        assert!(matches!(err, ScenarioError::UnknownLabel(label) if label == "ghost"));
    }

    #[test]
    fn test_seed_binds_lowercased_names() {
        let scenario = Scenario::new("seeded")
            .seed(r#"[{"id": 1, "name": "Acme", "type": "company"}]"#)
            .step("rename", Op::rename("acme", "Acme Corp"), |a| a.updated(1));

        assert_eq!(scenario.steps().len(), 1);
        scenario.run().unwrap();
    }
}
