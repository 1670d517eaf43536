//! Assertion types and builders for verifying step results.

use orgtree_core::OrganizationNode;
use orgtree_mutation::ChangeSet;
use orgtree_session::OrgSession;

use crate::error::{ScenarioError, ScenarioResult};
use crate::scenario::Labels;

/// A complete assertion for a step result.
#[derive(Debug, Default)]
pub struct Assertion {
    // Change-set assertions
    pub created: Option<usize>,
    pub updated: Option<usize>,
    pub deleted: Option<usize>,
    pub reassigned: Option<usize>,
    pub noop: bool,

    // Forest state after the step, by label
    pub paths: Vec<(String, String)>,
    pub levels: Vec<(String, u32)>,
    pub totals: Vec<(String, usize)>,
    pub children: Vec<(String, Vec<String>)>,
    pub gone: Vec<String>,

    // Search state after the step
    pub matches: Option<Vec<String>>,
    pub forced: Vec<String>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,
}

impl Assertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the assertion against a step result and the session it left behind.
    pub fn verify(
        &self,
        step: &str,
        result: &Result<ChangeSet, String>,
        session: &OrgSession,
        labels: &Labels,
    ) -> ScenarioResult<()> {
        // Check error expectations first
        if let Some(ref expected) = self.error {
            match result {
                Err(msg) if msg.contains(expected.as_str()) => {}
                Err(msg) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error containing '{}', got: {}", expected, msg),
                    ))
                }
                Ok(_) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error containing '{}', but step succeeded", expected),
                    ))
                }
            }
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ScenarioError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            match result {
                Err(msg) if re.is_match(msg) => {}
                Err(msg) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error matching '{}', got: {}", pattern, msg),
                    ))
                }
                Ok(_) => {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected error matching '{}', but step succeeded", pattern),
                    ))
                }
            }
        }

        match result {
            Ok(changes) => self.verify_changes(step, changes)?,
            Err(msg) if self.error.is_none() && self.error_pattern.is_none() => {
                return Err(ScenarioError::assertion_failed(step, format!("step failed: {}", msg)));
            }
            // A failed step still leaves a forest to inspect.
            Err(_) => {}
        }

        self.verify_forest(step, session, labels)?;
        self.verify_search(step, session, labels)
    }

    fn verify_changes(&self, step: &str, changes: &ChangeSet) -> ScenarioResult<()> {
        if self.noop && !changes.is_empty() {
            return Err(ScenarioError::assertion_failed(
                step,
                format!("expected no changes, got {:?}", changes),
            ));
        }

        let counts = [
            ("created", self.created, changes.created().len()),
            ("updated", self.updated, changes.updated().len()),
            ("deleted", self.deleted, changes.deleted().len()),
            ("reassigned", self.reassigned, changes.reassigned_users().len()),
        ];
        for (what, expected, actual) in counts {
            if let Some(expected) = expected {
                if expected != actual {
                    return Err(ScenarioError::assertion_failed(
                        step,
                        format!("expected {} {}, got {}", expected, what, actual),
                    ));
                }
            }
        }
        Ok(())
    }

    fn verify_forest(&self, step: &str, session: &OrgSession, labels: &Labels) -> ScenarioResult<()> {
        let store = session.store();
        let node = |label: &str| lookup(step, session, labels, label);

        for (label, expected) in &self.paths {
            let actual = &node(label)?.path;
            if actual != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("path of '{}':\n  expected: {}\n  actual:   {}", label, expected, actual),
                ));
            }
        }

        for (label, expected) in &self.levels {
            let actual = node(label)?.level;
            if actual != *expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected '{}' at level {}, got {}", label, expected, actual),
                ));
            }
        }

        for (label, expected) in &self.totals {
            let actual = node(label)?.total_users;
            if actual != *expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected {} users under '{}', got {}", expected, label, actual),
                ));
            }
        }

        for (label, expected) in &self.children {
            let expected = expected
                .iter()
                .map(|child| labels.get(child))
                .collect::<ScenarioResult<Vec<_>>>()?;
            let actual = &node(label)?.children;
            if *actual != expected {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("children of '{}':\n  expected: {:?}\n  actual:   {:?}", label, expected, actual),
                ));
            }
        }

        for label in &self.gone {
            if store.contains(labels.get(label)?) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected '{}' to be deleted", label),
                ));
            }
        }
        Ok(())
    }

    fn verify_search(&self, step: &str, session: &OrgSession, labels: &Labels) -> ScenarioResult<()> {
        let visible = session.visible_set();

        if let Some(ref expected) = self.matches {
            let expected = expected
                .iter()
                .map(|label| labels.get(label))
                .collect::<ScenarioResult<Vec<_>>>()?;
            if visible.matches() != expected.as_slice() {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!(
                        "search matches:\n  expected: {:?}\n  actual:   {:?}",
                        expected,
                        visible.matches()
                    ),
                ));
            }
        }

        for label in &self.forced {
            if !session.expansion().is_forced(labels.get(label)?) {
                return Err(ScenarioError::assertion_failed(
                    step,
                    format!("expected '{}' to be force-expanded", label),
                ));
            }
        }
        Ok(())
    }
}

fn lookup<'s>(
    step: &str,
    session: &'s OrgSession,
    labels: &Labels,
    label: &str,
) -> ScenarioResult<&'s OrganizationNode> {
    let id = labels.get(label)?;
    session.store().get(id).ok_or_else(|| {
        ScenarioError::assertion_failed(step, format!("node '{}' no longer exists", label))
    })
}

/// Builder for fluent assertion construction.
#[derive(Debug, Default)]
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Assertion {
        self.assertion
    }

    /// Expect exactly n nodes created.
    pub fn created(mut self, n: usize) -> Self {
        self.assertion.created = Some(n);
        self
    }

    /// Expect exactly n nodes updated.
    pub fn updated(mut self, n: usize) -> Self {
        self.assertion.updated = Some(n);
        self
    }

    /// Expect exactly n nodes deleted.
    pub fn deleted(mut self, n: usize) -> Self {
        self.assertion.deleted = Some(n);
        self
    }

    /// Expect exactly n users assigned, moved or unassigned.
    pub fn reassigned(mut self, n: usize) -> Self {
        self.assertion.reassigned = Some(n);
        self
    }

    /// Expect an empty change set.
    pub fn noop(mut self) -> Self {
        self.assertion.noop = true;
        self
    }

    pub fn path(mut self, label: &str, path: &str) -> Self {
        self.assertion.paths.push((label.to_string(), path.to_string()));
        self
    }

    pub fn level(mut self, label: &str, level: u32) -> Self {
        self.assertion.levels.push((label.to_string(), level));
        self
    }

    /// Expect `total_users` of a node.
    pub fn total(mut self, label: &str, total: usize) -> Self {
        self.assertion.totals.push((label.to_string(), total));
        self
    }

    /// Expect a node's children, in order.
    pub fn children(mut self, label: &str, children: &[&str]) -> Self {
        self.assertion.children.push((
            label.to_string(),
            children.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    pub fn gone(mut self, label: &str) -> Self {
        self.assertion.gone.push(label.to_string());
        self
    }

    /// Expect the active search to match exactly these nodes, in display order.
    pub fn matches(mut self, labels: &[&str]) -> Self {
        self.assertion.matches = Some(labels.iter().map(|l| l.to_string()).collect());
        self
    }

    pub fn forced(mut self, labels: &[&str]) -> Self {
        self.assertion
            .forced
            .extend(labels.iter().map(|l| l.to_string()));
        self
    }

    /// Expect an error containing the given substring.
    pub fn error(mut self, substring: &str) -> Self {
        self.assertion.error = Some(substring.to_string());
        self
    }

    /// Expect an error matching a regex.
    pub fn error_matches(mut self, pattern: &str) -> Self {
        self.assertion.error_pattern = Some(pattern.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgtree_core::{EngineConfig, NodeId};
    use orgtree_mutation::Change;

    fn created(id: u64) -> ChangeSet {
        let mut changes = ChangeSet::new();
        changes.push(Change::NodeCreated {
            id: NodeId::new(id),
            parent: None,
        });
        changes
    }

    #[test]
    fn test_count_mismatch_fails() {
        let session = OrgSession::new(EngineConfig::default());
        let assertion = AssertionBuilder::new().created(2).build();

        let err = assertion
            .verify("step", &Ok(created(1)), &session, &Labels::default())
            .unwrap_err();

        assert!(err.to_string().contains("expected 2 created, got 1"));
    }

    #[test]
    fn test_expected_error_on_success_fails() {
        let session = OrgSession::new(EngineConfig::default());
        let assertion = AssertionBuilder::new().error("not found").build();

        assert!(assertion
            .verify("step", &Ok(ChangeSet::new()), &session, &Labels::default())
            .is_err());
    }

    #[test]
    fn test_error_pattern_matches() {
        let session = OrgSession::new(EngineConfig::default());
        let assertion = AssertionBuilder::new().error_matches(r"^Node not found: n\d+$").build();

        assertion
            .verify("step", &Err("Node not found: n7".to_string()), &session, &Labels::default())
            .unwrap();
    }
}
