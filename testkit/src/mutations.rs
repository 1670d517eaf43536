//! Random mutation sequences

use orgtree_core::{NodeId, UserId};
use orgtree_mutation::{Mutation, NodePatch};
use orgtree_store::NodeStore;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::forest::{draft, ForestGenerator, UNIT_NAMES};

/// Generates mutations against the current state of a forest.
///
/// Roughly a third of the output is expected to fail: cycles, deletes of
/// populated nodes without cascade, unassigns from the wrong node.
pub struct MutationGenerator {
    next_user: u64,
    created: usize,
}

impl MutationGenerator {
    /// `first_user` must be above every user id already placed.
    pub fn new(first_user: u64) -> Self {
        Self {
            next_user: first_user,
            created: 0,
        }
    }

    /// Generate the next mutation for `store`.
    pub fn next(&mut self, store: &NodeStore, rng: &mut impl Rng) -> Mutation {
        let nodes = store.walk();
        let Some(&target) = nodes.choose(rng) else {
            return self.create(None, rng);
        };

        match rng.gen_range(0..7) {
            0 => {
                let parent = if rng.gen_bool(0.1) { None } else { Some(target) };
                self.create(parent, rng)
            }
            1 => {
                // Renaming to an existing name is allowed and sometimes a no-op.
                let current = store.get(target).map(|n| n.name.clone());
                let name = match current {
                    Some(name) if rng.gen_bool(0.2) => name,
                    _ => UNIT_NAMES.choose(rng).copied().unwrap_or("Unit").to_string(),
                };
                Mutation::rename(target, name)
            }
            2 => {
                let parent = if rng.gen_bool(0.2) {
                    None
                } else {
                    nodes.choose(rng).copied()
                };
                let index = rng.gen_bool(0.5).then(|| rng.gen_range(0..4));
                Mutation::move_to(target, parent, index)
            }
            3 => Mutation::delete(target, rng.gen_bool(0.3)),
            4 => {
                let placed = placed_users(store);
                let user = match placed.choose(rng) {
                    Some((user, _)) if rng.gen_bool(0.5) => *user,
                    _ => self.fresh_user(),
                };
                let record = ForestGenerator::user(user.raw());
                let index = rng.gen_bool(0.3).then(|| rng.gen_range(0..3));
                Mutation::AssignUser {
                    user: record,
                    node: target,
                    index,
                }
            }
            5 => match placed_users(store).choose(rng) {
                Some((user, node)) if rng.gen_bool(0.8) => Mutation::unassign(*user, *node),
                Some((user, _)) => Mutation::unassign(*user, target),
                None => Mutation::unassign(self.fresh_user(), target),
            },
            _ => {
                let description = rng.gen_bool(0.7).then(|| format!("Unit {}", rng.gen_range(0..100)));
                Mutation::edit(target, NodePatch::new().description(description))
            }
        }
    }

    fn create(&mut self, parent: Option<NodeId>, rng: &mut impl Rng) -> Mutation {
        self.created += 1;
        Mutation::create_child(parent, draft(1000 + self.created, rng))
    }

    fn fresh_user(&mut self) -> UserId {
        let id = UserId::new(self.next_user);
        self.next_user += 1;
        id
    }
}

/// Every placed user with its node, sorted for reproducibility.
fn placed_users(store: &NodeStore) -> Vec<(UserId, NodeId)> {
    let mut placed: Vec<_> = store
        .iter()
        .flat_map(|node| node.users.iter().map(move |u| (u.id, node.id)))
        .collect();
    placed.sort();
    placed
}
