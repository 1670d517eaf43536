//! orgtree Mutation
//!
//! Validated write operations on the organizational forest.
//!
//! Responsibilities:
//! - Check every precondition before touching the store
//! - Apply the structural change and refresh derived fields
//! - Describe what changed as an ordered [`ChangeSet`]
//! - Produce the compensating inverse of each applied mutation
//!
//! # Module Structure
//!
//! - `engine` - MutationEngine that owns the store and dispatches mutations
//! - `mutation` - The `Mutation` enum and its payloads (drafts and patches)
//! - `ops/` - Individual operation implementations
//! - `result` - Change sets and the `Applied` outcome

mod engine;
mod mutation;
mod ops;
mod result;

pub use engine::MutationEngine;
pub use mutation::{Mutation, NodeDraft, NodePatch};
pub use result::{Applied, Change, ChangeSet, NodeField};
