//! orgtree Journal
//!
//! Bounded log of applied mutations.
//!
//! Responsibilities:
//! - Record each applied mutation with its change set and inverse
//! - Hand back the most recent reversible record for undo
//! - Evict the oldest records past the configured capacity

mod error;
mod journal;

pub use error::{JournalError, JournalResult};
pub use journal::{JournalRecord, MemoryJournal, Seq};
