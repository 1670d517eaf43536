//! In-memory mutation journal.

use std::collections::VecDeque;

use orgtree_mutation::{Applied, ChangeSet, Mutation};

use crate::error::{JournalError, JournalResult};

/// Sequence number of a journal record.
pub type Seq = u64;

/// A journaled mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalRecord {
    pub seq: Seq,
    pub mutation: Mutation,
    pub changes: ChangeSet,
    /// Compensating mutation, if the record can be undone.
    pub inverse: Option<Mutation>,
}

impl JournalRecord {
    pub fn new(seq: Seq, mutation: Mutation, applied: Applied) -> Self {
        Self {
            seq,
            mutation,
            changes: applied.changes,
            inverse: applied.inverse,
        }
    }

    pub fn is_reversible(&self) -> bool {
        self.inverse.is_some()
    }
}

/// Bounded journal. The oldest record is evicted once `capacity` is reached.
#[derive(Debug, Clone)]
pub struct MemoryJournal {
    /// Records, oldest first.
    records: VecDeque<JournalRecord>,
    /// Next sequence number to assign.
    next_seq: Seq,
    capacity: usize,
}

impl Default for MemoryJournal {
    fn default() -> Self {
        Self::new(128)
    }
}

impl MemoryJournal {
    /// Create an empty journal keeping at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(1024)),
            next_seq: 1,
            capacity,
        }
    }

    /// Append an applied mutation. Returns its sequence number.
    pub fn record(&mut self, mutation: Mutation, applied: Applied) -> Seq {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.capacity == 0 {
            return seq;
        }

        while self.records.len() >= self.capacity {
            if let Some(evicted) = self.records.pop_front() {
                tracing::trace!(seq = evicted.seq, "evicted journal record");
            }
        }
        self.records.push_back(JournalRecord::new(seq, mutation, applied));
        seq
    }

    /// Remove and return the most recent record for undo.
    ///
    /// An irreversible record stays in place: nothing before it can be
    /// restored either.
    pub fn pop_undo(&mut self) -> JournalResult<JournalRecord> {
        let last = self.records.back().ok_or(JournalError::NothingToUndo)?;
        if !last.is_reversible() {
            return Err(JournalError::irreversible(last.seq, last.mutation.name()));
        }
        self.records.pop_back().ok_or(JournalError::NothingToUndo)
    }

    /// Returns true if the next `pop_undo` would succeed.
    pub fn can_undo(&self) -> bool {
        self.records.back().is_some_and(JournalRecord::is_reversible)
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&JournalRecord> {
        self.records.back()
    }

    /// Get a record by sequence number.
    pub fn get(&self, seq: Seq) -> Option<&JournalRecord> {
        self.records.iter().find(|r| r.seq == seq)
    }

    /// Records, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &JournalRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
