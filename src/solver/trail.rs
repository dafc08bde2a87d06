use crate::{
    error::{Error, Result},
    solver::{engine::VariableId, store::DomainStore},
};

/// Identifies an open trail level. Returned by [`Trail::push`] and consumed
/// by [`Trail::pop_through`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CheckpointId(usize);

/// A trail of reversible domain removals, organized in nested levels.
///
/// Pushing a checkpoint opens a new level; every actual removal performed
/// while a level is open is appended to it. Popping replays the innermost
/// level's removals in reverse chronological order, re-inserting each value,
/// so the domains end up bit-for-bit identical to their state at push time.
/// Removals made with no level open are the committed baseline and are never
/// undone.
///
/// Levels nest strictly LIFO; rollback cost is proportional to the removals
/// recorded, not to the number of variables.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    entries: Vec<(VariableId, i64)>,
    levels: Vec<usize>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new level. O(1).
    pub fn push(&mut self) -> CheckpointId {
        self.levels.push(self.entries.len());
        CheckpointId(self.levels.len() - 1)
    }

    /// Records an actual removal on the innermost open level. No-op while no
    /// level is open (the removal is then part of the committed baseline).
    pub(crate) fn record(&mut self, var: VariableId, value: i64) {
        if !self.levels.is_empty() {
            self.entries.push((var, value));
        }
    }

    /// Undoes the innermost open level, replaying its removals in reverse.
    pub fn pop(&mut self, store: &mut DomainStore) -> Result<()> {
        let start = self.levels.pop().ok_or(Error::NoCheckpointOpen)?;
        let undone = self.entries.split_off(start);
        for &(var, value) in undone.iter().rev() {
            store.restore(var, value);
        }
        Ok(())
    }

    /// Pops every level back to and including `checkpoint`.
    pub fn pop_through(&mut self, checkpoint: CheckpointId, store: &mut DomainStore) -> Result<()> {
        if !self.is_open(checkpoint) {
            return Err(Error::NoCheckpointOpen);
        }
        while self.levels.len() > checkpoint.0 {
            self.pop(store)?;
        }
        Ok(())
    }

    pub fn is_open(&self, checkpoint: CheckpointId) -> bool {
        checkpoint.0 < self.levels.len()
    }

    pub fn open_levels(&self) -> usize {
        self.levels.len()
    }
}
