use std::collections::{HashSet, VecDeque};

use crate::solver::engine::VariableId;

/// A FIFO worklist of variables whose domains shrank since the last check.
///
/// Membership is a set, not a multiset: pushing a variable already queued is
/// a no-op.
#[derive(Debug, Default)]
pub struct WorkList {
    queue: VecDeque<VariableId>,
    queued: HashSet<VariableId>,
}

impl WorkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, variable_id: VariableId) {
        if self.queued.insert(variable_id) {
            self.queue.push_back(variable_id);
        }
    }

    pub fn pop_front(&mut self) -> Option<VariableId> {
        let variable_id = self.queue.pop_front()?;
        self.queued.remove(&variable_id);
        Some(variable_id)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
