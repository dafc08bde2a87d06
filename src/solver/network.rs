use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    solver::{
        constraint::Constraint,
        engine::{ConstraintId, VariableId},
        store::DomainStore,
    },
};

/// The fixed set of constraints, registered once at setup.
///
/// Registration builds a variable → constraint index so the propagator can
/// ask which constraints to re-check when a domain shrinks. Constraints are
/// immutable once registered; nothing is added or removed during propagation.
#[derive(Debug, Clone, Default)]
pub struct ConstraintNetwork {
    constraints: Vec<Constraint>,
    touching: HashMap<VariableId, Vec<ConstraintId>>,
}

impl ConstraintNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constraint, validating every variable id it references
    /// against the store.
    pub fn register(&mut self, constraint: Constraint, store: &DomainStore) -> Result<ConstraintId> {
        let vars = constraint.variables();
        for &var in &vars {
            if var as usize >= store.variable_count() {
                return Err(Error::UnknownVariableId(var));
            }
        }
        let id = self.constraints.len();
        for var in vars {
            self.touching.entry(var).or_default().push(id);
        }
        self.constraints.push(constraint);
        Ok(id)
    }

    /// The ids of every constraint touching `var`.
    pub fn constraints_touching(&self, var: VariableId) -> &[ConstraintId] {
        self.touching.get(&var).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id]
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}
