use tracing::debug;

use crate::{
    error::Result,
    solver::{
        constraint::Constraint,
        network::ConstraintNetwork,
        propagator::Propagator,
        store::{DomainSnapshot, DomainStore, EmptyDomain},
        trail::{CheckpointId, Trail},
    },
};

pub type VariableId = u32;
pub type ConstraintId = usize;

/// The outcome of a propagation cycle.
///
/// A contradiction means the combination of choices posted so far is
/// infeasible. It is not an error: the caller is expected to roll back to the
/// last checkpoint, after which every domain is bit-for-bit identical to its
/// pre-hypothesis state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Propagation {
    Consistent(DomainSnapshot),
    Contradiction { variable: VariableId },
}

/// Facade over the domain store, constraint network, propagator, and trail.
///
/// Setup calls ([`define_variable`], [`define_constraint`]) happen once, in
/// any order, before the first propagation. After that the caller drives the
/// interactive cycle: [`checkpoint`], [`restrict`], [`propagate`], then
/// either [`rollback`] to discard the hypothesis or — to commit it — rollback
/// followed by re-posting the same restriction with no checkpoint open,
/// making it part of the new baseline.
///
/// Single-threaded by design: propagation runs to completion before any
/// domain is observable, and all mutation is strictly call-ordered.
///
/// [`define_variable`]: Engine::define_variable
/// [`define_constraint`]: Engine::define_constraint
/// [`checkpoint`]: Engine::checkpoint
/// [`restrict`]: Engine::restrict
/// [`propagate`]: Engine::propagate
/// [`rollback`]: Engine::rollback
#[derive(Debug, Clone, Default)]
pub struct Engine {
    store: DomainStore,
    network: ConstraintNetwork,
    trail: Trail,
    /// Variables restricted since the last propagation, seeding the worklist.
    pending: Vec<VariableId>,
    /// Set when a domain emptied; sticky until the next rollback.
    failed: Option<VariableId>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a variable with its full initial domain.
    pub fn define_variable(&mut self, name: &str, values: &[i64]) -> Result<VariableId> {
        self.store.add_variable(name, values)
    }

    /// Registers a constraint over previously defined variables.
    pub fn define_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId> {
        self.network.register(constraint, &self.store)
    }

    /// Resolves a variable name to its id.
    pub fn variable(&self, name: &str) -> Result<VariableId> {
        self.store.lookup(name)
    }

    pub fn variable_name(&self, var: VariableId) -> Result<&str> {
        self.store.name(var)
    }

    /// All variables in definition order, for presentation layers.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &str)> {
        self.store.iter()
    }

    /// Posts a user decision: narrows `var` to exactly `value`.
    ///
    /// The removals take effect immediately (and land on the trail); the
    /// transitive consequences are computed by the next [`Engine::propagate`].
    /// Restricting to a value no longer in the domain empties it, which
    /// surfaces as a contradiction on that propagation.
    pub fn restrict(&mut self, var: VariableId, value: i64) -> Result<()> {
        let doomed: Vec<i64> = self
            .store
            .values(var)?
            .into_iter()
            .filter(|&v| v != value)
            .collect();
        for v in doomed {
            match self.store.remove(var, v, &mut self.trail) {
                Ok(_) => {}
                Err(EmptyDomain(variable)) => {
                    self.failed = Some(variable);
                    break;
                }
            }
        }
        self.pending.push(var);
        debug!(variable = var, value, "restriction posted");
        Ok(())
    }

    /// Runs propagation to a fixed point over everything restricted since the
    /// last call.
    ///
    /// With nothing pending this is a no-op returning the current domains, so
    /// consecutive calls are idempotent. After a contradiction the outcome
    /// stays `Contradiction` until the caller rolls back.
    pub fn propagate(&mut self) -> Propagation {
        if let Some(variable) = self.failed {
            self.pending.clear();
            return Propagation::Contradiction { variable };
        }
        let seeds = std::mem::take(&mut self.pending);
        match Propagator::run(&self.network, &mut self.store, &mut self.trail, seeds) {
            Ok(()) => Propagation::Consistent(self.store.snapshot()),
            Err(EmptyDomain(variable)) => {
                self.failed = Some(variable);
                Propagation::Contradiction { variable }
            }
        }
    }

    /// Opens a trail level for a hypothesis. O(1).
    pub fn checkpoint(&mut self) -> CheckpointId {
        self.trail.push()
    }

    /// Pops every trail level back to and including `checkpoint`, replaying
    /// the recorded removals in reverse, and clears any pending contradiction.
    pub fn rollback(&mut self, checkpoint: CheckpointId) -> Result<()> {
        self.trail.pop_through(checkpoint, &mut self.store)?;
        self.pending.clear();
        self.failed = None;
        Ok(())
    }

    /// The values still possible for `var`, ascending.
    pub fn domain_of(&self, var: VariableId) -> Result<Vec<i64>> {
        self.store.values(var)
    }

    /// True iff exactly one value remains for `var`.
    pub fn is_assigned(&self, var: VariableId) -> Result<bool> {
        self.store.is_assigned(var)
    }

    /// A cheap read-only copy of all current domains.
    pub fn snapshot(&self) -> DomainSnapshot {
        self.store.snapshot()
    }
}
