use std::collections::HashMap;

use im::OrdSet;

use crate::{
    error::{Error, Result},
    solver::{engine::VariableId, trail::Trail},
};

/// Signals that a removal just emptied a variable's domain.
///
/// This is the contradiction signal, raised at the instant it occurs. It is
/// deliberately not a [`crate::error::Error`]: an infeasible combination of
/// choices is an expected outcome, and the caller is expected to follow it
/// with an immediate rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyDomain(pub VariableId);

#[derive(Debug, Clone)]
struct Variable {
    name: String,
    domain: OrdSet<i64>,
}

/// Owns the current domain of every variable.
///
/// Domains are `im::OrdSet`s: values iterate in ascending order, and cloning
/// one for a [`DomainSnapshot`] shares structure instead of copying. All
/// mutation goes through [`DomainStore::remove`], which reports every actual
/// removal to the [`Trail`] — the single integration point that makes exact
/// rollback possible.
#[derive(Debug, Clone, Default)]
pub struct DomainStore {
    variables: Vec<Variable>,
    names: HashMap<String, VariableId>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable with its full initial domain. Values are sorted
    /// and deduplicated on entry.
    pub fn add_variable(&mut self, name: &str, values: &[i64]) -> Result<VariableId> {
        if self.names.contains_key(name) {
            return Err(Error::DuplicateVariable(name.to_string()));
        }
        let domain: OrdSet<i64> = values.iter().copied().collect();
        if domain.is_empty() {
            return Err(Error::EmptyInitialDomain(name.to_string()));
        }
        let id = self.variables.len() as VariableId;
        self.names.insert(name.to_string(), id);
        self.variables.push(Variable {
            name: name.to_string(),
            domain,
        });
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Result<VariableId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))
    }

    pub fn name(&self, var: VariableId) -> Result<&str> {
        Ok(self.variable(var)?.name.as_str())
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Iterates over all variables in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &str)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(id, v)| (id as VariableId, v.name.as_str()))
    }

    /// The values still possible for `var`, in ascending order.
    pub fn values(&self, var: VariableId) -> Result<Vec<i64>> {
        Ok(self.variable(var)?.domain.iter().copied().collect())
    }

    /// True iff exactly one value remains.
    pub fn is_assigned(&self, var: VariableId) -> Result<bool> {
        Ok(self.variable(var)?.domain.len() == 1)
    }

    /// Removes `value` from `var`'s domain if present.
    ///
    /// Returns `Ok(true)` for an actual removal (recorded on the trail),
    /// `Ok(false)` for a no-op (not recorded, keeping checkpoint cost
    /// proportional to work done), and `Err(EmptyDomain)` the moment the
    /// domain becomes empty.
    pub fn remove(
        &mut self,
        var: VariableId,
        value: i64,
        trail: &mut Trail,
    ) -> core::result::Result<bool, EmptyDomain> {
        let domain = &mut self.variables[var as usize].domain;
        if domain.remove(&value).is_none() {
            return Ok(false);
        }
        trail.record(var, value);
        if domain.is_empty() {
            return Err(EmptyDomain(var));
        }
        Ok(true)
    }

    /// Re-inserts a value during trail replay. Only the [`Trail`] calls this.
    pub(crate) fn restore(&mut self, var: VariableId, value: i64) {
        self.variables[var as usize].domain.insert(value);
    }

    /// Read access for constraint entailment checks. Ids are validated at
    /// registration time, so indexing is direct.
    pub(crate) fn domain(&self, var: VariableId) -> &OrdSet<i64> {
        &self.variables[var as usize].domain
    }

    /// A read-only copy of every domain, cheap via structural sharing. Used
    /// by the read path only, never for restore.
    pub fn snapshot(&self) -> DomainSnapshot {
        DomainSnapshot {
            domains: self.variables.iter().map(|v| v.domain.clone()).collect(),
        }
    }

    fn variable(&self, var: VariableId) -> Result<&Variable> {
        self.variables
            .get(var as usize)
            .ok_or(Error::UnknownVariableId(var))
    }
}

/// The domains of all variables at a settled point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSnapshot {
    domains: Vec<OrdSet<i64>>,
}

impl DomainSnapshot {
    /// The captured domain of `var` in ascending order, or `None` for an
    /// unknown id.
    pub fn domain_of(&self, var: VariableId) -> Option<Vec<i64>> {
        self.domains
            .get(var as usize)
            .map(|d| d.iter().copied().collect())
    }

    pub fn is_assigned(&self, var: VariableId) -> bool {
        self.domains
            .get(var as usize)
            .map(|d| d.len() == 1)
            .unwrap_or(false)
    }

    pub fn variable_count(&self) -> usize {
        self.domains.len()
    }
}
