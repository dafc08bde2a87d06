use crate::solver::{
    engine::VariableId,
    store::{DomainStore, EmptyDomain},
    trail::Trail,
};

/// Three-valued status of a condition against the current domains.
///
/// Forward rules only fire on [`Entailment::True`]; an undetermined
/// antecedent must not cause any pruning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entailment {
    True,
    False,
    Unknown,
}

/// A single comparison over one or two variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `var = value`
    Eq(VariableId, i64),
    /// `var ≠ value`
    Ne(VariableId, i64),
    /// `var = other`
    EqVar(VariableId, VariableId),
    /// `var ≠ other`
    NeVar(VariableId, VariableId),
}

impl Comparison {
    pub(crate) fn collect_variables(&self, out: &mut Vec<VariableId>) {
        match *self {
            Comparison::Eq(v, _) | Comparison::Ne(v, _) => out.push(v),
            Comparison::EqVar(a, b) | Comparison::NeVar(a, b) => {
                out.push(a);
                out.push(b);
            }
        }
    }

    /// Evaluates this comparison against the current domains.
    ///
    /// `v = k` is entailed-true iff `v`'s domain is exactly `{k}` and
    /// entailed-false iff `k` is no longer in the domain; between the two it
    /// is undetermined. `v ≠ k` is the inverse. For two variables, `v = w` is
    /// entailed-true iff both domains are the same singleton and
    /// entailed-false iff the domains are disjoint.
    pub fn entailment(&self, store: &DomainStore) -> Entailment {
        match *self {
            Comparison::Eq(v, k) => {
                let domain = store.domain(v);
                if !domain.contains(&k) {
                    Entailment::False
                } else if domain.len() == 1 {
                    Entailment::True
                } else {
                    Entailment::Unknown
                }
            }
            Comparison::Ne(v, k) => match Comparison::Eq(v, k).entailment(store) {
                Entailment::True => Entailment::False,
                Entailment::False => Entailment::True,
                Entailment::Unknown => Entailment::Unknown,
            },
            Comparison::EqVar(a, b) => {
                let da = store.domain(a);
                let db = store.domain(b);
                if da.len() == 1 && db.len() == 1 && da.get_min() == db.get_min() {
                    Entailment::True
                } else if da.iter().all(|v| !db.contains(v)) {
                    Entailment::False
                } else {
                    Entailment::Unknown
                }
            }
            Comparison::NeVar(a, b) => match Comparison::EqVar(a, b).entailment(store) {
                Entailment::True => Entailment::False,
                Entailment::False => Entailment::True,
                Entailment::Unknown => Entailment::Unknown,
            },
        }
    }

    /// Removes from the comparison's variable(s) every value inconsistent
    /// with it, pushing each variable that actually shrank onto `changed`.
    pub fn enforce(
        &self,
        store: &mut DomainStore,
        trail: &mut Trail,
        changed: &mut Vec<VariableId>,
    ) -> Result<(), EmptyDomain> {
        match *self {
            Comparison::Eq(v, k) => {
                let doomed: Vec<i64> = store.domain(v).iter().copied().filter(|&x| x != k).collect();
                for value in doomed {
                    if store.remove(v, value, trail)? {
                        changed.push(v);
                    }
                }
            }
            Comparison::Ne(v, k) => {
                if store.remove(v, k, trail)? {
                    changed.push(v);
                }
            }
            Comparison::EqVar(a, b) => {
                // Prune both sides to the intersection of the two domains.
                for (target, other) in [(a, b), (b, a)] {
                    let doomed: Vec<i64> = store
                        .domain(target)
                        .iter()
                        .copied()
                        .filter(|v| !store.domain(other).contains(v))
                        .collect();
                    for value in doomed {
                        if store.remove(target, value, trail)? {
                            changed.push(target);
                        }
                    }
                }
            }
            Comparison::NeVar(a, b) => {
                for (target, other) in [(a, b), (b, a)] {
                    let other_domain = store.domain(other);
                    if other_domain.len() != 1 {
                        continue;
                    }
                    let Some(&value) = other_domain.get_min() else {
                        continue;
                    };
                    if store.remove(target, value, trail)? {
                        changed.push(target);
                    }
                }
            }
        }
        Ok(())
    }
}

/// An antecedent or consequent: a single comparison or a conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Is(Comparison),
    All(Vec<Comparison>),
}

impl Condition {
    pub fn all(comparisons: impl IntoIterator<Item = Comparison>) -> Self {
        Condition::All(comparisons.into_iter().collect())
    }

    pub(crate) fn collect_variables(&self, out: &mut Vec<VariableId>) {
        match self {
            Condition::Is(c) => c.collect_variables(out),
            Condition::All(cs) => {
                for c in cs {
                    c.collect_variables(out);
                }
            }
        }
    }

    /// A conjunction is entailed-true iff every member is entailed-true and
    /// entailed-false iff any member is entailed-false.
    pub fn entailment(&self, store: &DomainStore) -> Entailment {
        match self {
            Condition::Is(c) => c.entailment(store),
            Condition::All(cs) => {
                let mut result = Entailment::True;
                for c in cs {
                    match c.entailment(store) {
                        Entailment::False => return Entailment::False,
                        Entailment::Unknown => result = Entailment::Unknown,
                        Entailment::True => {}
                    }
                }
                result
            }
        }
    }

    pub fn enforce(
        &self,
        store: &mut DomainStore,
        trail: &mut Trail,
        changed: &mut Vec<VariableId>,
    ) -> Result<(), EmptyDomain> {
        match self {
            Condition::Is(c) => c.enforce(store, trail, changed),
            Condition::All(cs) => {
                for c in cs {
                    c.enforce(store, trail, changed)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Comparison> for Condition {
    fn from(c: Comparison) -> Self {
        Condition::Is(c)
    }
}

/// A constraint in the network: a hard condition, or a one-directional
/// forward rule.
///
/// Implications fire only when the antecedent is entailed-true; an
/// entailed-false antecedent satisfies the rule trivially and an undetermined
/// one does nothing this round. Contrapositive reasoning is deliberately not
/// performed: the rule tables this engine serves are forward rules, not
/// biconditionals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Require(Condition),
    Implication { when: Condition, then: Condition },
}

impl Constraint {
    pub fn require(condition: impl Into<Condition>) -> Self {
        Constraint::Require(condition.into())
    }

    pub fn implies(when: impl Into<Condition>, then: impl Into<Condition>) -> Self {
        Constraint::Implication {
            when: when.into(),
            then: then.into(),
        }
    }

    /// Every variable this constraint touches, deduplicated.
    pub fn variables(&self) -> Vec<VariableId> {
        let mut vars = Vec::new();
        match self {
            Constraint::Require(c) => c.collect_variables(&mut vars),
            Constraint::Implication { when, then } => {
                when.collect_variables(&mut vars);
                then.collect_variables(&mut vars);
            }
        }
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Re-checks this constraint against the current domains, pruning where
    /// its semantics demand it.
    pub fn revise(
        &self,
        store: &mut DomainStore,
        trail: &mut Trail,
        changed: &mut Vec<VariableId>,
    ) -> Result<(), EmptyDomain> {
        match self {
            Constraint::Require(condition) => condition.enforce(store, trail, changed),
            Constraint::Implication { when, then } => match when.entailment(store) {
                Entailment::True => then.enforce(store, trail, changed),
                Entailment::False | Entailment::Unknown => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn two_vars() -> (DomainStore, VariableId, VariableId) {
        let mut store = DomainStore::new();
        let model = store.add_variable("model", &[1, 2, 3, 4, 5]).unwrap();
        let usage = store.add_variable("usage", &[0, 1]).unwrap();
        (store, model, usage)
    }

    #[test]
    fn eq_literal_entailment() {
        let (mut store, model, _) = two_vars();
        let mut trail = Trail::new();

        let eq = Comparison::Eq(model, 1);
        assert_eq!(eq.entailment(&store), Entailment::Unknown);

        for v in [2, 3, 4, 5] {
            store.remove(model, v, &mut trail).unwrap();
        }
        assert_eq!(eq.entailment(&store), Entailment::True);
        assert_eq!(Comparison::Eq(model, 2).entailment(&store), Entailment::False);
    }

    #[test]
    fn ne_literal_entailment_is_the_inverse() {
        let (mut store, model, _) = two_vars();
        let mut trail = Trail::new();

        let ne = Comparison::Ne(model, 1);
        assert_eq!(ne.entailment(&store), Entailment::Unknown);

        store.remove(model, 1, &mut trail).unwrap();
        assert_eq!(ne.entailment(&store), Entailment::True);
    }

    #[test]
    fn var_var_entailment() {
        let mut store = DomainStore::new();
        let mut trail = Trail::new();
        let a = store.add_variable("a", &[1, 2]).unwrap();
        let b = store.add_variable("b", &[2, 3]).unwrap();

        assert_eq!(Comparison::EqVar(a, b).entailment(&store), Entailment::Unknown);
        assert_eq!(Comparison::NeVar(a, b).entailment(&store), Entailment::Unknown);

        store.remove(a, 1, &mut trail).unwrap();
        store.remove(b, 3, &mut trail).unwrap();
        assert_eq!(Comparison::EqVar(a, b).entailment(&store), Entailment::True);
        assert_eq!(Comparison::NeVar(a, b).entailment(&store), Entailment::False);

        let c = store.add_variable("c", &[7, 8]).unwrap();
        assert_eq!(Comparison::EqVar(a, c).entailment(&store), Entailment::False);
        assert_eq!(Comparison::NeVar(a, c).entailment(&store), Entailment::True);
    }

    #[test]
    fn enforce_eq_keeps_only_the_literal() {
        let (mut store, model, _) = two_vars();
        let mut trail = Trail::new();
        let mut changed = Vec::new();

        Comparison::Eq(model, 4)
            .enforce(&mut store, &mut trail, &mut changed)
            .unwrap();
        assert_eq!(store.values(model).unwrap(), vec![4]);
        assert!(changed.contains(&model));
    }

    #[test]
    fn enforce_ne_removes_the_literal() {
        let (mut store, model, _) = two_vars();
        let mut trail = Trail::new();
        let mut changed = Vec::new();

        Comparison::Ne(model, 4)
            .enforce(&mut store, &mut trail, &mut changed)
            .unwrap();
        assert_eq!(store.values(model).unwrap(), vec![1, 2, 3, 5]);
        assert_eq!(changed, vec![model]);

        // Enforcing again is a no-op.
        changed.clear();
        Comparison::Ne(model, 4)
            .enforce(&mut store, &mut trail, &mut changed)
            .unwrap();
        assert!(changed.is_empty());
    }

    #[test]
    fn enforce_eq_var_prunes_both_sides_to_the_intersection() {
        let mut store = DomainStore::new();
        let mut trail = Trail::new();
        let mut changed = Vec::new();
        let a = store.add_variable("a", &[1, 2, 3]).unwrap();
        let b = store.add_variable("b", &[2, 3, 4]).unwrap();

        Comparison::EqVar(a, b)
            .enforce(&mut store, &mut trail, &mut changed)
            .unwrap();
        assert_eq!(store.values(a).unwrap(), vec![2, 3]);
        assert_eq!(store.values(b).unwrap(), vec![2, 3]);
    }

    #[test]
    fn enforce_ne_var_only_fires_on_a_singleton() {
        let mut store = DomainStore::new();
        let mut trail = Trail::new();
        let mut changed = Vec::new();
        let a = store.add_variable("a", &[1, 2, 3]).unwrap();
        let b = store.add_variable("b", &[2]).unwrap();

        Comparison::NeVar(a, b)
            .enforce(&mut store, &mut trail, &mut changed)
            .unwrap();
        assert_eq!(store.values(a).unwrap(), vec![1, 3]);
        assert_eq!(store.values(b).unwrap(), vec![2]);
    }

    #[test]
    fn conjunction_entailment_combines_members() {
        let (mut store, model, usage) = two_vars();
        let mut trail = Trail::new();

        let both = Condition::all([Comparison::Eq(model, 1), Comparison::Eq(usage, 0)]);
        assert_eq!(both.entailment(&store), Entailment::Unknown);

        // One member entailed-false sinks the conjunction.
        store.remove(model, 1, &mut trail).unwrap();
        assert_eq!(both.entailment(&store), Entailment::False);
    }

    #[test]
    fn implication_does_nothing_while_undetermined() {
        let (mut store, model, usage) = two_vars();
        let mut trail = Trail::new();
        let mut changed = Vec::new();

        let rule = Constraint::implies(Comparison::Eq(model, 1), Comparison::Eq(usage, 0));
        rule.revise(&mut store, &mut trail, &mut changed).unwrap();
        assert!(changed.is_empty());
        assert_eq!(store.values(usage).unwrap(), vec![0, 1]);
    }

    #[test]
    fn implication_fires_once_antecedent_is_entailed() {
        let (mut store, model, usage) = two_vars();
        let mut trail = Trail::new();
        let mut changed = Vec::new();

        let rule = Constraint::implies(Comparison::Eq(model, 1), Comparison::Eq(usage, 0));
        Comparison::Eq(model, 1)
            .enforce(&mut store, &mut trail, &mut changed)
            .unwrap();

        changed.clear();
        rule.revise(&mut store, &mut trail, &mut changed).unwrap();
        assert_eq!(store.values(usage).unwrap(), vec![0]);
        assert_eq!(changed, vec![usage]);
    }

    #[test]
    fn falsified_antecedent_satisfies_the_rule_trivially() {
        let (mut store, model, usage) = two_vars();
        let mut trail = Trail::new();
        let mut changed = Vec::new();

        let rule = Constraint::implies(Comparison::Eq(model, 1), Comparison::Eq(usage, 0));
        store.remove(model, 1, &mut trail).unwrap();

        rule.revise(&mut store, &mut trail, &mut changed).unwrap();
        assert!(changed.is_empty());
        assert_eq!(store.values(usage).unwrap(), vec![0, 1]);
    }

    #[test]
    fn variables_are_deduplicated() {
        let rule = Constraint::implies(
            Condition::all([Comparison::Eq(0, 1), Comparison::Eq(2, 1)]),
            Condition::all([Comparison::Ne(1, 3), Comparison::Ne(1, 4)]),
        );
        assert_eq!(rule.variables(), vec![0, 1, 2]);
    }
}
