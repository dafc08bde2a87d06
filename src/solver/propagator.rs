use tracing::{debug, trace};

use crate::solver::{
    engine::VariableId,
    network::ConstraintNetwork,
    store::{DomainStore, EmptyDomain},
    trail::Trail,
    work_list::WorkList,
};

/// Drives fixed-point propagation over a [`ConstraintNetwork`].
///
/// The worklist holds variables whose domains shrank since they were last
/// checked. Popping a variable re-checks every constraint touching it; every
/// removal a constraint performs enqueues the shrunk variable. The loop ends
/// when the worklist is empty (fixed point) or the instant a removal empties
/// a domain.
///
/// Propagation is confluent: constraints only ever remove values, and their
/// entailment checks depend only on the current domains, so the fixed point
/// (or the fact that a contradiction occurs) is independent of processing
/// order. On [`EmptyDomain`] the propagator stops immediately and never
/// restores anything itself; rollback is the caller's move, through the
/// trail.
pub struct Propagator;

impl Propagator {
    /// Runs to a fixed point starting from the given seed variables.
    pub fn run(
        network: &ConstraintNetwork,
        store: &mut DomainStore,
        trail: &mut Trail,
        seeds: impl IntoIterator<Item = VariableId>,
    ) -> Result<(), EmptyDomain> {
        let mut worklist = WorkList::new();
        for var in seeds {
            worklist.push_back(var);
        }

        let mut changed = Vec::new();
        while let Some(var) = worklist.pop_front() {
            trace!(variable = var, "re-checking constraints");
            for &constraint_id in network.constraints_touching(var) {
                changed.clear();
                network
                    .constraint(constraint_id)
                    .revise(store, trail, &mut changed)?;
                if !changed.is_empty() {
                    debug!(constraint = constraint_id, pruned = ?changed, "constraint pruned domains");
                }
                for &shrunk in &changed {
                    worklist.push_back(shrunk);
                }
            }
        }

        debug!("propagation reached a fixed point");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

    use super::*;
    use crate::solver::constraint::{Comparison, Condition, Constraint};

    fn chain_setup() -> (DomainStore, ConstraintNetwork, Vec<VariableId>) {
        let mut store = DomainStore::new();
        let a = store.add_variable("a", &[1, 2, 3]).unwrap();
        let b = store.add_variable("b", &[1, 2, 3]).unwrap();
        let c = store.add_variable("c", &[1, 2, 3]).unwrap();

        let mut network = ConstraintNetwork::new();
        network
            .register(
                Constraint::implies(Comparison::Eq(a, 1), Comparison::Eq(b, 2)),
                &store,
            )
            .unwrap();
        network
            .register(
                Constraint::implies(Comparison::Eq(b, 2), Comparison::Eq(c, 3)),
                &store,
            )
            .unwrap();
        (store, network, vec![a, b, c])
    }

    #[test]
    fn propagation_is_transitive() {
        let (mut store, network, vars) = chain_setup();
        let mut trail = Trail::new();
        let mut changed = Vec::new();

        Comparison::Eq(vars[0], 1)
            .enforce(&mut store, &mut trail, &mut changed)
            .unwrap();
        Propagator::run(&network, &mut store, &mut trail, [vars[0]]).unwrap();

        assert_eq!(store.values(vars[1]).unwrap(), vec![2]);
        assert_eq!(store.values(vars[2]).unwrap(), vec![3]);
    }

    #[test]
    fn rerunning_at_a_fixed_point_changes_nothing() {
        let (mut store, network, vars) = chain_setup();
        let mut trail = Trail::new();
        let mut changed = Vec::new();

        Comparison::Eq(vars[0], 1)
            .enforce(&mut store, &mut trail, &mut changed)
            .unwrap();
        Propagator::run(&network, &mut store, &mut trail, vars.clone()).unwrap();
        let before = store.snapshot();

        Propagator::run(&network, &mut store, &mut trail, vars.clone()).unwrap();
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn contradiction_stops_the_run() {
        let mut store = DomainStore::new();
        let model = store.add_variable("model", &[4]).unwrap();
        let price = store.add_variable("price_class", &[0]).unwrap();

        let mut network = ConstraintNetwork::new();
        network
            .register(
                Constraint::implies(Comparison::Eq(model, 4), Comparison::Ne(price, 0)),
                &store,
            )
            .unwrap();

        let mut trail = Trail::new();
        let result = Propagator::run(&network, &mut store, &mut trail, [model]);
        assert_eq!(result, Err(EmptyDomain(price)));
    }

    /// The rule set used for the confluence property: a mix of chained
    /// implications, a conjunction rule, and a var-var comparison.
    fn confluence_setup() -> (DomainStore, Vec<Constraint>, Vec<VariableId>) {
        let mut store = DomainStore::new();
        let model = store.add_variable("model", &[1, 2, 3, 4, 5]).unwrap();
        let color = store.add_variable("color", &[1, 2, 3, 4, 5]).unwrap();
        let usage = store.add_variable("usage", &[0, 1]).unwrap();
        let drive = store.add_variable("drivetrain", &[0, 1, 2]).unwrap();
        let price = store.add_variable("price_class", &[0, 1, 2]).unwrap();

        let constraints = vec![
            Constraint::implies(Comparison::Eq(model, 1), Comparison::Eq(usage, 0)),
            Constraint::implies(Comparison::Eq(usage, 1), Comparison::Ne(drive, 0)),
            Constraint::implies(
                Condition::all([Comparison::Eq(model, 1), Comparison::Eq(drive, 1)]),
                Condition::all([Comparison::Ne(color, 3), Comparison::Ne(color, 4)]),
            ),
            Constraint::implies(Comparison::Eq(color, 1), Comparison::Eq(price, 0)),
            Constraint::require(Comparison::NeVar(usage, price)),
        ];
        (store, constraints, vec![model, color, usage, drive, price])
    }

    proptest! {
        /// Registration order and seed order must not affect the fixed point.
        #[test]
        fn fixed_point_is_independent_of_processing_order(seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let (mut reference_store, constraints, vars) = confluence_setup();
            let mut reference_network = ConstraintNetwork::new();
            for c in &constraints {
                reference_network.register(c.clone(), &reference_store).unwrap();
            }
            let mut trail = Trail::new();
            let mut changed = Vec::new();
            Comparison::Eq(vars[0], 1)
                .enforce(&mut reference_store, &mut trail, &mut changed)
                .unwrap();
            Comparison::Eq(vars[3], 1)
                .enforce(&mut reference_store, &mut trail, &mut changed)
                .unwrap();
            Propagator::run(&reference_network, &mut reference_store, &mut trail, vars.clone())
                .unwrap();
            let reference = reference_store.snapshot();

            let (mut store, constraints, vars) = confluence_setup();
            let mut shuffled = constraints;
            shuffled.shuffle(&mut rng);
            let mut network = ConstraintNetwork::new();
            for c in &shuffled {
                network.register(c.clone(), &store).unwrap();
            }
            let mut seeds = vars.clone();
            seeds.shuffle(&mut rng);
            let mut trail = Trail::new();
            let mut changed = Vec::new();
            Comparison::Eq(vars[0], 1)
                .enforce(&mut store, &mut trail, &mut changed)
                .unwrap();
            Comparison::Eq(vars[3], 1)
                .enforce(&mut store, &mut trail, &mut changed)
                .unwrap();
            Propagator::run(&network, &mut store, &mut trail, seeds).unwrap();

            prop_assert_eq!(store.snapshot(), reference);
        }
    }
}
