//! Trellis is an incremental constraint propagation engine for interactive
//! product configuration.
//!
//! A configurator presents a small set of finite-domain attributes (the
//! variables) linked by implication rules (the constraints). After every user
//! choice the engine must report, for every other attribute, which values are
//! still consistent. Trellis maintains exactly that: it propagates each
//! restriction transitively to a fixed point, detects contradictions the
//! instant a domain empties, and supports hypothetical "what if" reasoning
//! with exact rollback.
//!
//! # Core Concepts
//!
//! - **[`DomainStore`]**: owns, per variable, the set of still-possible values.
//! - **[`ConstraintNetwork`]**: the fixed set of constraints, registered once
//!   at setup, indexed so the propagator knows which constraints to re-check
//!   when a domain shrinks.
//! - **[`Propagator`]**: worklist-driven fixed-point propagation.
//! - **[`Trail`]**: a reversible log of domain removals, organized in nested
//!   checkpoint levels, giving rollback cost proportional to work done rather
//!   than to the number of variables.
//! - **[`Engine`]**: the facade tying the four together into the interactive
//!   checkpoint → restrict → propagate → rollback-or-commit cycle.
//!
//! The engine is vocabulary-agnostic: variables, domains, and rules arrive as
//! a configuration table (see the [`catalog`] module), never as engine logic.
//!
//! # Example: One Rule, One Choice
//!
//! A car model variable and a usage variable, linked by the rule
//! "model = limousine implies usage = pkw":
//!
//! ```
//! use trellis::solver::constraint::{Comparison, Constraint};
//! use trellis::solver::engine::{Engine, Propagation};
//!
//! let mut engine = Engine::new();
//! // 1 - limousine, 2 - combi, 3 - suv, 4 - cabrio, 5 - van
//! let model = engine.define_variable("model", &[1, 2, 3, 4, 5]).unwrap();
//! // 0 - pkw, 1 - transporter
//! let usage = engine.define_variable("usage", &[0, 1]).unwrap();
//! engine
//!     .define_constraint(Constraint::implies(
//!         Comparison::Eq(model, 1),
//!         Comparison::Eq(usage, 0),
//!     ))
//!     .unwrap();
//!
//! // Explore the hypothesis "the user picks limousine".
//! let checkpoint = engine.checkpoint();
//! engine.restrict(model, 1).unwrap();
//! match engine.propagate() {
//!     Propagation::Consistent(snapshot) => {
//!         assert_eq!(snapshot.domain_of(usage), Some(vec![0]));
//!     }
//!     Propagation::Contradiction { .. } => unreachable!(),
//! }
//!
//! // Roll back: every domain is exactly as it was before the checkpoint.
//! engine.rollback(checkpoint).unwrap();
//! assert_eq!(engine.domain_of(usage).unwrap(), vec![0, 1]);
//! ```
//!
//! [`DomainStore`]: solver::store::DomainStore
//! [`ConstraintNetwork`]: solver::network::ConstraintNetwork
//! [`Propagator`]: solver::propagator::Propagator
//! [`Trail`]: solver::trail::Trail
//! [`Engine`]: solver::engine::Engine

pub mod catalog;
pub mod error;
pub mod solver;
