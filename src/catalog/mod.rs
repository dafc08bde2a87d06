//! The application side of the engine: configuration tables.
//!
//! A product's vocabulary — its attributes, their value encodings, the
//! implication rules linking them, and the human-readable labels — is data,
//! not engine logic. This module defines the serde-deserializable table
//! format, compiles a table into a ready [`Engine`], and carries the
//! value→label mapping the presentation layer renders with.
//!
//! [`Engine`]: crate::solver::engine::Engine

pub mod car;
pub mod table;

pub use table::{ComparisonDef, ConditionDef, ConfigTable, Labels, Op, RuleDef, VariableDef};
