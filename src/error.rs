use crate::solver::engine::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised by the engine's setup and checkpoint contracts.
///
/// A contradiction during propagation is deliberately not represented here:
/// an emptied domain is a normal outcome of exploring a hypothesis and is
/// reported through [`Propagation::Contradiction`], never as an error.
///
/// [`Propagation::Contradiction`]: crate::solver::engine::Propagation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A variable with this name was already defined.
    #[error("variable `{0}` is already defined")]
    DuplicateVariable(String),

    /// A variable was defined with no values in its initial domain.
    #[error("variable `{0}` has an empty initial domain")]
    EmptyInitialDomain(String),

    /// A variable name was referenced that was never defined.
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    /// A variable id was referenced that was never defined.
    #[error("unknown variable id {0}")]
    UnknownVariableId(VariableId),

    /// A rollback was requested with no matching open checkpoint.
    #[error("rollback requested with no open checkpoint")]
    NoCheckpointOpen,

    /// A configuration table failed to deserialize.
    #[error("malformed configuration table: {0}")]
    MalformedTable(#[from] serde_json::Error),
}
