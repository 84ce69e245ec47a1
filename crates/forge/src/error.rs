use celestial::NodeId;
use thiserror::Error;

/// Failures of generation and of operator-initiated edits.
///
/// Messages are phrased for display to the operator.
#[derive(Debug, Error)]
pub enum Error {
    #[error("node '{0}' does not exist")]
    NodeNotFound(NodeId),

    #[error("host '{0}' does not exist")]
    MissingHost(NodeId),

    #[error("host '{0}' has no mass to orbit")]
    ZeroHostMass(NodeId),

    #[error("no stable orbit found: {0}")]
    NoStableOrbit(String),

    #[error("radiation index {radiation:.0} exceeds the limit of {limit:.0}")]
    RadiationExceeded { radiation: f64, limit: f64 },

    #[error("the root of a system cannot be deleted")]
    RootDeletion,

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("unknown star type '{0}'")]
    UnknownStarType(String),

    #[error("invalid edit: {0}")]
    InvalidEdit(String),

    #[error(transparent)]
    RulePack(#[from] rulepack::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
