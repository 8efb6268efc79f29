//! Error types for the protocol crate.

use thiserror::Error;
use triad_ir::IrError;

/// Errors that can occur while constructing protocol circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtoError {
    /// Instance count must be strictly positive.
    #[error("Invalid instance count: {n} (must be >= 1)")]
    InvalidArity {
        /// The offending instance count.
        n: u32,
    },

    /// A per-instance secret profile does not match the instance count.
    #[error("Secret profile supplies {got} entries for {expected} instances")]
    ArityMismatch {
        /// The instance count being built.
        expected: u32,
        /// Entries the profile supplies.
        got: usize,
    },

    /// Secret bias outside [0, 1].
    #[error("Secret bias {p0} outside [0, 1]")]
    InvalidBias {
        /// The offending bias.
        p0: f64,
    },

    /// A physical register assignment is not a valid bijection.
    #[error("Invalid register assignment: {0}")]
    InvalidAssignment(String),

    /// Underlying circuit-construction error.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for protocol operations.
pub type ProtoResult<T> = Result<T, ProtoError>;
