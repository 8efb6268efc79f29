//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur at the execution boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Backend cannot honor a requested capability (e.g. noise injection,
    /// or a circuit outside its native gate basis).
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid number of shots.
    #[error("Invalid shot count: {shots}")]
    InvalidShots {
        /// The offending shot count.
        shots: u32,
    },

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Circuit is structurally invalid for this backend.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Backend reported an execution error.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Outcome data does not match the declared circuit layout.
    #[error("Malformed outcome data: {0}")]
    MalformedOutcome(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
