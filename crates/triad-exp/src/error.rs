//! Experiment-harness error types.

use thiserror::Error;
use triad_hal::HalError;
use triad_ir::IrError;

/// Errors arising while aggregating trials or driving a sweep.
#[derive(Debug, Error)]
pub enum ExpError {
    /// An outcome matrix with zero rows cannot be aggregated.
    #[error("no trials to aggregate (shots = 0)")]
    EmptyTrialSet,

    /// The requested output column does not exist in the outcome matrix.
    #[error("column {column} out of range for outcome matrix of width {width}")]
    ColumnOutOfRange { column: usize, width: usize },

    /// A tomography basis produced zero total counts.
    #[error("degenerate {basis} basis: zero total counts")]
    DegenerateBasis { basis: String },

    /// A run of consecutive sweep points failed; the backend is treated
    /// as unavailable and the remaining sweep aborted.
    #[error(
        "{failures} consecutive sweep points failed starting at index {first_index}; \
         aborting remaining sweep (last error: {last_error})"
    )]
    ExecutionFailure {
        first_index: usize,
        failures: usize,
        last_error: String,
    },

    /// Invalid swept parameters.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Backend error outside a sweep's per-point boundary.
    #[error(transparent)]
    Hal(#[from] HalError),
}

/// Result type for experiment operations.
pub type ExpResult<T> = Result<T, ExpError>;
