//! Statistical experiment harness.
//!
//! Everything between raw execution outcomes and reportable numbers:
//! trial aggregation ([`estimate_probability`], [`basis_expectation`]),
//! the bounded-concurrency noise sweep ([`sweep`]) and bias sweep
//! ([`bias_sweep`]), and single-qubit tomography reconstruction
//! ([`reconstruct`], [`density_matrix`]).
//!
//! The harness never inspects backend internals: it drives any
//! [`triad_hal::Executor`] through `run_noisy` and reduces the returned
//! [`triad_hal::OutcomeMatrix`] values.

pub mod aggregate;
pub mod error;
pub mod sweep;
pub mod tomography;

pub use aggregate::{basis_expectation, estimate_probability};
pub use error::{ExpError, ExpResult};
pub use sweep::{
    BiasPoint, CancelToken, FAILURE_ABORT_THRESHOLD, PointError, SweepConfig, SweepPoint,
    SweepResult, bias_sweep, logspace, sweep,
};
pub use tomography::{PauliVector, density_matrix, reconstruct};
