//! Trial aggregation: outcome matrices to probabilities and expectations.
//!
//! Pure reductions over an [`OutcomeMatrix`]. All randomness lives behind
//! the execution boundary; given the same matrix these functions always
//! return the same value.

use triad_hal::OutcomeMatrix;

use crate::error::{ExpError, ExpResult};

/// Trial-averaged probability of observing 1 on an output column.
///
/// Returns ones/rows. Fails with [`ExpError::EmptyTrialSet`] when the
/// matrix has zero rows and [`ExpError::ColumnOutOfRange`] when the
/// column is not present.
pub fn estimate_probability(outcomes: &OutcomeMatrix, column: usize) -> ExpResult<f64> {
    if outcomes.shots() == 0 {
        return Err(ExpError::EmptyTrialSet);
    }
    let ones = outcomes
        .ones_in_column(column)
        .ok_or(ExpError::ColumnOutOfRange {
            column,
            width: outcomes.width(),
        })?;
    Ok(ones as f64 / outcomes.shots() as f64)
}

/// Expectation value of a measurement in one tomography basis.
///
/// With `pos` the count of 1s and `neg` the count of 0s on the column,
/// returns `-(pos - neg) / (pos + neg)`, a real in `[-1, 1]`. The `basis`
/// label only flavors the [`ExpError::DegenerateBasis`] error raised when
/// `pos + neg == 0`.
pub fn basis_expectation(
    outcomes: &OutcomeMatrix,
    column: usize,
    basis: &str,
) -> ExpResult<f64> {
    let total = outcomes.shots();
    if total == 0 {
        return Err(ExpError::DegenerateBasis {
            basis: basis.to_string(),
        });
    }
    let pos = outcomes
        .ones_in_column(column)
        .ok_or(ExpError::ColumnOutOfRange {
            column,
            width: outcomes.width(),
        })?;
    let neg = total - pos;
    Ok(-((pos as f64 - neg as f64) / total as f64))
}
