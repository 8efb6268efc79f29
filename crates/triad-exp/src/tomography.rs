//! Single-qubit state tomography from three-basis statistics.

use ndarray::{Array2, array};
use num_complex::Complex64;
use serde::Serialize;
use tracing::warn;

use triad_hal::OutcomeMatrix;

use crate::aggregate::basis_expectation;
use crate::error::ExpResult;

/// Estimated Bloch vector of a single-qubit state.
///
/// A valid state has `norm() <= 1`; statistical noise can push an
/// estimate slightly outside the physical region, which is informative
/// about estimation error and deliberately not corrected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PauliVector {
    /// X-basis expectation.
    pub rx: f64,
    /// Y-basis expectation.
    pub ry: f64,
    /// Z-basis expectation.
    pub rz: f64,
}

impl PauliVector {
    /// Euclidean norm of the vector.
    pub fn norm(&self) -> f64 {
        (self.rx * self.rx + self.ry * self.ry + self.rz * self.rz).sqrt()
    }

    /// Whether the vector lies in the Bloch ball.
    pub fn is_physical(&self) -> bool {
        self.norm() <= 1.0
    }
}

impl std::fmt::Display for PauliVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:+.4}, {:+.4}, {:+.4})", self.rx, self.ry, self.rz)
    }
}

/// Combine three basis-specific outcome matrices into a Bloch-vector
/// estimate.
///
/// Each component is `-(pos - neg)/(pos + neg)` over the designated
/// output column; a basis with zero total counts fails with
/// [`crate::ExpError::DegenerateBasis`].
pub fn reconstruct(
    x_outcomes: &OutcomeMatrix,
    y_outcomes: &OutcomeMatrix,
    z_outcomes: &OutcomeMatrix,
    column: usize,
) -> ExpResult<PauliVector> {
    Ok(PauliVector {
        rx: basis_expectation(x_outcomes, column, "x")?,
        ry: basis_expectation(y_outcomes, column, "y")?,
        rz: basis_expectation(z_outcomes, column, "z")?,
    })
}

/// Density matrix of the estimated state.
///
/// Uses `rho = (I + rx*sigma_x + ry*sigma_y + rz*sigma_z) / 2`. A vector
/// outside the Bloch ball yields a matrix with a negative eigenvalue;
/// that is logged as a warning, not an error.
pub fn density_matrix(r: &PauliVector) -> Array2<Complex64> {
    if !r.is_physical() {
        warn!(
            norm = r.norm(),
            "Bloch vector outside the physical region, density matrix is not positive"
        );
    }
    array![
        [
            Complex64::new(0.5 * (1.0 + r.rz), 0.0),
            Complex64::new(0.5 * r.rx, -0.5 * r.ry),
        ],
        [
            Complex64::new(0.5 * r.rx, 0.5 * r.ry),
            Complex64::new(0.5 * (1.0 - r.rz), 0.0),
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpError;

    fn counts(pos: usize, neg: usize) -> OutcomeMatrix {
        let mut rows = vec![vec![1]; pos];
        rows.extend(vec![vec![0]; neg]);
        OutcomeMatrix::from_rows(1, rows).unwrap()
    }

    #[test]
    fn test_reconstruct_three_to_one_counts() {
        let m = counts(750, 250);
        let r = reconstruct(&m, &m, &m, 0).unwrap();
        assert_eq!(r.rx, -0.5);
        assert_eq!(r.ry, -0.5);
        assert_eq!(r.rz, -0.5);
    }

    #[test]
    fn test_reconstruct_balanced_counts() {
        let m = counts(500, 500);
        let r = reconstruct(&m, &m, &m, 0).unwrap();
        assert_eq!(r, PauliVector { rx: 0.0, ry: 0.0, rz: 0.0 });
    }

    #[test]
    fn test_degenerate_basis_names_the_basis() {
        let good = counts(10, 10);
        let empty = OutcomeMatrix::from_rows(1, vec![]).unwrap();
        let err = reconstruct(&good, &empty, &good, 0).unwrap_err();
        assert!(matches!(err, ExpError::DegenerateBasis { basis } if basis == "y"));
    }

    #[test]
    fn test_norm_and_physicality() {
        let physical = PauliVector { rx: 0.6, ry: 0.0, rz: 0.8 };
        assert!((physical.norm() - 1.0).abs() < 1e-12);
        assert!(physical.is_physical());

        let outside = PauliVector { rx: 1.0, ry: 1.0, rz: 1.0 };
        assert!(!outside.is_physical());
    }

    #[test]
    fn test_density_matrix_of_ground_state() {
        // r = (0, 0, 1) is |0><0|.
        let rho = density_matrix(&PauliVector { rx: 0.0, ry: 0.0, rz: 1.0 });
        assert_eq!(rho[[0, 0]], Complex64::new(1.0, 0.0));
        assert_eq!(rho[[0, 1]], Complex64::new(0.0, 0.0));
        assert_eq!(rho[[1, 0]], Complex64::new(0.0, 0.0));
        assert_eq!(rho[[1, 1]], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_density_matrix_trace_and_hermiticity() {
        let rho = density_matrix(&PauliVector { rx: 0.3, ry: -0.4, rz: 0.1 });
        let trace = rho[[0, 0]] + rho[[1, 1]];
        assert!((trace - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert_eq!(rho[[0, 1]], rho[[1, 0]].conj());
    }

    #[test]
    fn test_unphysical_vector_still_produces_matrix() {
        let rho = density_matrix(&PauliVector { rx: 1.0, ry: 1.0, rz: 1.0 });
        let trace = rho[[0, 0]] + rho[[1, 1]];
        assert!((trace - Complex64::new(1.0, 0.0)).norm() < 1e-12);
    }
}
