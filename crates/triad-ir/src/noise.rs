//! Decoherence-noise parameters.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Decoherence and readout parameters for a noisy execution.
///
/// `t1` is the relaxation (amplitude-damping) time and `t2` the dephasing
/// time, both in seconds; `ro_fidelity` is the probability that a
/// measurement outcome is recorded correctly. Physicality requires
/// `t2 <= 2*t1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    /// Relaxation time T1 in seconds.
    pub t1: f64,
    /// Dephasing time T2 in seconds.
    pub t2: f64,
    /// Readout assignment fidelity in [0, 1].
    pub ro_fidelity: f64,
}

impl NoiseParameters {
    /// Create validated noise parameters.
    pub fn new(t1: f64, t2: f64, ro_fidelity: f64) -> IrResult<Self> {
        if !(t1.is_finite() && t1 > 0.0) {
            return Err(IrError::InvalidNoiseParameter(format!(
                "t1 must be strictly positive, got {t1}"
            )));
        }
        if !(t2.is_finite() && t2 > 0.0) {
            return Err(IrError::InvalidNoiseParameter(format!(
                "t2 must be strictly positive, got {t2}"
            )));
        }
        if t2 > 2.0 * t1 {
            return Err(IrError::InvalidNoiseParameter(format!(
                "t2 ({t2}) exceeds the physical bound 2*t1 ({})",
                2.0 * t1
            )));
        }
        if !(0.0..=1.0).contains(&ro_fidelity) {
            return Err(IrError::InvalidNoiseParameter(format!(
                "ro_fidelity must be in [0, 1], got {ro_fidelity}"
            )));
        }
        Ok(Self {
            t1,
            t2,
            ro_fidelity,
        })
    }

    /// Decoherence-only parameters with perfect readout.
    pub fn decohering(t1: f64, t2: f64) -> IrResult<Self> {
        Self::new(t1, t2, 1.0)
    }
}

impl std::fmt::Display for NoiseParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "T1={:.3e}s T2={:.3e}s ro_fidelity={:.4}",
            self.t1, self.t2, self.ro_fidelity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_parameters() {
        let noise = NoiseParameters::new(30e-6, 20e-6, 0.95).unwrap();
        assert_eq!(noise.t1, 30e-6);
        assert_eq!(noise.t2, 20e-6);
        assert_eq!(noise.ro_fidelity, 0.95);
    }

    #[test]
    fn test_nonpositive_times_rejected() {
        assert!(NoiseParameters::new(0.0, 20e-6, 1.0).is_err());
        assert!(NoiseParameters::new(30e-6, -1.0, 1.0).is_err());
    }

    #[test]
    fn test_t2_bound() {
        // t2 = 2*t1 is the edge of the physical region.
        assert!(NoiseParameters::new(10e-6, 20e-6, 1.0).is_ok());
        assert!(NoiseParameters::new(10e-6, 20.1e-6, 1.0).is_err());
    }

    #[test]
    fn test_readout_fidelity_range() {
        assert!(NoiseParameters::new(10e-6, 10e-6, 1.1).is_err());
        assert!(NoiseParameters::new(10e-6, 10e-6, -0.1).is_err());
        assert!(NoiseParameters::decohering(10e-6, 10e-6).unwrap().ro_fidelity == 1.0);
    }
}
