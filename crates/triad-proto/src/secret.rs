//! Secret-state preparation profiles.

use serde::{Deserialize, Serialize};
use triad_ir::{Circuit, QubitId};

use crate::error::{ProtoError, ProtoResult};

/// Probability of measuring 0 for the reference H-T-H secret,
/// `cos^2(pi/8)`.
pub const HTH_P0: f64 = 0.8535533905932737;

/// How the secret qubit of each instance is prepared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SecretProfile {
    /// The reference biased secret: H, T, H, yielding |0> with
    /// probability [`HTH_P0`].
    Hth,
    /// An arbitrary bias: prepare `sqrt(p0)|0> + sqrt(1-p0)|1>`, the same
    /// state for every instance. Used when characterizing reconstruction
    /// fidelity against a known bias.
    Bias(f64),
    /// A distinct bias per instance; the length must equal the instance
    /// count being built.
    PerInstance(Vec<f64>),
}

impl SecretProfile {
    /// Validate the profile against an instance count.
    pub fn check(&self, n: u32) -> ProtoResult<()> {
        match self {
            SecretProfile::Hth => Ok(()),
            SecretProfile::Bias(p0) => check_bias(*p0),
            SecretProfile::PerInstance(biases) => {
                if biases.len() != n as usize {
                    return Err(ProtoError::ArityMismatch {
                        expected: n,
                        got: biases.len(),
                    });
                }
                biases.iter().try_for_each(|&p0| check_bias(p0))
            }
        }
    }

    /// The probability of reconstructing 0 for instance `i`, assuming
    /// ideal execution.
    pub fn expected_p0(&self, i: u32) -> f64 {
        match self {
            SecretProfile::Hth => HTH_P0,
            SecretProfile::Bias(p0) => *p0,
            SecretProfile::PerInstance(biases) => biases[i as usize],
        }
    }

    /// Emit the preparation sequence for instance `i` onto `qubit`.
    pub(crate) fn prepare(&self, circuit: &mut Circuit, qubit: QubitId, i: u32) -> ProtoResult<()> {
        match self {
            SecretProfile::Hth => {
                circuit.h(qubit)?.t(qubit)?.h(qubit)?;
            }
            SecretProfile::Bias(_) | SecretProfile::PerInstance(_) => {
                let p0 = self.expected_p0(i);
                // Ry(2 acos sqrt(p0)) |0> = sqrt(p0)|0> + sqrt(1-p0)|1>
                let theta = 2.0 * p0.sqrt().acos();
                circuit.ry(theta, qubit)?;
            }
        }
        Ok(())
    }
}

fn check_bias(p0: f64) -> ProtoResult<()> {
    if !(0.0..=1.0).contains(&p0) {
        return Err(ProtoError::InvalidBias { p0 });
    }
    Ok(())
}
