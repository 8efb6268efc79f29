//! Statevector simulation engine.
//!
//! One trajectory per shot: unitary gate application, projective
//! mid-circuit measurement with collapse, and stochastic decoherence
//! jumps for noisy execution.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::PI;

use triad_ir::StandardGate;

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply a standard gate to specific qubits.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::S => self.apply_phase(qubits[0], PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            StandardGate::T => self.apply_phase(qubits[0], PI / 4.0),
            StandardGate::Tdg => self.apply_phase(qubits[0], -PI / 4.0),
            StandardGate::Rx(theta) => self.apply_rx(qubits[0], *theta),
            StandardGate::Ry(theta) => self.apply_ry(qubits[0], *theta),
            StandardGate::Rz(theta) => self.apply_rz(qubits[0], *theta),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::CZ => self.apply_cz(qubits[0], qubits[1]),
            _ => {}
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    // =========================================================================
    // Measurement and decoherence
    // =========================================================================

    /// Probability of measuring 1 on a qubit.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Measure one qubit, collapsing and renormalizing the state.
    pub fn measure(&mut self, qubit: usize, rng: &mut impl Rng) -> u8 {
        let mask = 1 << qubit;
        let p1 = self.probability_of_one(qubit);
        let outcome = u8::from(rng.r#gen::<f64>() < p1);
        let keep_set = outcome == 1;
        let norm = if keep_set { p1.sqrt() } else { (1.0 - p1).sqrt() };
        for i in 0..(1 << self.num_qubits) {
            if (i & mask != 0) != keep_set {
                self.amplitudes[i] = Complex64::new(0.0, 0.0);
            } else if norm > 0.0 {
                self.amplitudes[i] /= norm;
            }
        }
        outcome
    }

    /// One amplitude-damping trajectory step with jump probability
    /// `gamma * P(1)`.
    ///
    /// A jump moves the excited population to the ground state; the
    /// no-jump branch damps the excited amplitudes by `sqrt(1 - gamma)`
    /// and renormalizes.
    pub fn amplitude_damp(&mut self, qubit: usize, gamma: f64, rng: &mut impl Rng) {
        if gamma <= 0.0 {
            return;
        }
        let mask = 1 << qubit;
        let p1 = self.probability_of_one(qubit);
        let p_jump = gamma * p1;
        if rng.r#gen::<f64>() < p_jump {
            let norm = p1.sqrt();
            for i in 0..(1 << self.num_qubits) {
                if i & mask != 0 {
                    self.amplitudes[i & !mask] = self.amplitudes[i] / norm;
                    self.amplitudes[i] = Complex64::new(0.0, 0.0);
                }
            }
        } else {
            let damp = (1.0 - gamma).sqrt();
            let norm = (1.0 - p_jump).sqrt();
            for i in 0..(1 << self.num_qubits) {
                if i & mask != 0 {
                    self.amplitudes[i] *= damp;
                }
                if norm > 0.0 {
                    self.amplitudes[i] /= norm;
                }
            }
        }
    }

    /// One dephasing trajectory step: a Z flip with probability `pz`.
    pub fn dephase(&mut self, qubit: usize, pz: f64, rng: &mut impl Rng) {
        if pz > 0.0 && rng.r#gen::<f64>() < pz {
            self.apply_z(qubit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_ghz_state() {
        let mut sv = Statevector::new(3);
        sv.apply_h(0);
        sv.apply_cx(0, 1);
        sv.apply_cx(0, 2);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[7], Complex64::new(sqrt2_inv, 0.0)));
        for i in 1..7 {
            assert!(approx_eq(sv.amplitudes[i], Complex64::new(0.0, 0.0)));
        }
    }

    #[test]
    fn test_cz_is_symmetric() {
        let mut a = Statevector::new(2);
        a.apply_h(0);
        a.apply_h(1);
        a.apply_cz(0, 1);

        let mut b = Statevector::new(2);
        b.apply_h(0);
        b.apply_h(1);
        b.apply_cz(1, 0);

        for i in 0..4 {
            assert!(approx_eq(a.amplitudes[i], b.amplitudes[i]));
        }
    }

    #[test]
    fn test_hth_bias() {
        // H T H |0> prepares P(1) = sin^2(pi/8).
        let mut sv = Statevector::new(1);
        sv.apply_h(0);
        sv.apply_phase(0, PI / 4.0);
        sv.apply_h(0);

        let expected = (PI / 8.0).sin().powi(2);
        assert!((sv.probability_of_one(0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_measure_deterministic_state() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sv = Statevector::new(1);
        sv.apply_x(0);
        assert_eq!(sv.measure(0, &mut rng), 1);
        // Collapsed state stays |1>.
        assert_eq!(sv.measure(0, &mut rng), 1);
    }

    #[test]
    fn test_measure_collapses_entangled_pair() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut sv = Statevector::new(2);
            sv.apply_h(0);
            sv.apply_cx(0, 1);
            let first = sv.measure(0, &mut rng);
            let second = sv.measure(1, &mut rng);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_full_damping_resets_to_ground() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sv = Statevector::new(1);
        sv.apply_x(0);
        // gamma = 1 always jumps from |1>.
        sv.amplitude_damp(0, 1.0, &mut rng);
        assert!((sv.probability_of_one(0)).abs() < 1e-12);
    }

    #[test]
    fn test_damping_preserves_norm() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);
        sv.amplitude_damp(0, 0.3, &mut rng);
        let norm_sq: f64 = sv.amplitudes.iter().map(|a| a.norm_sqr()).sum();
        assert!((norm_sq - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_certain_dephasing_flips_phase() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sv = Statevector::new(1);
        sv.apply_h(0);
        sv.dephase(0, 1.0, &mut rng);
        // |+> became |->; a second H lands on |1>.
        sv.apply_h(0);
        assert!((sv.probability_of_one(0) - 1.0).abs() < 1e-12);
    }
}
