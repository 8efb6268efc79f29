//! Simulator backend implementation.

use async_trait::async_trait;
use rand::Rng;
use std::time::Instant;
use tracing::{debug, instrument};

use triad_hal::{Capabilities, Executor, HalError, HalResult, OutcomeMatrix};
use triad_ir::{Circuit, InstructionKind, NoiseParameters};

use crate::statevector::Statevector;

/// Assumed wall-clock duration of a single-qubit gate.
const GATE_TIME_1Q: f64 = 50e-9;
/// Assumed wall-clock duration of a two-qubit gate.
const GATE_TIME_2Q: f64 = 150e-9;

/// Per-gate decoherence probabilities derived from [`NoiseParameters`].
struct NoiseModel {
    gamma_1q: f64,
    gamma_2q: f64,
    pz_1q: f64,
    pz_2q: f64,
    ro_error: f64,
}

impl NoiseModel {
    fn new(params: &NoiseParameters) -> Self {
        let gamma = |dt: f64| 1.0 - (-dt / params.t1).exp();
        // Pure dephasing rate: 1/t_phi = 1/t2 - 1/(2*t1), zero at the
        // t2 = 2*t1 physical bound.
        let phi_rate = (1.0 / params.t2 - 1.0 / (2.0 * params.t1)).max(0.0);
        let pz = |dt: f64| 0.5 * (1.0 - (-dt * phi_rate).exp());
        Self {
            gamma_1q: gamma(GATE_TIME_1Q),
            gamma_2q: gamma(GATE_TIME_2Q),
            pz_1q: pz(GATE_TIME_1Q),
            pz_2q: pz(GATE_TIME_2Q),
            ro_error: 1.0 - params.ro_fidelity,
        }
    }

    fn after_gate(&self, sv: &mut Statevector, qubits: &[usize], rng: &mut impl Rng) {
        let (gamma, pz) = if qubits.len() == 2 {
            (self.gamma_2q, self.pz_2q)
        } else {
            (self.gamma_1q, self.pz_1q)
        };
        for &q in qubits {
            sv.amplitude_damp(q, gamma, rng);
            sv.dephase(q, pz, rng);
        }
    }
}

/// Local statevector simulator.
///
/// Executes one trajectory per shot, so mid-circuit measurement,
/// classically conditioned gates, and stochastic decoherence all behave
/// per shot the way a hardware run would. Memory limits circuits to
/// roughly 20 qubits.
pub struct SimulatorExecutor {
    caps: Capabilities,
}

impl SimulatorExecutor {
    /// Create a simulator with the default qubit limit.
    pub fn new() -> Self {
        Self::with_max_qubits(20)
    }

    /// Create a simulator with a custom qubit limit.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            caps: Capabilities::simulator(max_qubits),
        }
    }

    fn validate(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        if shots == 0 || shots > self.caps.max_shots {
            return Err(HalError::InvalidShots { shots });
        }
        if circuit.num_qubits() > self.caps.num_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but simulator supports {}",
                circuit.num_qubits(),
                self.caps.num_qubits
            )));
        }
        Ok(())
    }

    fn check_native(&self, circuit: &Circuit) -> HalResult<()> {
        for inst in circuit.ops() {
            if let Some(gate) = inst.as_gate() {
                if !self.caps.supports_gate(gate.name()) {
                    return Err(HalError::Unsupported(format!(
                        "noisy execution requires the native basis {:?}, circuit contains '{}'",
                        self.caps.native_gates,
                        gate.name()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Execute one shot, returning the classical bits in column order.
    fn run_shot(
        &self,
        circuit: &Circuit,
        noise: Option<&NoiseModel>,
        rng: &mut impl Rng,
    ) -> Vec<u8> {
        let mut sv = Statevector::new(circuit.num_qubits() as usize);
        let mut bits = vec![0u8; circuit.num_clbits() as usize];
        for inst in circuit.ops() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    if let Some(cond) = gate.condition {
                        if bits[cond.clbit.0 as usize] == 0 {
                            continue;
                        }
                    }
                    let qubits: Vec<usize> = inst.qubits.iter().map(|q| q.0 as usize).collect();
                    sv.apply_gate(&gate.kind, &qubits);
                    if let Some(noise) = noise {
                        noise.after_gate(&mut sv, &qubits, rng);
                    }
                }
                InstructionKind::Measure => {
                    let qubit = inst.qubits[0].0 as usize;
                    let mut bit = sv.measure(qubit, rng);
                    if let Some(noise) = noise {
                        if rng.r#gen::<f64>() < noise.ro_error {
                            bit ^= 1;
                        }
                    }
                    bits[inst.clbits[0].0 as usize] = bit;
                }
                InstructionKind::Barrier | InstructionKind::PlacementHint { .. } => {}
            }
        }
        bits
    }

    #[instrument(skip(self, circuit, noise), fields(circuit = circuit.name()))]
    fn sample(
        &self,
        circuit: &Circuit,
        shots: u32,
        noise: Option<&NoiseModel>,
    ) -> HalResult<OutcomeMatrix> {
        let start = Instant::now();
        let width = circuit.num_clbits() as usize;
        let mut rng = rand::thread_rng();
        let rows = (0..shots)
            .map(|_| self.run_shot(circuit, noise, &mut rng))
            .collect();
        let outcomes = OutcomeMatrix::from_rows(width, rows)?;
        debug!(shots, elapsed = ?start.elapsed(), "simulation complete");
        Ok(outcomes)
    }
}

impl Default for SimulatorExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Executor for SimulatorExecutor {
    fn name(&self) -> &str {
        &self.caps.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<OutcomeMatrix> {
        self.validate(circuit, shots)?;
        self.sample(circuit, shots, None)
    }

    async fn run_noisy(
        &self,
        circuit: &Circuit,
        shots: u32,
        noise: &NoiseParameters,
    ) -> HalResult<OutcomeMatrix> {
        self.validate(circuit, shots)?;
        self.check_native(circuit)?;
        self.sample(circuit, shots, Some(&NoiseModel::new(noise)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triad_ir::QubitId;

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let sim = SimulatorExecutor::new();
        let circuit = Circuit::new("empty", 1);
        assert!(matches!(
            sim.run(&circuit, 0).await,
            Err(HalError::InvalidShots { shots: 0 })
        ));
    }

    #[tokio::test]
    async fn test_oversized_circuit_rejected() {
        let sim = SimulatorExecutor::with_max_qubits(2);
        let circuit = Circuit::new("big", 3);
        assert!(matches!(
            sim.run(&circuit, 10).await,
            Err(HalError::CircuitTooLarge(_))
        ));
    }

    #[tokio::test]
    async fn test_noisy_rejects_nonnative_circuit() {
        let sim = SimulatorExecutor::new();
        let mut circuit = Circuit::new("bell", 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let noise = NoiseParameters::new(30e-6, 20e-6, 0.95).unwrap();
        assert!(matches!(
            sim.run_noisy(&circuit, 10, &noise).await,
            Err(HalError::Unsupported(_))
        ));
    }

    #[tokio::test]
    async fn test_bell_pair_correlations() {
        let sim = SimulatorExecutor::new();
        let mut circuit = Circuit::new("bell", 2);
        let ro = circuit.declare_creg("ro", 2).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure(QubitId(0), ro[0]).unwrap();
        circuit.measure(QubitId(1), ro[1]).unwrap();

        let out = sim.run(&circuit, 500).await.unwrap();
        assert_eq!(out.shots(), 500);
        assert_eq!(out.width(), 2);
        for row in out.rows() {
            assert_eq!(row[0], row[1]);
        }
        // Both outcomes appear with roughly equal frequency.
        let ones = out.ones_in_column(0).unwrap();
        assert!(ones > 150 && ones < 350, "ones = {ones}");
    }

    #[tokio::test]
    async fn test_conditional_gate_reads_shot_bits() {
        let sim = SimulatorExecutor::new();
        let mut circuit = Circuit::new("feedforward", 2);
        let m = circuit.declare_creg("m", 1).unwrap();
        let ro = circuit.declare_creg("ro", 1).unwrap();
        circuit.x(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), m[0]).unwrap();
        circuit
            .gate_if(m[0], triad_ir::StandardGate::X, QubitId(1))
            .unwrap();
        circuit.measure(QubitId(1), ro[0]).unwrap();

        let out = sim.run(&circuit, 100).await.unwrap();
        assert_eq!(out.ones_in_column(0), Some(100));
        assert_eq!(out.ones_in_column(1), Some(100));
    }

    #[tokio::test]
    async fn test_zero_readout_fidelity_inverts_outcomes() {
        let sim = SimulatorExecutor::new();
        let mut circuit = Circuit::new("ground", 1);
        let ro = circuit.declare_creg("ro", 1).unwrap();
        circuit.measure(QubitId(0), ro[0]).unwrap();

        // Long coherence times so only readout error acts.
        let noise = NoiseParameters::new(1.0, 1.0, 0.0).unwrap();
        let out = sim.run_noisy(&circuit, 200, &noise).await.unwrap();
        assert_eq!(out.ones_in_column(0), Some(200));
    }

    #[tokio::test]
    async fn test_heavy_decoherence_relaxes_excited_qubit() {
        let sim = SimulatorExecutor::new();
        let mut circuit = Circuit::new("decay", 1);
        let ro = circuit.declare_creg("ro", 1).unwrap();
        // Native X, then a long idle ladder of identity gates.
        circuit.rx(std::f64::consts::PI, QubitId(0)).unwrap();
        for _ in 0..200 {
            circuit
                .apply(triad_ir::Instruction::single_qubit_gate(
                    triad_ir::StandardGate::I,
                    QubitId(0),
                ))
                .unwrap();
        }
        circuit.measure(QubitId(0), ro[0]).unwrap();

        // T1 comparable to one gate time: the qubit decays almost surely.
        let noise = NoiseParameters::new(50e-9, 50e-9, 1.0).unwrap();
        let out = sim.run_noisy(&circuit, 200, &noise).await.unwrap();
        let ones = out.ones_in_column(0).unwrap();
        assert!(ones < 20, "ones = {ones}");
    }
}
