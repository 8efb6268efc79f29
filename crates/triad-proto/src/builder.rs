//! Protocol circuit construction.
//!
//! One instance of the protocol runs four roles through five phases:
//! secret preparation, GHZ preparation, a Bell measurement by Alice on
//! the secret and her GHZ qubit, an X-basis measurement by Bob, and a
//! reconstruction on Charlie's qubit followed by the final measurement.
//! `n` instances are batched into one circuit over `4n` qubits.
//!
//! Reconstruction comes in two flavors. The *classical* mode measures
//! Alice and Bob mid-circuit and applies corrections conditioned on their
//! bits; it is the full protocol and declares `alice_m` (2n), `bob_m` (n)
//! and `ro` (n). The *coherent* mode defers the corrections to unitaries
//! (CNOT and two CZ) and declares only `ro`; decoherence studies and
//! state tomography use it because the classical registers would otherwise
//! dominate the readout.

use serde::{Deserialize, Serialize};
use triad_ir::{Circuit, PlacementStrategy, StandardGate};

use crate::error::ProtoResult;
use crate::role::{RegisterMap, Role};
use crate::secret::SecretProfile;

/// How Charlie's correction operations are realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CorrectionMode {
    /// Measure Alice and Bob, then classically conditioned X/Z/Z.
    #[default]
    Classical,
    /// Unitary corrections (CNOT, CZ, CZ); no mid-circuit measurement.
    Coherent,
}

/// Construction options for the protocol builder.
#[derive(Debug, Clone, Default)]
pub struct ProtocolOptions {
    /// Correction realization.
    pub correction: CorrectionMode,
    /// Optional routing advisory emitted at the head of the circuit.
    pub placement_hint: Option<PlacementStrategy>,
    /// Role-to-qubit mapping override (device targeting). Identity striped
    /// layout when absent.
    pub registers: Option<RegisterMap>,
}

/// One measurement basis for state tomography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasurementBasis {
    /// Pauli-X basis (Hadamard before measurement).
    X,
    /// Pauli-Y basis (S-dagger then Hadamard before measurement).
    Y,
    /// Computational (Pauli-Z) basis.
    Z,
}

impl MeasurementBasis {
    /// Basis label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            MeasurementBasis::X => "X",
            MeasurementBasis::Y => "Y",
            MeasurementBasis::Z => "Z",
        }
    }
}

/// Build the `n`-instance protocol circuit with classical corrections and
/// the identity striped register layout.
pub fn build(n: u32, secret: &SecretProfile) -> ProtoResult<Circuit> {
    build_with(n, secret, ProtocolOptions::default())
}

/// Build the `n`-instance protocol circuit with explicit options.
///
/// Referentially transparent: the same inputs produce a structurally
/// identical circuit.
pub fn build_with(n: u32, secret: &SecretProfile, options: ProtocolOptions) -> ProtoResult<Circuit> {
    let registers = match options.registers {
        Some(map) => map,
        None => RegisterMap::allocate(n)?,
    };
    secret.check(registers.instances())?;
    let n = registers.instances();

    let mut circuit = Circuit::new(circuit_name(n, options.correction), registers.num_qubits());
    if let Some(strategy) = options.placement_hint {
        circuit.placement_hint(strategy)?;
    }

    let cregs = match options.correction {
        CorrectionMode::Classical => Some((
            circuit.declare_creg("alice_m", 2 * n)?,
            circuit.declare_creg("bob_m", n)?,
        )),
        CorrectionMode::Coherent => None,
    };
    let ro = circuit.declare_creg("ro", n)?;

    for i in 0..n {
        let sec = registers.qubit(Role::Secret, i);
        let alice = registers.qubit(Role::Alice, i);
        let bob = registers.qubit(Role::Bob, i);
        let charlie = registers.qubit(Role::Charlie, i);

        secret.prepare(&mut circuit, sec, i)?;

        // GHZ state shared by Alice, Bob and Charlie.
        circuit.h(alice)?.cx(alice, bob)?.cx(alice, charlie)?;

        // Alice measures the secret and her GHZ qubit in the Bell basis.
        circuit.cx(sec, alice)?.h(sec)?;

        // Bob measures his GHZ qubit in the X basis.
        circuit.h(bob)?;

        match &cregs {
            Some((alice_m, bob_m)) => {
                circuit.measure(sec, alice_m[(2 * i) as usize])?;
                circuit.measure(alice, alice_m[(2 * i + 1) as usize])?;
                circuit.measure(bob, bob_m[i as usize])?;

                // Charlie reconstructs from Alice's and Bob's bits. The
                // X/Z/Z order is fixed; X and Z do not commute.
                circuit.gate_if(alice_m[(2 * i + 1) as usize], StandardGate::X, charlie)?;
                circuit.gate_if(alice_m[(2 * i) as usize], StandardGate::Z, charlie)?;
                circuit.gate_if(bob_m[i as usize], StandardGate::Z, charlie)?;
            }
            None => {
                circuit.cx(alice, charlie)?;
                circuit.cz(sec, charlie)?;
                circuit.cz(bob, charlie)?;
            }
        }

        circuit.measure(charlie, ro[i as usize])?;
    }

    Ok(circuit)
}

/// Build the single-instance tomography circuit: the coherent protocol
/// without the final Z-basis measurement, a basis change on Charlie's
/// qubit, then a measurement into a one-bit `ro` register.
pub fn build_tomography(secret: &SecretProfile, basis: MeasurementBasis) -> ProtoResult<Circuit> {
    let registers = RegisterMap::allocate(1)?;
    secret.check(1)?;

    let mut circuit = Circuit::new(format!("hbb_tomography_{}", basis.label()), 4);
    let ro = circuit.declare_creg("ro", 1)?;

    let sec = registers.qubit(Role::Secret, 0);
    let alice = registers.qubit(Role::Alice, 0);
    let bob = registers.qubit(Role::Bob, 0);
    let charlie = registers.qubit(Role::Charlie, 0);

    secret.prepare(&mut circuit, sec, 0)?;
    circuit.h(alice)?.cx(alice, bob)?.cx(alice, charlie)?;
    circuit.cx(sec, alice)?.h(sec)?;
    circuit.h(bob)?;
    circuit.cx(alice, charlie)?;
    circuit.cz(sec, charlie)?;
    circuit.cz(bob, charlie)?;

    match basis {
        MeasurementBasis::X => {
            circuit.h(charlie)?;
        }
        MeasurementBasis::Y => {
            circuit.sdg(charlie)?.h(charlie)?;
        }
        MeasurementBasis::Z => {}
    }
    circuit.measure(charlie, ro[0])?;

    Ok(circuit)
}

/// Outcome-matrix column holding the reconstructed secret of instance `i`
/// in a classical-correction circuit (`alice_m` and `bob_m` come first).
pub fn output_column(n: u32, i: u32) -> usize {
    debug_assert!(i < n);
    (3 * n + i) as usize
}

/// Outcome-matrix column of instance `i` in a coherent-correction circuit
/// (only `ro` is declared).
pub fn coherent_output_column(i: u32) -> usize {
    i as usize
}

fn circuit_name(n: u32, correction: CorrectionMode) -> String {
    match correction {
        CorrectionMode::Classical => format!("hbb_{n}"),
        CorrectionMode::Coherent => format!("hbb_coherent_{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtoError;
    use triad_ir::InstructionKind;

    #[test]
    fn test_classical_register_widths() {
        let circuit = build(3, &SecretProfile::Hth).unwrap();
        assert_eq!(circuit.creg("alice_m").unwrap().size, 6);
        assert_eq!(circuit.creg("bob_m").unwrap().size, 3);
        assert_eq!(circuit.creg("ro").unwrap().size, 3);
        assert_eq!(circuit.num_clbits(), 12);
    }

    #[test]
    fn test_qubit_envelope() {
        for n in 1..=5 {
            let circuit = build(n, &SecretProfile::Hth).unwrap();
            assert_eq!(circuit.num_qubits(), 4 * n);
            assert_eq!(circuit.max_qubit_index(), Some(4 * n - 1));
            assert_eq!(circuit.num_clbits(), 4 * n);
        }
    }

    #[test]
    fn test_invalid_arity() {
        assert!(matches!(
            build(0, &SecretProfile::Hth),
            Err(ProtoError::InvalidArity { n: 0 })
        ));
    }

    #[test]
    fn test_profile_arity_mismatch() {
        let profile = SecretProfile::PerInstance(vec![0.3]);
        assert!(matches!(
            build(2, &profile),
            Err(ProtoError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn test_referential_transparency() {
        let a = build(2, &SecretProfile::Hth).unwrap();
        let b = build(2, &SecretProfile::Hth).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_correction_order() {
        let circuit = build(1, &SecretProfile::Hth).unwrap();
        let conditioned: Vec<_> = circuit
            .ops()
            .iter()
            .filter(|op| op.condition().is_some())
            .collect();
        assert_eq!(conditioned.len(), 3);
        assert_eq!(conditioned[0].name(), "x");
        assert_eq!(conditioned[1].name(), "z");
        assert_eq!(conditioned[2].name(), "z");
        // X on alice bit 1, Z on alice bit 0, Z on bob bit.
        assert_eq!(conditioned[0].condition().unwrap().clbit.0, 1);
        assert_eq!(conditioned[1].condition().unwrap().clbit.0, 0);
        assert_eq!(conditioned[2].condition().unwrap().clbit.0, 2);
    }

    #[test]
    fn test_coherent_mode_declares_only_ro() {
        let circuit = build_with(
            2,
            &SecretProfile::Hth,
            ProtocolOptions {
                correction: CorrectionMode::Coherent,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(circuit.cregs().len(), 1);
        assert_eq!(circuit.num_clbits(), 2);
        assert!(circuit.ops().iter().all(|op| op.condition().is_none()));
        // One measure per instance, at the very end of each block.
        let measures = circuit.ops().iter().filter(|op| op.is_measure()).count();
        assert_eq!(measures, 2);
    }

    #[test]
    fn test_placement_hint_leads() {
        let circuit = build_with(
            1,
            &SecretProfile::Hth,
            ProtocolOptions {
                placement_hint: Some(PlacementStrategy::Greedy),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(matches!(
            circuit.ops()[0].kind,
            InstructionKind::PlacementHint { .. }
        ));
    }

    #[test]
    fn test_physical_register_override() {
        let map = RegisterMap::with_physical(1, vec![4, 2, 7, 0]).unwrap();
        let circuit = build_with(
            1,
            &SecretProfile::Hth,
            ProtocolOptions {
                registers: Some(map),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(circuit.num_qubits(), 8);
        assert_eq!(circuit.max_qubit_index(), Some(7));
    }

    #[test]
    fn test_tomography_variants() {
        for basis in [MeasurementBasis::X, MeasurementBasis::Y, MeasurementBasis::Z] {
            let circuit = build_tomography(&SecretProfile::Hth, basis).unwrap();
            assert_eq!(circuit.num_clbits(), 1);
            assert_eq!(
                circuit.ops().iter().filter(|op| op.is_measure()).count(),
                1
            );
        }
        // X adds one basis-change gate relative to Z, Y adds two.
        let z = build_tomography(&SecretProfile::Hth, MeasurementBasis::Z).unwrap();
        let x = build_tomography(&SecretProfile::Hth, MeasurementBasis::X).unwrap();
        let y = build_tomography(&SecretProfile::Hth, MeasurementBasis::Y).unwrap();
        assert_eq!(x.ops().len(), z.ops().len() + 1);
        assert_eq!(y.ops().len(), z.ops().len() + 2);
    }

    #[test]
    fn test_output_columns() {
        assert_eq!(output_column(2, 0), 6);
        assert_eq!(output_column(2, 1), 7);
        assert_eq!(coherent_output_column(1), 1);
    }
}
