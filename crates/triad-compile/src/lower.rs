//! Lowering into the native gate basis.
//!
//! Noisy execution models decoherence per hardware pulse, so it only
//! accepts circuits already expressed in the native basis
//! `{i, rx, rz, cz}`. [`lower_to_native`] rewrites an arbitrary circuit
//! into that basis, preserving instruction order, classical registers,
//! and classical conditions. Global phase is not tracked; it is
//! unobservable in outcome statistics, conditioned or not.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use triad_ir::{Circuit, Gate, Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::{CompileError, CompileResult};

/// The native gate basis shared by noise-modelling backends.
pub const NATIVE_GATES: [&str; 4] = ["i", "rx", "rz", "cz"];

fn is_native_gate(gate: &StandardGate) -> bool {
    matches!(
        gate,
        StandardGate::I | StandardGate::Rx(_) | StandardGate::Rz(_) | StandardGate::CZ
    )
}

/// Check whether every gate in the circuit is already native.
///
/// Measures, barriers, and placement hints are basis-neutral and never
/// disqualify a circuit.
pub fn is_native(circuit: &Circuit) -> bool {
    circuit
        .ops()
        .iter()
        .filter_map(|inst| inst.as_gate())
        .all(|g| is_native_gate(&g.kind))
}

/// Decomposition of a single-qubit gate, in application order.
///
/// Each entry is native. Matrix identities, up to global phase:
/// `H = Rz(pi/2) Rx(pi/2) Rz(pi/2)` and `Ry(t) = Rz(pi/2) Rx(t) Rz(-pi/2)`
/// (rightmost factor applied first).
fn lower_single(gate: &StandardGate) -> CompileResult<Vec<StandardGate>> {
    use StandardGate::*;
    Ok(match gate {
        I | Rx(_) | Rz(_) => vec![*gate],
        X => vec![Rx(PI)],
        Y => vec![Rx(PI), Rz(PI)],
        Z => vec![Rz(PI)],
        S => vec![Rz(FRAC_PI_2)],
        Sdg => vec![Rz(-FRAC_PI_2)],
        T => vec![Rz(FRAC_PI_4)],
        Tdg => vec![Rz(-FRAC_PI_4)],
        H => vec![Rz(FRAC_PI_2), Rx(FRAC_PI_2), Rz(FRAC_PI_2)],
        Ry(theta) => vec![Rz(-FRAC_PI_2), Rx(*theta), Rz(FRAC_PI_2)],
        other => return Err(CompileError::UnsupportedGate(other.name().to_string())),
    })
}

fn emit_single(
    lowered: &mut Circuit,
    gate: &Gate,
    kinds: Vec<StandardGate>,
    qubit: QubitId,
) -> CompileResult<()> {
    for kind in kinds {
        let mut native = Gate::standard(kind);
        if let Some(cond) = gate.condition {
            native = native.with_condition(cond);
        }
        lowered.apply(Instruction::gate(native, [qubit]))?;
    }
    Ok(())
}

/// Rewrite a circuit into the native basis.
///
/// The result has the same name, qubit count, and classical-register
/// layout, and its instruction sequence realizes the same operation in
/// the same order. A conditional gate lowers to the same decomposition
/// with the condition attached to every emitted gate; the classical
/// branch applies the whole sequence or none of it.
pub fn lower_to_native(circuit: &Circuit) -> CompileResult<Circuit> {
    let mut lowered = Circuit::new(circuit.name(), circuit.num_qubits());
    for creg in circuit.cregs() {
        lowered.declare_creg(creg.name.clone(), creg.size)?;
    }

    for inst in circuit.ops() {
        match &inst.kind {
            InstructionKind::Gate(gate) => match gate.kind {
                _ if gate.num_qubits() == 1 => {
                    let kinds = lower_single(&gate.kind)?;
                    emit_single(&mut lowered, gate, kinds, inst.qubits[0])?;
                }
                StandardGate::CZ => {
                    lowered.apply(inst.clone())?;
                }
                StandardGate::CX => {
                    // CX(c, t) = (I ⊗ H) CZ(c, t) (I ⊗ H)
                    let (control, target) = (inst.qubits[0], inst.qubits[1]);
                    let h = lower_single(&StandardGate::H)?;
                    emit_single(&mut lowered, gate, h.clone(), target)?;
                    let mut cz = Gate::standard(StandardGate::CZ);
                    if let Some(cond) = gate.condition {
                        cz = cz.with_condition(cond);
                    }
                    lowered.apply(Instruction::gate(cz, [control, target]))?;
                    emit_single(&mut lowered, gate, h, target)?;
                }
                other => {
                    return Err(CompileError::UnsupportedGate(other.name().to_string()));
                }
            },
            _ => {
                lowered.apply(inst.clone())?;
            }
        }
    }
    Ok(lowered)
}
