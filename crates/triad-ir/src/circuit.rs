//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind, PlacementStrategy};
use crate::qubit::{Clbit, ClbitId, QubitId};

/// A named, fixed-width classical register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalRegister {
    /// Register name.
    pub name: String,
    /// Number of bits.
    pub size: u32,
    /// Global id of the register's first bit (its outcome column).
    pub offset: u32,
}

/// A quantum circuit: an ordered instruction sequence plus the
/// classical-register declaration table.
///
/// Instructions are validated as they are applied: qubit and classical-bit
/// references must be in range, and a classically conditioned gate must
/// reference a bit some earlier measure writes. Once handed to a backend
/// the circuit is read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Declared classical registers, in declaration order.
    cregs: Vec<ClassicalRegister>,
    /// Declared classical bits, in declaration order.
    clbits: Vec<Clbit>,
    /// The ordered instruction sequence.
    ops: Vec<Instruction>,
}

impl Circuit {
    /// Create a new circuit with a fixed number of qubits and no
    /// classical registers.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            cregs: vec![],
            clbits: vec![],
            ops: vec![],
        }
    }

    /// Declare a classical register and return the ids of its bits.
    ///
    /// Declaration order fixes the outcome-matrix column layout: the bits
    /// of the first declared register occupy the first columns, and so on.
    pub fn declare_creg(&mut self, name: impl Into<String>, size: u32) -> IrResult<Vec<ClbitId>> {
        let name = name.into();
        if self.cregs.iter().any(|r| r.name == name) {
            return Err(IrError::DuplicateRegister(name));
        }
        let offset = self.clbits.len() as u32;
        let mut ids = Vec::with_capacity(size as usize);
        for i in 0..size {
            let id = ClbitId(offset + i);
            self.clbits.push(Clbit::new(id, &name, i));
            ids.push(id);
        }
        self.cregs.push(ClassicalRegister { name, size, offset });
        Ok(ids)
    }

    /// Append a validated instruction.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: instruction.name().to_string(),
                });
            }
        }
        for &clbit in &instruction.clbits {
            self.check_clbit(clbit)?;
        }
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let got = instruction.qubits.len() as u32;
            if got != gate.num_qubits() {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: gate.num_qubits(),
                    got,
                });
            }
            if let Some(cond) = gate.condition {
                self.check_clbit(cond.clbit)?;
                if !self.is_written(cond.clbit) {
                    return Err(IrError::UnmeasuredCondition { clbit: cond.clbit });
                }
            }
        }
        self.ops.push(instruction);
        Ok(self)
    }

    fn check_clbit(&self, clbit: ClbitId) -> IrResult<()> {
        if clbit.0 as usize >= self.clbits.len() {
            return Err(IrError::ClbitNotFound {
                clbit,
                num_clbits: self.clbits.len() as u32,
            });
        }
        Ok(())
    }

    /// Whether any instruction so far measures into `clbit`.
    fn is_written(&self, clbit: ClbitId) -> bool {
        self.ops
            .iter()
            .any(|op| op.is_measure() && op.clbits.contains(&clbit))
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rx(theta),
            qubit,
        ))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Ry(theta),
            qubit,
        ))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta),
            qubit,
        ))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply a gate only when a measured classical bit holds 1.
    pub fn gate_if(
        &mut self,
        clbit: ClbitId,
        gate: StandardGate,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::conditional_gate(gate, qubit, clbit))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Advise the backend's qubit-routing strategy. No-op on backends
    /// without routing.
    pub fn placement_hint(&mut self, strategy: PlacementStrategy) -> IrResult<&mut Self> {
        self.apply(Instruction::placement_hint(strategy))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the total number of declared classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.clbits.len() as u32
    }

    /// Get the declared classical registers, in declaration order.
    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Look up a classical register by name.
    pub fn creg(&self, name: &str) -> Option<&ClassicalRegister> {
        self.cregs.iter().find(|r| r.name == name)
    }

    /// Get the declared classical bits, in declaration (column) order.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    /// Get the ordered instruction sequence.
    pub fn ops(&self) -> &[Instruction] {
        &self.ops
    }

    /// Highest qubit index any instruction references, if any.
    pub fn max_qubit_index(&self) -> Option<u32> {
        self.ops
            .iter()
            .flat_map(|inst| inst.qubits.iter().map(|q| q.0))
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::ClassicalCondition;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test", 3);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.ops().is_empty());
    }

    #[test]
    fn test_declare_cregs_in_order() {
        let mut circuit = Circuit::new("test", 4);
        let a = circuit.declare_creg("alice_m", 2).unwrap();
        let b = circuit.declare_creg("bob_m", 1).unwrap();
        let ro = circuit.declare_creg("ro", 1).unwrap();

        assert_eq!(a, vec![ClbitId(0), ClbitId(1)]);
        assert_eq!(b, vec![ClbitId(2)]);
        assert_eq!(ro, vec![ClbitId(3)]);
        assert_eq!(circuit.num_clbits(), 4);
        assert_eq!(circuit.creg("bob_m").unwrap().offset, 2);
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let mut circuit = Circuit::new("test", 1);
        circuit.declare_creg("ro", 1).unwrap();
        assert!(matches!(
            circuit.declare_creg("ro", 2),
            Err(IrError::DuplicateRegister(_))
        ));
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::new("bell", 2);
        let c = circuit.declare_creg("ro", 2).unwrap();
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), c[0])
            .unwrap()
            .measure(QubitId(1), c[1])
            .unwrap();
        assert_eq!(circuit.ops().len(), 4);
        assert_eq!(circuit.max_qubit_index(), Some(1));
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::new("test", 2);
        assert!(matches!(
            circuit.h(QubitId(2)),
            Err(IrError::QubitNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        let mut circuit = Circuit::new("test", 2);
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(0));
        assert!(matches!(
            circuit.apply(inst),
            Err(IrError::DuplicateQubit { .. })
        ));
    }

    #[test]
    fn test_condition_requires_prior_measure() {
        let mut circuit = Circuit::new("test", 2);
        let c = circuit.declare_creg("m", 1).unwrap();

        // Conditioning on an unwritten bit is rejected.
        assert!(matches!(
            circuit.gate_if(c[0], StandardGate::X, QubitId(1)),
            Err(IrError::UnmeasuredCondition { .. })
        ));

        // After a measure it is accepted.
        circuit.measure(QubitId(0), c[0]).unwrap();
        circuit.gate_if(c[0], StandardGate::X, QubitId(1)).unwrap();

        let last = circuit.ops().last().unwrap();
        assert_eq!(last.condition(), Some(ClassicalCondition::new(c[0])));
    }

    #[test]
    fn test_condition_on_undeclared_bit() {
        let mut circuit = Circuit::new("test", 1);
        assert!(matches!(
            circuit.gate_if(ClbitId(0), StandardGate::Z, QubitId(0)),
            Err(IrError::ClbitNotFound { .. })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut circuit = Circuit::new("bell", 2);
        let c = circuit.declare_creg("ro", 2).unwrap();
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), c[0])
            .unwrap()
            .gate_if(c[0], StandardGate::X, QubitId(1))
            .unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }
}
