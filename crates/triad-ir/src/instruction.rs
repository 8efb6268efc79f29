//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{ClassicalCondition, Gate, StandardGate};
use crate::qubit::{ClbitId, QubitId};

/// Qubit placement strategy hint for a routing backend.
///
/// A no-op annotation: backends that route logical qubits onto a device
/// topology may use it to pick their rewiring strategy, all others ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementStrategy {
    /// Greedy rewiring.
    Greedy,
    /// Naive (identity) placement.
    Naive,
    /// Partial rewiring.
    Partial,
    /// Randomized placement.
    Random,
}

impl PlacementStrategy {
    /// Backend-facing name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            PlacementStrategy::Greedy => "greedy",
            PlacementStrategy::Naive => "naive",
            PlacementStrategy::Partial => "partial",
            PlacementStrategy::Random => "random",
        }
    }
}

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation, possibly classically conditioned.
    Gate(Gate),
    /// Measurement operation.
    Measure,
    /// Barrier (synchronization point).
    Barrier,
    /// Placement hint for the execution backend's routing strategy.
    PlacementHint {
        /// The advised rewiring strategy.
        strategy: PlacementStrategy,
    },
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction operates on (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a gate applied only when `clbit` measured 1.
    pub fn conditional_gate(gate: StandardGate, qubit: QubitId, clbit: ClbitId) -> Self {
        Self::gate(
            Gate::standard(gate).with_condition(ClassicalCondition::new(clbit)),
            [qubit],
        )
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a placement hint instruction.
    pub fn placement_hint(strategy: PlacementStrategy) -> Self {
        Self {
            kind: InstructionKind::PlacementHint { strategy },
            qubits: vec![],
            clbits: vec![],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Check if this is a placement hint.
    pub fn is_placement_hint(&self) -> bool {
        matches!(self.kind, InstructionKind::PlacementHint { .. })
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Get the classical condition, if the instruction carries one.
    pub fn condition(&self) -> Option<ClassicalCondition> {
        self.as_gate().and_then(|g| g.condition)
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
            InstructionKind::PlacementHint { .. } => "placement_hint",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
        assert!(inst.condition().is_none());
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(0), ClbitId(0));
        assert!(inst.is_measure());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.clbits.len(), 1);
    }

    #[test]
    fn test_conditional_instruction() {
        let inst = Instruction::conditional_gate(StandardGate::Z, QubitId(3), ClbitId(1));
        assert!(inst.is_gate());
        assert_eq!(inst.condition(), Some(ClassicalCondition::new(ClbitId(1))));
    }

    #[test]
    fn test_placement_hint() {
        let inst = Instruction::placement_hint(PlacementStrategy::Greedy);
        assert!(inst.is_placement_hint());
        assert!(inst.qubits.is_empty());
        assert_eq!(inst.name(), "placement_hint");
    }
}
