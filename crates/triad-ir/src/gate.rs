//! Gate definitions and classical conditions.

use serde::{Deserialize, Serialize};

use crate::qubit::ClbitId;

/// The standard gate set used by the protocol circuits.
///
/// Rotation angles are concrete `f64` radians; nothing in the protocol
/// layer needs symbolic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum StandardGate {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// S (phase) gate.
    S,
    /// S-dagger.
    Sdg,
    /// T gate.
    T,
    /// T-dagger.
    Tdg,
    /// X rotation.
    Rx(f64),
    /// Y rotation.
    Ry(f64),
    /// Z rotation.
    Rz(f64),
    /// Controlled-NOT.
    CX,
    /// Controlled-Z.
    CZ,
}

impl StandardGate {
    /// OpenQASM-style lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "i",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
        }
    }

    /// Number of qubits this gate acts on.
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::CX | StandardGate::CZ => 2,
            _ => 1,
        }
    }
}

/// A condition gating a quantum operation on a measured classical bit.
///
/// The gated operation is applied when the referenced bit holds 1 and
/// skipped otherwise; there is no else-branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    /// The classical bit the operation is gated on.
    pub clbit: ClbitId,
}

impl ClassicalCondition {
    /// Create a condition on a single classical bit.
    pub fn new(clbit: ClbitId) -> Self {
        Self { clbit }
    }
}

/// A gate together with an optional classical condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The gate to apply.
    pub kind: StandardGate,
    /// Optional classical condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ClassicalCondition>,
}

impl Gate {
    /// Create an unconditional gate.
    pub fn standard(kind: StandardGate) -> Self {
        Self {
            kind,
            condition: None,
        }
    }

    /// Attach a classical condition to the gate.
    #[must_use]
    pub fn with_condition(mut self, condition: ClassicalCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<StandardGate> for Gate {
    fn from(kind: StandardGate) -> Self {
        Gate::standard(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_names() {
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::Rx(1.0).name(), "rx");
        assert_eq!(StandardGate::CZ.name(), "cz");
    }

    #[test]
    fn test_gate_arity() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
    }

    #[test]
    fn test_conditioned_gate() {
        let gate = Gate::standard(StandardGate::X).with_condition(ClassicalCondition::new(
            ClbitId(3),
        ));
        assert_eq!(gate.name(), "x");
        assert_eq!(gate.condition, Some(ClassicalCondition::new(ClbitId(3))));
    }
}
