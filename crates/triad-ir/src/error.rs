//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit of {num_qubits} qubits")]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit} not declared (circuit declares {num_clbits} bits)")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Number of declared classical bits.
        num_clbits: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in '{gate_name}' operation")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate_name: String,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Classical register with this name already declared.
    #[error("Classical register '{0}' already declared")]
    DuplicateRegister(String),

    /// A conditional gate references a bit no preceding measure writes.
    #[error("Conditional gate references classical bit {clbit} before any measure writes it")]
    UnmeasuredCondition {
        /// The unwritten classical bit.
        clbit: ClbitId,
    },

    /// Noise parameters outside the physical range.
    #[error("Invalid noise parameter: {0}")]
    InvalidNoiseParameter(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
