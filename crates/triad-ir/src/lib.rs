//! TRIAD Circuit Intermediate Representation
//!
//! Core data structures for describing the secret-sharing protocol
//! circuits: qubit and classical-bit addressing, the standard gate set
//! with classical conditions, instructions, and the ordered [`Circuit`]
//! builder with its classical-register declaration table.
//!
//! The IR is deliberately backend-agnostic: a gate is a name plus operand
//! indices, and what it does to a quantum state is the execution backend's
//! business. Program order is authoritative: a classically conditioned
//! gate may only reference a bit an earlier measurement writes, and the
//! builder enforces that while the circuit is constructed.
//!
//! # Example: Bell pair with conditioned correction
//!
//! ```rust
//! use triad_ir::{Circuit, QubitId, StandardGate};
//!
//! let mut circuit = Circuit::new("bell", 2);
//! let m = circuit.declare_creg("m", 1).unwrap();
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure(QubitId(0), m[0]).unwrap();
//! circuit.gate_if(m[0], StandardGate::X, QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_clbits(), 1);
//! assert_eq!(circuit.ops().len(), 4);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use circuit::{Circuit, ClassicalRegister};
pub use error::{IrError, IrResult};
pub use gate::{ClassicalCondition, Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind, PlacementStrategy};
pub use noise::NoiseParameters;
pub use qubit::{Clbit, ClbitId, QubitId};
