//! Local statevector simulator backend.
//!
//! Implements [`triad_hal::Executor`] with a per-shot trajectory
//! simulation: ideal runs apply the circuit unitarily with projective
//! mid-circuit measurement; noisy runs additionally inject per-gate
//! amplitude-damping and dephasing jumps plus readout misclassification,
//! and require the circuit to be in the native basis `{i, rx, rz, cz}`.

pub mod simulator;
pub mod statevector;

pub use simulator::SimulatorExecutor;
pub use statevector::Statevector;
