//! Backend capability introspection.

use serde::{Deserialize, Serialize};

/// Capabilities of an execution backend.
///
/// Describes what a backend can do: qubit count, shot limits, whether it
/// can inject decoherence noise, and its native gate set. Drivers use
/// this to decide whether a circuit needs lowering before a noisy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Maximum number of shots per execution.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    pub is_simulator: bool,
    /// Whether the backend honors [`run_noisy`](crate::Executor::run_noisy).
    pub supports_noise: bool,
    /// Native gate set (OpenQASM naming). Noisy execution requires the
    /// circuit to already be expressed in these gates.
    pub native_gates: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a local simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".to_string(),
            num_qubits,
            max_shots: 1_000_000,
            is_simulator: true,
            supports_noise: true,
            native_gates: ["i", "rx", "rz", "cz"].map(String::from).to_vec(),
        }
    }

    /// Check whether a gate name is in the native set.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.native_gates.iter().any(|g| g == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20);
        assert!(caps.is_simulator);
        assert!(caps.supports_noise);
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.supports_gate("rx"));
        assert!(!caps.supports_gate("h"));
    }
}
