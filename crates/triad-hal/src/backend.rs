//! The `Executor` trait: the boundary to a circuit-execution engine.
//!
//! The contract is deliberately narrow:
//!
//! ```text
//!   capabilities() ──→ run(circuit, shots) ──→ OutcomeMatrix
//!    (sync, &ref)          (async)
//! ```
//!
//! - **Async-native**: `run` may represent a heavy local simulation or a
//!   network call to hardware; it is the sole suspension point.
//! - **Thread-safe**: `Send + Sync` so one executor can serve a pool of
//!   concurrent sweep points.
//! - **Infallible introspection**: `capabilities()` is synchronous and
//!   cached at construction time.
//! - **No silent degradation**: a backend that cannot inject noise fails
//!   `run_noisy` with [`HalError::Unsupported`] instead of ignoring the
//!   noise parameters.

use async_trait::async_trait;

use triad_ir::{Circuit, NoiseParameters};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::result::OutcomeMatrix;

/// Trait for circuit-execution backends.
///
/// The returned [`OutcomeMatrix`] MUST have `shots` rows and one column
/// per classical bit the circuit declares, in declaration order.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    ///
    /// Synchronous and infallible; implementations cache capabilities at
    /// construction time and return a reference.
    fn capabilities(&self) -> &Capabilities;

    /// Execute a circuit for `shots` trials under ideal conditions.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<OutcomeMatrix>;

    /// Execute a circuit for `shots` trials with decoherence noise.
    ///
    /// Backends that support noise require the circuit to already be in
    /// their native gate basis (see [`Capabilities::native_gates`]) and
    /// fail with [`HalError::Unsupported`] otherwise. The default
    /// implementation rejects noisy execution outright.
    async fn run_noisy(
        &self,
        circuit: &Circuit,
        shots: u32,
        noise: &NoiseParameters,
    ) -> HalResult<OutcomeMatrix> {
        let _ = (circuit, shots);
        Err(HalError::Unsupported(format!(
            "backend '{}' cannot inject noise ({noise})",
            self.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoiselessStub {
        caps: Capabilities,
    }

    #[async_trait]
    impl Executor for NoiselessStub {
        fn name(&self) -> &str {
            "stub"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<OutcomeMatrix> {
            Ok(OutcomeMatrix::filled(
                shots as usize,
                circuit.num_clbits() as usize,
                0,
            ))
        }
    }

    #[tokio::test]
    async fn test_default_run_noisy_is_unsupported() {
        let stub = NoiselessStub {
            caps: Capabilities::simulator(4),
        };
        let circuit = Circuit::new("empty", 1);
        let noise = NoiseParameters::decohering(1e-5, 1e-5).unwrap();
        let err = stub.run_noisy(&circuit, 100, &noise).await.unwrap_err();
        assert!(matches!(err, HalError::Unsupported(_)));
    }

    #[tokio::test]
    async fn test_stub_run_shape() {
        let stub = NoiselessStub {
            caps: Capabilities::simulator(4),
        };
        let mut circuit = Circuit::new("m", 1);
        circuit.declare_creg("ro", 1).unwrap();
        let out = stub.run(&circuit, 32).await.unwrap();
        assert_eq!(out.shots(), 32);
        assert_eq!(out.width(), 1);
    }
}
