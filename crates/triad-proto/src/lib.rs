//! HBB three-party quantum secret sharing, protocol layer.
//!
//! Builds the circuits of the Hillery–Bužek–Berthiaume protocol: a secret
//! holder shares a single-qubit state among Alice, Bob and Charlie via a
//! GHZ state; Alice performs a Bell measurement, Bob an X-basis
//! measurement, and Charlie reconstructs the secret from their two
//! classical bits. `n` independent instances are batched into one circuit
//! over `4n` striped qubits.
//!
//! # Example
//!
//! ```rust
//! use triad_proto::{build, SecretProfile, output_column};
//!
//! let circuit = build(2, &SecretProfile::Hth).unwrap();
//! assert_eq!(circuit.num_qubits(), 8);
//! assert_eq!(circuit.num_clbits(), 8);
//! // Instance 0's reconstructed secret lands in column 6.
//! assert_eq!(output_column(2, 0), 6);
//! ```

pub mod builder;
pub mod device;
pub mod error;
pub mod role;
pub mod secret;

pub use builder::{
    CorrectionMode, MeasurementBasis, ProtocolOptions, build, build_tomography, build_with,
    coherent_output_column, output_column,
};
pub use device::{DeviceRegistry, RoleAssignment, StaticRegistry};
pub use error::{ProtoError, ProtoResult};
pub use role::{RegisterMap, Role};
pub use secret::{HTH_P0, SecretProfile};
