//! Native-basis lowering for TRIAD circuits.
//!
//! Backends that model per-gate decoherence execute only the native
//! basis `{i, rx, rz, cz}`. This crate rewrites circuits into that
//! basis while preserving their classical-register layout and
//! mid-circuit conditional structure.
//!
//! ```
//! use triad_compile::{is_native, lower_to_native};
//! use triad_ir::{Circuit, QubitId};
//!
//! let mut bell = Circuit::new("bell", 2);
//! bell.h(QubitId(0)).unwrap();
//! bell.cx(QubitId(0), QubitId(1)).unwrap();
//! assert!(!is_native(&bell));
//!
//! let lowered = lower_to_native(&bell).unwrap();
//! assert!(is_native(&lowered));
//! ```

pub mod error;
pub mod lower;

pub use error::{CompileError, CompileResult};
pub use lower::{NATIVE_GATES, is_native, lower_to_native};
