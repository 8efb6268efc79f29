//! TRIAD Hardware Abstraction Layer
//!
//! The narrow boundary between the protocol/experiment layers and
//! whatever actually executes circuits: an async [`Executor`] turning
//! `(circuit, shots)` into an [`OutcomeMatrix`] of binary trial results.
//!
//! The core never inspects backend internals. Ideal and noisy execution
//! are separate entry points so a backend that cannot model decoherence
//! fails loudly rather than silently returning ideal statistics.

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::Executor;
pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use result::OutcomeMatrix;
