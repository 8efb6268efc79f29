//! Compilation error types.

use thiserror::Error;
use triad_ir::IrError;

/// Errors arising while lowering a circuit.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A gate has no decomposition into the native basis.
    #[error("no native decomposition for gate '{0}'")]
    UnsupportedGate(String),

    /// Rebuilding the lowered circuit produced an invalid instruction.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
