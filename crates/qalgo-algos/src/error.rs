//! Error types for the algorithm suite.

use qalgo_hal::HalError;
use qalgo_ir::IrError;
use thiserror::Error;

/// Errors raised while synthesizing, running or post-processing an algorithm.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// The execution backend failed.
    #[error("Backend error: {0}")]
    Hal(#[from] HalError),

    /// A Simon secret contains a character other than `0` or `1`.
    #[error("Incorrect char '{ch}' in secret string: {secret}")]
    InvalidSecret { secret: String, ch: char },

    /// A Grover marked state needs more bits than the register has.
    #[error("Marked state {state} does not fit in {num_qubits} qubits")]
    MarkedStateOutOfRange { state: u64, num_qubits: u32 },

    /// Grover was asked to search for nothing.
    #[error("At least one marked state is required")]
    NoMarkedStates,

    /// The requested register size is not supported by the algorithm.
    #[error("Unsupported number of qubits: {0}")]
    InvalidQubitCount(u32),

    /// A GF(2) equation does not match the system width.
    #[error("Equation has {got} bits, expected {expected}")]
    EquationWidthMismatch { expected: usize, got: usize },

    /// Shor was asked to factor a number below 2.
    #[error("Cannot factor {0}: modulus must be at least 2")]
    InvalidModulus(u64),

    /// The Shor loop hit its retry cap.
    #[error("No factors of {n} found after {attempts} attempts")]
    AttemptsExhausted { n: u64, attempts: u32 },
}

/// Result type for algorithm operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
