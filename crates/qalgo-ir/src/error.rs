//! Circuit construction errors.
//!
//! Every check happens when an instruction is appended, so a circuit that
//! exists is always well formed.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand lies outside the qubit register.
    #[error("'{operation}' uses {qubit}, but the register has {size} qubits")]
    QubitNotFound {
        qubit: QubitId,
        /// Gate or measurement that referenced the qubit.
        operation: String,
        size: u32,
    },

    #[error("Measurement writes {clbit}, but the classical register has {size} bits")]
    ClbitNotFound { clbit: ClbitId, size: u32 },

    /// A gate or block was placed on the wrong number of qubits.
    #[error("'{operation}' acts on {expected} qubits, got {got}")]
    QubitCountMismatch {
        operation: String,
        expected: u32,
        got: u32,
    },

    #[error("Measurement binds {qubits} qubits to {clbits} classical bits")]
    MeasureArityMismatch { qubits: usize, clbits: usize },

    #[error("'{operation}' lists {qubit} more than once")]
    DuplicateQubit { qubit: QubitId, operation: String },

    /// Each classical bit holds one measurement result.
    #[error("Classical bit {0} is already bound to a measurement")]
    ClbitAlreadyBound(ClbitId),

    /// Blocks containing measurements cannot be frozen into gates.
    #[error("Circuit '{0}' contains measurements and cannot be frozen into a gate")]
    NonUnitaryBlock(String),
}

pub type IrResult<T> = Result<T, IrError>;
