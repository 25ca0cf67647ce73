//! qalgo Circuit Intermediate Representation
//!
//! This crate provides the circuit algebra used by the qalgo algorithm
//! suite: an ordered list of gate applications over an indexed qubit
//! register, plus measurement bindings into classical bits.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] for the primitive vocabulary (X, H, Z and
//!   their multi-controlled forms) and [`CompositeGate`] for frozen blocks
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder API with composition, freezing and
//!   measurement
//!
//! # Example: Reusable Blocks
//!
//! ```rust
//! use qalgo_ir::{Circuit, ClbitId, QubitId};
//!
//! // A two-qubit block that entangles its inputs
//! let mut block = Circuit::with_size("entangle", 2, 0);
//! block.h(QubitId(0)).unwrap();
//! block.cx(QubitId(0), QubitId(1)).unwrap();
//! let gate = block.to_gate("Entangle").unwrap();
//!
//! // Use it twice, once controlled on a third qubit
//! let mut circuit = Circuit::with_size("main", 3, 3);
//! circuit.append(gate.clone(), [QubitId(0), QubitId(1)]).unwrap();
//! circuit.append(gate.control(1), [QubitId(2), QubitId(0), QubitId(1)]).unwrap();
//! circuit.measure(QubitId::range(0..3), ClbitId::range(0..3)).unwrap();
//!
//! assert_eq!(circuit.num_ops(), 3);
//! assert_eq!(circuit.flatten().num_ops(), 5);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X` | 1 | Pauli-X |
//! | `H` | 1 | Hadamard |
//! | `Z` | 1 | Pauli-Z (phase flip) |
//! | `CX` | 2 | Controlled-NOT |
//! | `MCX(n)` | n+1 | Multi-controlled X |
//! | `MCZ(n)` | n+1 | Multi-controlled phase flip |
//! | `MCH(n)` | n+1 | Multi-controlled Hadamard |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CompositeGate, Gate, StandardGate, TargetOp};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
