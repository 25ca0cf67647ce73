//! Quantum gate types.
//!
//! The vocabulary is Pauli-X, Hadamard, Pauli-Z and their multi-controlled
//! forms, plus [`CompositeGate`] for frozen, reusable blocks.
//! Multi-controlled gates list their controls first and their target last
//! in the instruction's operand list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;

/// Primitive gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Hadamard gate.
    H,
    /// Pauli-Z gate (single-qubit phase flip).
    Z,
    /// Controlled-X (CNOT) gate.
    CX,
    /// X on the target when all `n` controls are |1⟩.
    MCX(u32),
    /// Phase flip of the target when all `n` controls are |1⟩.
    MCZ(u32),
    /// Hadamard on the target when all `n` controls are |1⟩.
    MCH(u32),
}

/// The single-qubit operation a [`StandardGate`] applies to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOp {
    /// Bit flip.
    X,
    /// Hadamard.
    H,
    /// Phase flip.
    Z,
}

impl StandardGate {
    /// Canonical X-type gate for a given number of controls.
    pub fn x_with_controls(num_controls: u32) -> Self {
        match num_controls {
            0 => StandardGate::X,
            1 => StandardGate::CX,
            n => StandardGate::MCX(n),
        }
    }

    /// Canonical Z-type gate for a given number of controls.
    pub fn z_with_controls(num_controls: u32) -> Self {
        match num_controls {
            0 => StandardGate::Z,
            n => StandardGate::MCZ(n),
        }
    }

    /// Canonical H-type gate for a given number of controls.
    pub fn h_with_controls(num_controls: u32) -> Self {
        match num_controls {
            0 => StandardGate::H,
            n => StandardGate::MCH(n),
        }
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::Z => "z",
            StandardGate::CX => "cx",
            StandardGate::MCX(_) => "mcx",
            StandardGate::MCZ(_) => "mcz",
            StandardGate::MCH(_) => "mch",
        }
    }

    /// Number of control qubits.
    #[inline]
    pub fn num_controls(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::H | StandardGate::Z => 0,
            StandardGate::CX => 1,
            StandardGate::MCX(n) | StandardGate::MCZ(n) | StandardGate::MCH(n) => *n,
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_controls() + 1
    }

    /// The operation applied to the target qubit.
    pub fn target_op(&self) -> TargetOp {
        match self {
            StandardGate::X | StandardGate::CX | StandardGate::MCX(_) => TargetOp::X,
            StandardGate::H | StandardGate::MCH(_) => TargetOp::H,
            StandardGate::Z | StandardGate::MCZ(_) => TargetOp::Z,
        }
    }

    /// Promote this gate with `extra` additional control qubits.
    #[must_use]
    pub fn controlled(&self, extra: u32) -> Self {
        let controls = self.num_controls() + extra;
        match self.target_op() {
            TargetOp::X => Self::x_with_controls(controls),
            TargetOp::H => Self::h_with_controls(controls),
            TargetOp::Z => Self::z_with_controls(controls),
        }
    }
}

/// A frozen, named block of gate instructions.
///
/// The body is shared behind an [`Arc`] and never mutated: freezing a
/// [`Circuit`] copies its instructions, so later edits to the circuit do
/// not reach gates already frozen from it. The block applies its body
/// `repetitions` times; [`Gate::power`] sets the count instead of copying
/// the body.
///
/// Deserialized blocks are checked the same way as circuits: every body
/// instruction must fit the block width and none may be a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCompositeGate")]
pub struct CompositeGate {
    name: String,
    num_qubits: u32,
    body: Arc<[Instruction]>,
    repetitions: u32,
}

#[derive(Deserialize)]
struct RawCompositeGate {
    name: String,
    num_qubits: u32,
    body: Vec<Instruction>,
    repetitions: u32,
}

impl TryFrom<RawCompositeGate> for CompositeGate {
    type Error = IrError;

    fn try_from(raw: RawCompositeGate) -> IrResult<Self> {
        let mut block = Circuit::with_size(raw.name.as_str(), raw.num_qubits, 0);
        for inst in raw.body {
            if inst.is_measure() {
                return Err(IrError::NonUnitaryBlock(raw.name));
            }
            block.apply(inst)?;
        }
        Ok(Self {
            body: block.into_instructions().into(),
            name: raw.name,
            num_qubits: raw.num_qubits,
            repetitions: raw.repetitions,
        })
    }
}

impl CompositeGate {
    pub(crate) fn new(name: impl Into<String>, num_qubits: u32, body: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            body: body.into(),
            repetitions: 1,
        }
    }

    /// Name of the block.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of the block.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// One repetition of the block, addressed on local qubits `[0, num_qubits)`.
    pub fn body(&self) -> &[Instruction] {
        &self.body
    }

    /// How many times the body is applied.
    pub fn repetitions(&self) -> u32 {
        self.repetitions
    }

    /// Whether the block applies no operations.
    pub fn is_identity(&self) -> bool {
        self.repetitions == 0 || self.body.is_empty()
    }

    fn controlled(&self, extra: u32) -> Self {
        let body = self
            .body
            .iter()
            .map(|inst| {
                let shifted = inst.qubits.iter().map(|q| QubitId(q.0 + extra));
                match &inst.kind {
                    InstructionKind::Gate(gate) => {
                        let qubits = QubitId::range(0..extra).chain(shifted);
                        Instruction::gate(gate.control(extra), qubits)
                    }
                    InstructionKind::Measure => Instruction {
                        kind: InstructionKind::Measure,
                        qubits: shifted.collect(),
                        clbits: inst.clbits.clone(),
                    },
                }
            })
            .collect();

        Self {
            name: format!("c{extra}_{}", self.name),
            num_qubits: self.num_qubits + extra,
            body,
            repetitions: self.repetitions,
        }
    }
}

/// A quantum gate, either primitive or a frozen composite block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A primitive gate with known semantics.
    Standard(StandardGate),
    /// A named reusable block.
    Composite(CompositeGate),
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Composite(g) => g.name(),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Composite(g) => g.num_qubits(),
        }
    }

    /// Get the composite block if this is one.
    pub fn as_composite(&self) -> Option<&CompositeGate> {
        match self {
            Gate::Composite(g) => Some(g),
            Gate::Standard(_) => None,
        }
    }

    /// Promote this gate so it only acts when `num_controls` extra qubits are all |1⟩.
    ///
    /// The new control qubits occupy operand positions `[0, num_controls)`
    /// and the original operands follow. A composite gate is promoted by
    /// promoting every gate it contains.
    #[must_use]
    pub fn control(&self, num_controls: u32) -> Gate {
        if num_controls == 0 {
            return self.clone();
        }
        match self {
            Gate::Standard(g) => Gate::Standard(g.controlled(num_controls)),
            Gate::Composite(g) => Gate::Composite(g.controlled(num_controls)),
        }
    }

    /// A composite gate equivalent to applying this gate `k` times in sequence.
    ///
    /// The result holds this gate once with a repetition count of `k`, so
    /// its size does not grow with `k`. `k = 0` is an identity block of the
    /// same width.
    #[must_use]
    pub fn power(&self, k: u32) -> Gate {
        let width = self.num_qubits();
        Gate::Composite(CompositeGate {
            name: format!("{}^{k}", self.name()),
            num_qubits: width,
            body: Arc::from([Instruction::gate(self.clone(), QubitId::range(0..width))]),
            repetitions: k,
        })
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<CompositeGate> for Gate {
    fn from(gate: CompositeGate) -> Self {
        Gate::Composite(gate)
    }
}
