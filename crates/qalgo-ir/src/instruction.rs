//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Measurement of each qubit into the classical bit at the same position.
    Measure,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction writes (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a multi-qubit measurement, binding qubits to classical bits pairwise.
    pub fn measure_many(
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<Self> {
        let qubits: Vec<_> = qubits.into_iter().collect();
        let clbits: Vec<_> = clbits.into_iter().collect();
        if qubits.len() != clbits.len() {
            return Err(IrError::MeasureArityMismatch {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }
        Ok(Self {
            kind: InstructionKind::Measure,
            qubits,
            clbits,
        })
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Measure => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
        }
    }

    /// Rewrite operands through `mapping`, where local qubit `i` becomes `mapping[i]`.
    ///
    /// Operands without an entry in `mapping` are left unchanged; callers
    /// validate widths before remapping.
    #[must_use]
    pub fn remap(&self, mapping: &[QubitId]) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: self
                .qubits
                .iter()
                .map(|q| mapping.get(q.index()).copied().unwrap_or(*q))
                .collect(),
            clbits: self.clbits.clone(),
        }
    }

    /// Number of primitive instructions this expands to, saturating at `u64::MAX`.
    pub fn num_primitives(&self) -> u64 {
        match &self.kind {
            InstructionKind::Gate(Gate::Composite(block)) => block
                .body()
                .iter()
                .map(Instruction::num_primitives)
                .fold(0u64, u64::saturating_add)
                .saturating_mul(u64::from(block.repetitions())),
            _ => 1,
        }
    }

    /// Expand composite gates recursively, appending primitive instructions to `out`.
    pub fn expand_into(&self, out: &mut Vec<Instruction>) {
        match &self.kind {
            InstructionKind::Gate(Gate::Composite(block)) => {
                let body: Vec<_> = block
                    .body()
                    .iter()
                    .map(|inner| inner.remap(&self.qubits))
                    .collect();
                for _ in 0..block.repetitions() {
                    for inner in &body {
                        inner.expand_into(out);
                    }
                }
            }
            _ => out.push(self.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::gate(StandardGate::H, [QubitId(0)]);
        assert!(inst.is_gate());
        assert_eq!(inst.qubits.len(), 1);
        assert_eq!(inst.name(), "h");
    }

    #[test]
    fn test_measure_many_arity() {
        let ok = Instruction::measure_many(QubitId::range(0..2), ClbitId::range(0..2)).unwrap();
        assert!(ok.is_measure());
        assert_eq!(ok.clbits, vec![ClbitId(0), ClbitId(1)]);

        let err = Instruction::measure_many(QubitId::range(0..3), ClbitId::range(0..2));
        assert!(matches!(
            err,
            Err(IrError::MeasureArityMismatch {
                qubits: 3,
                clbits: 2
            })
        ));
    }

    #[test]
    fn test_num_primitives() {
        let cx = Gate::from(StandardGate::CX);
        let inst = Instruction::gate(cx.power(3).power(4), [QubitId(0), QubitId(1)]);
        assert_eq!(inst.num_primitives(), 12);

        let mut expanded = Vec::new();
        inst.expand_into(&mut expanded);
        assert_eq!(expanded.len(), 12);

        let huge_gate = cx.power(u32::MAX).power(u32::MAX).power(u32::MAX);
        let huge = Instruction::gate(huge_gate, QubitId::range(0..2));
        assert_eq!(huge.num_primitives(), u64::MAX);
    }

    #[test]
    fn test_remap() {
        let inst = Instruction::gate(StandardGate::CX, [QubitId(0), QubitId(1)]);
        let mapped = inst.remap(&[QubitId(4), QubitId(2)]);
        assert_eq!(mapped.qubits, vec![QubitId(4), QubitId(2)]);
    }
}
