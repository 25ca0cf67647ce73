//! High-level circuit builder API.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{CompositeGate, Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit over a fixed-size register.
///
/// Gates are kept in application order. Every operand is validated
/// against the register when appended, so a `Circuit` never holds an
/// out-of-range qubit or classical bit, and each classical bit receives
/// at most one measurement. Deserialization replays every instruction
/// through [`Circuit::apply`], so the same holds for circuits read from
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Register width.
    num_qubits: u32,
    /// Classical register width.
    num_clbits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let mut circuit = Circuit::with_size(raw.name, raw.num_qubits, raw.num_clbits);
        for inst in raw.instructions {
            circuit.apply(inst)?;
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.qubits.len() as u32;
                if got != gate.num_qubits() {
                    return Err(IrError::QubitCountMismatch {
                        operation: gate.name().to_string(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
                self.check_qubits(&instruction.qubits, gate.name())?;
            }
            InstructionKind::Measure => {
                if instruction.qubits.len() != instruction.clbits.len() {
                    return Err(IrError::MeasureArityMismatch {
                        qubits: instruction.qubits.len(),
                        clbits: instruction.clbits.len(),
                    });
                }
                self.check_qubits(&instruction.qubits, "measure")?;
                self.check_clbits(&instruction.clbits)?;
            }
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    fn check_qubits(&self, qubits: &[QubitId], operation: &str) -> IrResult<()> {
        for (i, &qubit) in qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    operation: operation.to_string(),
                    size: self.num_qubits,
                });
            }
            if qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    operation: operation.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_clbits(&self, clbits: &[ClbitId]) -> IrResult<()> {
        let bound: Vec<ClbitId> = self.measurements().into_iter().map(|(_, c)| c).collect();
        for (i, &clbit) in clbits.iter().enumerate() {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    size: self.num_clbits,
                });
            }
            if bound.contains(&clbit) || clbits[..i].contains(&clbit) {
                return Err(IrError::ClbitAlreadyBound(clbit));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::X, [qubit]))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::H, [qubit]))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::Z, [qubit]))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CX, [control, target]))
    }

    /// Flip `target` when every qubit in `controls` is |1⟩.
    pub fn mcx(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        let mut qubits: Vec<_> = controls.into_iter().collect();
        let gate = StandardGate::x_with_controls(qubits.len() as u32);
        qubits.push(target);
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Phase-flip `target` when every qubit in `controls` is |1⟩.
    ///
    /// The gate is symmetric in its operands: it negates exactly the
    /// amplitudes where all listed qubits, target included, are |1⟩.
    pub fn mcz(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        let mut qubits: Vec<_> = controls.into_iter().collect();
        let gate = StandardGate::z_with_controls(qubits.len() as u32);
        qubits.push(target);
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Apply Pauli-X to each listed qubit.
    pub fn x_all(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        for qubit in qubits {
            self.x(qubit)?;
        }
        Ok(self)
    }

    /// Apply Hadamard to each listed qubit.
    pub fn h_all(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        for qubit in qubits {
            self.h(qubit)?;
        }
        Ok(self)
    }

    /// Place a gate (typically a frozen composite) on the listed qubits.
    pub fn append(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Append another circuit's instructions, mapping its qubit `i` onto `qubits[i]`.
    ///
    /// Classical bits of `other` are kept at the same positions. The
    /// mapping must cover `other`'s register exactly; on any error this
    /// circuit is left unchanged.
    pub fn compose(
        &mut self,
        other: &Circuit,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        let mapping: Vec<_> = qubits.into_iter().collect();
        if mapping.len() as u32 != other.num_qubits {
            return Err(IrError::QubitCountMismatch {
                operation: other.name.clone(),
                expected: other.num_qubits,
                got: mapping.len() as u32,
            });
        }
        self.check_qubits(&mapping, &other.name)?;

        let checkpoint = self.instructions.len();
        for inst in &other.instructions {
            let applied = self.apply(inst.remap(&mapping)).map(|_| ());
            if let Err(e) = applied {
                self.instructions.truncate(checkpoint);
                return Err(e);
            }
        }
        Ok(self)
    }

    /// Freeze the current instruction sequence into a named composite gate.
    ///
    /// The gate owns a copy of the instructions; further changes to this
    /// circuit do not affect it.
    pub fn to_gate(&self, name: impl Into<String>) -> IrResult<Gate> {
        if self.instructions.iter().any(Instruction::is_measure) {
            return Err(IrError::NonUnitaryBlock(self.name.clone()));
        }
        Ok(Gate::Composite(CompositeGate::new(
            name,
            self.num_qubits,
            self.instructions.clone(),
        )))
    }

    /// Measure each qubit into the classical bit at the same list position.
    pub fn measure(
        &mut self,
        qubits: impl IntoIterator<Item = QubitId>,
        clbits: impl IntoIterator<Item = ClbitId>,
    ) -> IrResult<&mut Self> {
        let inst = Instruction::measure_many(qubits, clbits)?;
        self.apply(inst)
    }

    /// Measure all qubits to corresponding classical bits.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        // Ensure we have enough classical bits
        self.num_clbits = self.num_clbits.max(self.num_qubits);
        let n = self.num_qubits;
        self.measure(QubitId::range(0..n), ClbitId::range(0..n))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub(crate) fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Number of top-level instructions (a composite counts once).
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// All measurement bindings in order of declaration.
    pub fn measurements(&self) -> Vec<(QubitId, ClbitId)> {
        self.instructions
            .iter()
            .filter(|inst| inst.is_measure())
            .flat_map(|inst| inst.qubits.iter().copied().zip(inst.clbits.iter().copied()))
            .collect()
    }

    /// Get the circuit depth, counting each top-level instruction as one layer.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.num_qubits()];
        let mut clbit_level = vec![0usize; self.num_clbits()];
        let mut depth = 0;

        for inst in &self.instructions {
            let level = inst
                .qubits
                .iter()
                .map(|q| qubit_level[q.index()])
                .chain(inst.clbits.iter().map(|c| clbit_level[c.index()]))
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                qubit_level[q.index()] = level;
            }
            for c in &inst.clbits {
                clbit_level[c.index()] = level;
            }
            depth = depth.max(level);
        }
        depth
    }

    /// A copy of this circuit with every composite gate expanded into primitives.
    #[must_use]
    pub fn flatten(&self) -> Circuit {
        let mut instructions = Vec::with_capacity(self.instructions.len());
        for inst in &self.instructions {
            inst.expand_into(&mut instructions);
        }
        Circuit {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            instructions,
        }
    }
}
