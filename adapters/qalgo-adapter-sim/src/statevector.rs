//! Statevector simulation engine.
//!
//! Basis state index bit `i` holds the value of qubit `i`.

use num_complex::Complex64;

use qalgo_ir::{Gate, Instruction, InstructionKind, StandardGate, TargetOp};

/// Amplitudes of an `n`-qubit register, `2^n` entries.
pub struct Statevector {
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Apply an instruction to the statevector.
    ///
    /// Composite gates are expanded in place. Measurements do not modify
    /// the state; sampling happens once all gates have been applied.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(Gate::Standard(gate)) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_standard_gate(*gate, &qubits);
            }
            InstructionKind::Gate(Gate::Composite(_)) => {
                let mut expanded = Vec::new();
                instruction.expand_into(&mut expanded);
                for inst in &expanded {
                    self.apply(inst);
                }
            }
            InstructionKind::Measure => {}
        }
    }

    /// Apply a standard gate whose controls precede its target in `qubits`.
    fn apply_standard_gate(&mut self, gate: StandardGate, qubits: &[usize]) {
        let Some((&target, controls)) = qubits.split_last() else {
            return;
        };
        self.apply_controlled(controls, target, gate.target_op());
    }

    /// Apply `op` to `target` on every basis state where all `controls` are set.
    fn apply_controlled(&mut self, controls: &[usize], target: usize, op: TargetOp) {
        let ctrl_mask = controls.iter().fold(0usize, |mask, &q| mask | (1 << q));
        let target_mask = 1usize << target;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();

        for i in 0..self.amplitudes.len() {
            if i & target_mask != 0 || i & ctrl_mask != ctrl_mask {
                continue;
            }
            let j = i | target_mask;
            match op {
                TargetOp::X => self.amplitudes.swap(i, j),
                TargetOp::Z => self.amplitudes[j] = -self.amplitudes[j],
                TargetOp::H => {
                    let a = self.amplitudes[i];
                    let b = self.amplitudes[j];
                    self.amplitudes[i] = sqrt2_inv * (a + b);
                    self.amplitudes[j] = sqrt2_inv * (a - b);
                }
            }
        }
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }
}
