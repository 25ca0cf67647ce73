//! Grover search over `n` qubits.
//!
//! The oracle reflects every marked basis state; the diffusion operator
//! reflects about the uniform superposition. Their product is applied
//! `floor(π/4 · sqrt(2^n / m))` times for `m` distinct marked states.

use std::collections::BTreeSet;
use std::f64::consts::PI;

use qalgo_hal::{Backend, Counts};
use qalgo_ir::{Circuit, ClbitId, Gate, QubitId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::bits::zero_qubits;
use crate::config::RunConfig;
use crate::error::{AlgoError, AlgoResult};
use crate::execution::execute;

/// Largest search register a circuit can be built for.
///
/// The Grover operator is repeated through [`Gate::power`], which stores a
/// repetition count, so the circuit stays small at any width. Executing it
/// still needs a backend of that width.
pub const MAX_QUBITS: u32 = 63;

/// Outcome of a Grover run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroverReport {
    /// Distinct marked states searched for.
    pub marked: Vec<u64>,
    /// Number of Grover operator applications.
    pub iterations: u32,
    /// Measured register.
    pub counts: Counts,
    /// Fraction of shots that landed on a marked state.
    pub success_probability: f64,
}

fn check_width(n: u32) -> AlgoResult<()> {
    if n == 0 || n > MAX_QUBITS {
        return Err(AlgoError::InvalidQubitCount(n));
    }
    Ok(())
}

/// Deduplicate marked states and check each fits in `n` bits.
fn marked_set(n: u32, marked: &[u64]) -> AlgoResult<BTreeSet<u64>> {
    check_width(n)?;
    marked
        .iter()
        .map(|&state| {
            if state >> n != 0 {
                Err(AlgoError::MarkedStateOutOfRange {
                    state,
                    num_qubits: n,
                })
            } else {
                Ok(state)
            }
        })
        .collect()
}

/// Phase-flip every state in `marked`.
///
/// Each state is reflected by mapping it onto `|1…1⟩` with X gates on its
/// zero bits, applying a phase flip controlled by all qubits, and undoing
/// the X gates. Duplicate entries mark a state once.
pub fn oracle(n: u32, marked: &[u64]) -> AlgoResult<Circuit> {
    let marked = marked_set(n, marked)?;
    let mut oracle = Circuit::with_size("grover_oracle", n, 0);
    for state in marked {
        let zeros = zero_qubits(state, n);
        oracle.x_all(zeros.iter().copied())?;
        oracle.mcz(QubitId::range(0..n - 1), QubitId(n - 1))?;
        oracle.x_all(zeros)?;
    }
    Ok(oracle)
}

/// Reflection about the uniform superposition.
pub fn diffusion(n: u32) -> AlgoResult<Circuit> {
    check_width(n)?;
    let mut diffusion = Circuit::with_size("diffusion", n, 0);
    diffusion.h_all(QubitId::range(0..n))?;
    diffusion.x_all(QubitId::range(0..n))?;
    diffusion.mcz(QubitId::range(0..n - 1), QubitId(n - 1))?;
    diffusion.x_all(QubitId::range(0..n))?;
    diffusion.h_all(QubitId::range(0..n))?;
    Ok(diffusion)
}

/// The Grover operator: the oracle followed by diffusion, frozen as one gate.
pub fn grover_operator(oracle: &Gate, n: u32) -> AlgoResult<Gate> {
    let mut op = Circuit::with_size("grover_op", n, 0);
    op.append(oracle.clone(), QubitId::range(0..n))?;
    op.compose(&diffusion(n)?, QubitId::range(0..n))?;
    Ok(op.to_gate("Grover")?)
}

/// `floor(π/4 · sqrt(2^n / m))` for `m` distinct marked states.
pub fn optimal_iterations(n: u32, num_marked: usize) -> AlgoResult<u32> {
    check_width(n)?;
    if num_marked == 0 {
        return Err(AlgoError::NoMarkedStates);
    }
    let space = 2f64.powi(n as i32);
    Ok((PI / 4.0 * (space / num_marked as f64).sqrt()).floor() as u32)
}

/// Assemble the full search circuit, returning it with its iteration count.
pub fn circuit(oracle: &Gate, n: u32, num_marked: usize) -> AlgoResult<(Circuit, u32)> {
    let iterations = optimal_iterations(n, num_marked)?;
    let op = grover_operator(oracle, n)?;

    let mut circuit = Circuit::with_size("grover", n, n);
    circuit.h_all(QubitId::range(0..n))?;
    circuit.append(op.power(iterations), QubitId::range(0..n))?;
    circuit.measure(QubitId::range(0..n), ClbitId::range(0..n))?;

    Ok((circuit, iterations))
}

/// Fraction of shots that measured one of the `marked` states.
pub fn success_probability(counts: &Counts, marked: &[u64], n: u32) -> f64 {
    let width = n as usize;
    marked
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|&state| counts.probability(&Counts::format_bits(state, width)))
        .sum()
}

/// Build the oracle and search circuit for `marked`, run it and score it.
#[instrument(skip(backend, config))]
pub async fn run(
    backend: &dyn Backend,
    n: u32,
    marked: &[u64],
    config: &RunConfig,
) -> AlgoResult<GroverReport> {
    let marked: Vec<u64> = marked_set(n, marked)?.into_iter().collect();
    let gate = oracle(n, &marked)?.to_gate("Oracle")?;
    let (circuit, iterations) = circuit(&gate, n, marked.len())?;
    debug!(iterations, "Assembled Grover circuit");

    let counts = execute(backend, &circuit, config.shots).await?;
    let success_probability = success_probability(&counts, &marked, n);
    info!(iterations, success_probability, "Grover finished");

    Ok(GroverReport {
        marked,
        iterations,
        counts,
        success_probability,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qalgo_ir::StandardGate;

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(optimal_iterations(3, 2).unwrap(), 1);
        assert_eq!(optimal_iterations(3, 1).unwrap(), 2);
        assert_eq!(optimal_iterations(4, 1).unwrap(), 3);
        assert_eq!(optimal_iterations(10, 1).unwrap(), 25);
        // Rounds down: π/4 · sqrt(2) ≈ 1.11
        assert_eq!(optimal_iterations(1, 1).unwrap(), 1);
        assert_eq!(optimal_iterations(2, 4).unwrap(), 0);
    }

    #[test]
    fn test_optimal_iterations_requires_marked_states() {
        assert!(matches!(
            optimal_iterations(3, 0),
            Err(AlgoError::NoMarkedStates)
        ));
    }

    #[test]
    fn test_oracle_out_of_range() {
        let err = oracle(3, &[1, 8]).unwrap_err();
        assert!(matches!(
            err,
            AlgoError::MarkedStateOutOfRange {
                state: 8,
                num_qubits: 3
            }
        ));
        assert!(matches!(
            oracle(0, &[0]),
            Err(AlgoError::InvalidQubitCount(0))
        ));
    }

    #[test]
    fn test_oracle_structure() {
        let circuit = oracle(3, &[3, 1, 3]).unwrap();
        let flips: Vec<_> = circuit
            .instructions()
            .iter()
            .filter(|inst| inst.as_gate() == Some(&Gate::Standard(StandardGate::MCZ(2))))
            .collect();
        // Duplicates mark once.
        assert_eq!(flips.len(), 2);
        // State 1 = qubit 0 set: X on qubits 1 and 2, MCZ, X on 1 and 2.
        assert_eq!(circuit.num_ops(), 2 + 1 + 2 + 1 + 1 + 1);
    }

    #[test]
    fn test_single_qubit_uses_plain_z() {
        let circuit = oracle(1, &[1]).unwrap();
        assert_eq!(circuit.num_ops(), 1);
        assert_eq!(circuit.instructions()[0].name(), "z");
    }

    #[test]
    fn test_zero_iterations_is_identity_power() {
        let gate = oracle(2, &[0, 1, 2, 3]).unwrap().to_gate("Oracle").unwrap();
        let (circuit, k) = circuit(&gate, 2, 4).unwrap();
        assert_eq!(k, 0);
        // H, H, empty power block, measure
        assert_eq!(circuit.flatten().num_ops(), 3);
    }

    #[test]
    fn test_circuit_at_max_width_stays_compact() {
        let n = MAX_QUBITS;
        let gate = oracle(n, &[1]).unwrap().to_gate("Oracle").unwrap();
        let (circuit, k) = circuit(&gate, n, 1).unwrap();
        assert_eq!(k, 2_385_254_614);
        // n Hadamards, the powered operator, one measurement
        assert_eq!(circuit.num_ops(), n as usize + 2);

        let powered = &circuit.instructions()[n as usize];
        let block = powered.as_gate().and_then(Gate::as_composite).unwrap();
        assert_eq!(block.repetitions(), k);
        assert!(powered.num_primitives() > u64::from(k));
    }

    #[test]
    fn test_success_probability() {
        let counts = Counts::from_pairs([("001", 40), ("011", 50), ("111", 10)]);
        let p = success_probability(&counts, &[1, 3, 3], 3);
        assert!((p - 0.9).abs() < 1e-12);
    }
}
