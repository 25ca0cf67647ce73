//! Deutsch-Jozsa: decide whether a promised function is constant or balanced.
//!
//! The oracle acts on `n` input qubits and one output qubit (index `n`),
//! flipping the output whenever `f(x) = 1`. After the interference step the
//! input register reads all zeros with certainty exactly when `f` is
//! constant.

use qalgo_hal::{Backend, Counts};
use qalgo_ir::{Circuit, ClbitId, Gate, QubitId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::bits::zero_qubits;
use crate::config::RunConfig;
use crate::error::{AlgoError, AlgoResult};
use crate::execution::execute;

/// Largest input register for which a balanced oracle is synthesized.
///
/// The balanced oracle enumerates all `2^n` inputs and emits one
/// multi-controlled block for half of them.
pub const MAX_BALANCED_INPUTS: u32 = 16;

/// The function hidden in the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleType {
    /// `f(x) = 0`.
    Const0,
    /// `f(x) = 1`.
    Const1,
    /// `f(x) = 1` on exactly half of the inputs.
    Balanced,
}

impl OracleType {
    /// The verdict a correct run must reach for this oracle.
    pub fn expected_verdict(self) -> DjVerdict {
        match self {
            OracleType::Const0 | OracleType::Const1 => DjVerdict::Constant,
            OracleType::Balanced => DjVerdict::Balanced,
        }
    }
}

/// Classification read from a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DjVerdict {
    Constant,
    Balanced,
}

/// Outcome of a Deutsch-Jozsa run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DjReport {
    /// Oracle that was queried.
    pub oracle_type: OracleType,
    /// Measured input register.
    pub counts: Counts,
    /// Classification of the histogram.
    pub verdict: DjVerdict,
}

impl DjReport {
    /// Whether the verdict matches the oracle that was used.
    pub fn is_correct(&self) -> bool {
        self.verdict == self.oracle_type.expected_verdict()
    }
}

/// Build an oracle circuit over `n + 1` qubits.
///
/// A balanced oracle picks exactly `2^(n-1)` of the `2^n` inputs uniformly
/// at random and flips the output qubit on each of them.
pub fn oracle<R: Rng + ?Sized>(
    oracle_type: OracleType,
    n: u32,
    rng: &mut R,
) -> AlgoResult<Circuit> {
    if n == 0 {
        return Err(AlgoError::InvalidQubitCount(n));
    }

    let mut oracle = Circuit::with_size("dj_oracle", n + 1, 0);
    let output = QubitId(n);

    match oracle_type {
        OracleType::Const0 => {}
        OracleType::Const1 => {
            oracle.x(output)?;
        }
        OracleType::Balanced => {
            if n > MAX_BALANCED_INPUTS {
                return Err(AlgoError::InvalidQubitCount(n));
            }
            let mut states: Vec<u64> = (0..1u64 << n).collect();
            states.shuffle(rng);
            let (ones, _) = states.split_at(states.len() / 2);

            for &state in ones {
                let zeros = zero_qubits(state, n);
                oracle.x_all(zeros.iter().copied())?;
                oracle.mcx(QubitId::range(0..n), output)?;
                oracle.x_all(zeros)?;
            }
            debug!(n, marked = ones.len(), "Built balanced oracle");
        }
    }

    Ok(oracle)
}

/// Wrap a frozen oracle into the measurement circuit.
///
/// Output qubit `n` is prepared in `|−⟩`, the input register in uniform
/// superposition, and only the input register is measured.
pub fn circuit(oracle: &Gate, n: u32) -> AlgoResult<Circuit> {
    let mut circuit = Circuit::with_size("deutsch_jozsa", n + 1, n);
    circuit.x(QubitId(n))?;
    circuit.h_all(QubitId::range(0..n + 1))?;
    circuit.append(oracle.clone(), QubitId::range(0..n + 1))?;
    circuit.h_all(QubitId::range(0..n))?;
    circuit.measure(QubitId::range(0..n), ClbitId::range(0..n))?;
    Ok(circuit)
}

fn zero_shots(counts: &Counts) -> u64 {
    counts
        .iter()
        .filter(|(key, _)| key.chars().all(|c| c == '0'))
        .map(|(_, n)| *n)
        .sum()
}

/// Classify a histogram of the input register, tolerating noise.
///
/// The oracle is reported constant when the all-zero string accounts for
/// a strict majority of shots. This is looser than the noiseless rule of
/// [`classify_strict`], where any other string means balanced, so a few
/// stray shots from a noisy device do not flip the verdict. An empty
/// histogram is reported balanced.
pub fn classify(counts: &Counts) -> DjVerdict {
    if zero_shots(counts) * 2 > counts.total_shots() {
        DjVerdict::Constant
    } else {
        DjVerdict::Balanced
    }
}

/// Classify a histogram by the noiseless rule.
///
/// Constant only when every shot measured the all-zero string; a single
/// other outcome means balanced. An empty histogram is reported balanced.
pub fn classify_strict(counts: &Counts) -> DjVerdict {
    let total = counts.total_shots();
    if total > 0 && zero_shots(counts) == total {
        DjVerdict::Constant
    } else {
        DjVerdict::Balanced
    }
}

/// Synthesize an oracle, run the algorithm and classify the result.
#[instrument(skip(backend, config, rng))]
pub async fn run<R: Rng + ?Sized>(
    backend: &dyn Backend,
    oracle_type: OracleType,
    n: u32,
    config: &RunConfig,
    rng: &mut R,
) -> AlgoResult<DjReport> {
    let gate = oracle(oracle_type, n, rng)?.to_gate("Oracle")?;
    let circuit = circuit(&gate, n)?;

    let counts = execute(backend, &circuit, config.shots).await?;
    let verdict = classify(&counts);
    info!(?oracle_type, ?verdict, "Deutsch-Jozsa finished");

    Ok(DjReport {
        oracle_type,
        counts,
        verdict,
    })
}
