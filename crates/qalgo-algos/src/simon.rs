//! Simon's problem: recover a hidden XOR mask `s` with `f(x) = f(x ⊕ s)`.
//!
//! Character `i` of a secret string is bit `i` and acts on qubit `i`.
//! Recovered secrets are rendered the same way, so a successful run
//! returns the input string verbatim.

use qalgo_hal::{Backend, Counts};
use qalgo_ir::{Circuit, ClbitId, QubitId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::SimonConfig;
use crate::error::{AlgoError, AlgoResult};
use crate::execution::execute;
use crate::gf2::LinearSystemGf2;

/// Outcome of a Simon run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimonReport {
    /// Secret encoded in the oracle.
    pub secret: String,
    /// Measured input register.
    pub counts: Counts,
    /// Distinct non-zero outcomes, each an equation `y · s ≡ 0`.
    pub equations: Vec<Vec<bool>>,
    /// Secret recovered from the equations.
    pub recovered: String,
}

impl SimonReport {
    /// Whether the recovered secret equals the encoded one.
    pub fn is_correct(&self) -> bool {
        self.recovered == self.secret
    }
}

/// Parse a secret string into bits.
pub fn parse_secret(secret: &str) -> AlgoResult<Vec<bool>> {
    if secret.is_empty() {
        return Err(AlgoError::InvalidQubitCount(0));
    }
    secret
        .chars()
        .map(|ch| match ch {
            '0' => Ok(false),
            '1' => Ok(true),
            _ => Err(AlgoError::InvalidSecret {
                secret: secret.to_string(),
                ch,
            }),
        })
        .collect()
}

/// Render bits as a secret string.
pub fn render_bits(bits: &[bool]) -> String {
    bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// Build the oracle over `2n` qubits for an `n`-character secret.
///
/// Input qubit `i` is copied onto output qubit `i + n`. For a non-zero
/// secret, the first set bit additionally flips every output qubit where
/// the secret is set, making `f` two-to-one along `s`.
pub fn oracle(secret: &str) -> AlgoResult<Circuit> {
    let bits = parse_secret(secret)?;
    let n = bits.len() as u32;

    let mut oracle = Circuit::with_size("simon_oracle", 2 * n, 0);
    for i in 0..n {
        oracle.cx(QubitId(i), QubitId(i + n))?;
    }

    if let Some(flag) = bits.iter().position(|&b| b) {
        let flag = QubitId(flag as u32);
        for (i, _) in bits.iter().enumerate().filter(|(_, b)| **b) {
            oracle.cx(flag, QubitId(i as u32 + n))?;
        }
    }
    Ok(oracle)
}

/// Wrap the oracle into the measurement circuit over the input register.
pub fn circuit(oracle: &Circuit) -> AlgoResult<Circuit> {
    let n = (oracle.num_qubits() / 2) as u32;
    let mut circuit = Circuit::with_size("simon", 2 * n, n);
    circuit.h_all(QubitId::range(0..n))?;
    circuit.compose(oracle, QubitId::range(0..2 * n))?;
    circuit.h_all(QubitId::range(0..n))?;
    circuit.measure(QubitId::range(0..n), ClbitId::range(0..n))?;
    Ok(circuit)
}

/// Collect the informative outcomes of a run as equations.
///
/// The all-zero outcome says nothing about `s` and is dropped. Equations
/// are returned in key order.
pub fn equations(counts: &Counts, n: usize) -> AlgoResult<Vec<Vec<bool>>> {
    let mut equations = Vec::new();
    for (key, _) in counts.sorted() {
        let bits = Counts::bits_of(key)
            .filter(|bits| bits.len() == n)
            .ok_or(AlgoError::EquationWidthMismatch {
                expected: n,
                got: key.len(),
            })?;
        if bits.iter().any(|&b| b) {
            equations.push(bits);
        }
    }
    Ok(equations)
}

/// Recover `s` from equations over `n` bits.
///
/// With no equations, or when they only admit `s = 0`, this is the
/// all-zero string.
pub fn recover_secret(equations: &[Vec<bool>], n: usize) -> AlgoResult<String> {
    let mut system = LinearSystemGf2::from_rows(n, equations.iter().cloned())?;
    let pivots = system.row_reduce();
    debug!(equations = equations.len(), rank = pivots.len(), "Reduced Simon system");
    Ok(render_bits(&system.solve()))
}

/// Run Simon's algorithm for `secret` and recover it from the histogram.
#[instrument(skip(backend, config))]
pub async fn run(
    backend: &dyn Backend,
    secret: &str,
    config: &SimonConfig,
) -> AlgoResult<SimonReport> {
    let oracle = oracle(secret)?;
    let n = secret.len();
    let circuit = circuit(&oracle)?;

    let counts = execute(backend, &circuit, config.shots).await?;
    let equations = equations(&counts, n)?;
    let recovered = recover_secret(&equations, n)?;
    info!(%recovered, equations = equations.len(), "Simon finished");

    Ok(SimonReport {
        secret: secret.to_string(),
        counts,
        equations,
        recovered,
    })
}
