//! Blocking-result view over an asynchronous [`Backend`].

use qalgo_hal::{Backend, Counts, HalError, ValidationResult};
use qalgo_ir::Circuit;
use tracing::{debug, instrument};

use crate::error::AlgoResult;

/// Check availability, validate, submit and wait for `circuit`, returning
/// its histogram.
#[instrument(skip(backend, circuit), fields(backend = backend.name(), circuit = circuit.name()))]
pub async fn execute(backend: &dyn Backend, circuit: &Circuit, shots: u32) -> AlgoResult<Counts> {
    let availability = backend.availability().await?;
    if !availability.is_available {
        return Err(HalError::Unavailable {
            backend: backend.name().to_string(),
            reason: availability.status_message.unwrap_or_default(),
        }
        .into());
    }

    if let ValidationResult::Invalid { reasons } = backend.validate(circuit).await? {
        return Err(HalError::InvalidCircuit(reasons.join("; ")).into());
    }

    let job_id = backend.submit(circuit, shots).await?;
    let result = backend.wait(&job_id).await?;
    debug!(
        job = %job_id,
        outcomes = result.counts.len(),
        elapsed_ms = ?result.execution_time_ms,
        "Job finished"
    );
    Ok(result.counts)
}
