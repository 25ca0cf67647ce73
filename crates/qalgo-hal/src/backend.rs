//! The execution contract.
//!
//! A run goes through four calls on a [`Backend`]:
//!
//! ```text
//!   validate(circuit) ──→ submit(circuit, shots) ──→ status(job) ──→ result(job)
//! ```
//!
//! `wait` is provided on top of `status` and `result`. Local backends may
//! finish a job inside `submit`; remote ones leave it queued and the caller
//! polls.

use std::time::Duration;

use async_trait::async_trait;
use qalgo_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Delay between status polls in [`Backend::wait`].
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Polls made by [`Backend::wait`] before giving up (five minutes).
pub const MAX_POLLS: u32 = 600;

/// Named backend settings.
///
/// Everything except the name lives in `extra` so each backend can read the
/// keys it understands. In JSON the extra keys sit next to `name`:
///
/// ```json
/// { "name": "simulator", "max_qubits": 16, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Set a backend-specific key.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer from `extra`.
    ///
    /// Absent keys are `Ok(None)`; present keys of the wrong type are a
    /// configuration error.
    pub fn extra_u64(&self, key: &str) -> HalResult<Option<u64>> {
        let Some(value) = self.extra.get(key) else {
            return Ok(None);
        };
        value.as_u64().map(Some).ok_or_else(|| {
            HalError::Configuration(format!(
                "'{key}' must be a non-negative integer, got {value}"
            ))
        })
    }
}

/// Something that runs circuits and returns histograms.
#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    /// Static description of what the backend accepts.
    fn capabilities(&self) -> &Capabilities;

    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Check a circuit without running it.
    ///
    /// Problems with the circuit are reported as
    /// [`ValidationResult::Invalid`]; `Err` is reserved for the backend
    /// itself failing.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Poll until the job is terminal and return its result.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        for poll in 0..MAX_POLLS {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(reason) => {
                    return Err(HalError::JobFailed {
                        job: job_id.clone(),
                        reason,
                    });
                }
                JobStatus::Cancelled => return Err(HalError::JobCancelled(job_id.clone())),
                JobStatus::Queued | JobStatus::Running => {
                    trace!(job = %job_id, poll, "Job still pending");
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
            }
        }
        Err(HalError::Timeout {
            job: job_id.clone(),
            polls: MAX_POLLS,
        })
    }
}

/// Whether a backend takes jobs right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendAvailability {
    pub is_available: bool,
    /// Jobs ahead of a new submission, when known.
    pub queue_depth: Option<u32>,
    /// Reason given when unavailable.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Up with an empty queue.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Outcome of [`Backend::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { reasons: Vec<String> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Construction of a backend from [`BackendConfig`].
pub trait BackendFactory: Backend + Sized {
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
