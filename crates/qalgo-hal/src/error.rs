//! Execution errors.

use thiserror::Error;

use crate::job::JobId;

/// Errors raised while validating, submitting or collecting a circuit run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The backend is not accepting jobs.
    #[error("Backend '{backend}' is unavailable: {reason}")]
    Unavailable {
        /// Backend name.
        backend: String,
        /// Status message reported by the backend.
        reason: String,
    },

    /// The circuit is wider than the backend's register.
    #[error("Circuit needs {required} qubits, backend supports {supported}")]
    TooManyQubits {
        /// Qubits in the circuit.
        required: usize,
        /// Qubits the backend can hold.
        supported: u32,
    },

    /// The circuit uses an operation the backend cannot run.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Shot count outside `1..=max`.
    #[error("Shot count must be between 1 and {max}, got {shots}")]
    InvalidShots {
        /// Requested shots.
        shots: u32,
        /// Backend limit.
        max: u32,
    },

    /// No job with this id exists.
    #[error("Job {0} not found")]
    JobNotFound(JobId),

    /// The job ran and failed.
    #[error("Job {job} failed: {reason}")]
    JobFailed {
        /// Job that failed.
        job: JobId,
        /// Failure reported by the backend.
        reason: String,
    },

    /// The job was cancelled before producing a result.
    #[error("Job {0} was cancelled")]
    JobCancelled(JobId),

    /// A result was requested before the job finished.
    #[error("Job {job} has no result yet (status: {status})")]
    NotFinished {
        /// Job queried.
        job: JobId,
        /// Status at the time of the query.
        status: String,
    },

    /// `wait` gave up polling.
    #[error("Job {job} did not finish after {polls} polls")]
    Timeout {
        /// Job waited on.
        job: JobId,
        /// Number of status polls made.
        polls: u32,
    },

    /// The final state could not be sampled.
    #[error("Sampling failed: {0}")]
    Sampling(String),

    /// Bad backend configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for execution operations.
pub type HalResult<T> = Result<T, HalError>;
