//! Job bookkeeping.
//!
//! A job moves forward through `Queued → Running → Completed`, or ends in
//! `Failed` or `Cancelled` from either of the first two. The last three
//! states are terminal.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Backend-assigned job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a job is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    /// Carries the backend's failure message.
    Failed(String),
    Cancelled,
}

impl JobStatus {
    /// Whether the job can no longer change state.
    pub fn is_terminal(&self) -> bool {
        self.stage() == 2
    }

    /// Whether the job finished with a result.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }

    fn stage(&self) -> u8 {
        match self {
            JobStatus::Queued => 0,
            JobStatus::Running => 1,
            JobStatus::Completed | JobStatus::Failed(_) | JobStatus::Cancelled => 2,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => f.write_str("queued"),
            JobStatus::Running => f.write_str("running"),
            JobStatus::Completed => f.write_str("completed"),
            JobStatus::Failed(reason) => write!(f, "failed ({reason})"),
            JobStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// A submitted circuit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    /// Backend the job was submitted to.
    pub backend: String,
    /// Name of the submitted circuit.
    pub circuit: String,
    pub shots: u32,
    pub status: JobStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// A freshly queued job.
    pub fn new(
        id: JobId,
        backend: impl Into<String>,
        circuit: impl Into<String>,
        shots: u32,
    ) -> Self {
        Self {
            id,
            backend: backend.into(),
            circuit: circuit.into(),
            shots,
            status: JobStatus::Queued,
            submitted_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Move the job to `next`.
    ///
    /// Returns `false` and leaves the job untouched when the job is already
    /// terminal or `next` would move it backwards.
    pub fn transition(&mut self, next: JobStatus) -> bool {
        if self.status.is_terminal() || next.stage() < self.status.stage() {
            return false;
        }
        if next.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        self.status = next;
        true
    }

    /// Time from submission to a terminal state.
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at.map(|end| end - self.submitted_at)
    }
}
