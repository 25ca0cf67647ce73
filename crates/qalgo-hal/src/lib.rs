//! qalgo Execution Adapter Layer
//!
//! This crate defines how the algorithm suite talks to whatever runs its
//! circuits: a common async [`Backend`] trait, [`Capabilities`] describing
//! what a backend accepts, job tracking, and the [`Counts`] histogram every
//! backend returns.
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use qalgo_adapter_sim::SimulatorBackend;
//! use qalgo_hal::Backend;
//! use qalgo_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//! circuit.measure(QubitId::range(0..2), ClbitId::range(0..2))?;
//!
//! let backend = SimulatorBackend::with_seed(7);
//! let job_id = backend.submit(&circuit, 1000).await?;
//! let result = backend.wait(&job_id).await?;
//!
//! // Only "00" and "11" are ever observed
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet, STANDARD_GATES};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
