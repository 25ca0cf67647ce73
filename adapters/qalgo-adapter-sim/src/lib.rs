//! qalgo Local Statevector Simulator
//!
//! This crate provides the reference execution backend for the algorithm
//! suite. It keeps the full statevector, applies every gate once and then
//! samples all shots from the final distribution.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector over the `x`, `h`, `z`, `cx`,
//!   `mcx`, `mcz` and `mch` vocabulary; composite gates are expanded
//! - **Reproducible Sampling**: seed the sampler with
//!   [`SimulatorBackend::with_seed`] or a `seed` entry in the backend config
//! - **Terminal Measurements**: a gate acting on an already-measured qubit
//!   is rejected
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 30 | ~16 GB | Upper limit ([`MAX_SIMULATED_QUBITS`]) |
//!
//! Finished jobs are kept up to a retention limit (default
//! [`DEFAULT_JOB_RETENTION`]); older ones are evicted.
//!
//! # Example
//!
//! ```ignore
//! use qalgo_adapter_sim::SimulatorBackend;
//! use qalgo_hal::Backend;
//! use qalgo_ir::{Circuit, QubitId};
//!
//! let backend = SimulatorBackend::with_seed(7);
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?.measure_all()?;
//! let job_id = backend.submit(&circuit, 1000).await?;
//! let result = backend.wait(&job_id).await?;
//!
//! // Expect ~50% |00⟩ and ~50% |11⟩
//! println!("Results: {:?}", result.counts.sorted());
//! ```

mod simulator;
mod statevector;

pub use simulator::{
    DEFAULT_JOB_RETENTION, MAX_EXPANDED_GATES, MAX_SIMULATED_QUBITS, SimulatorBackend,
};
