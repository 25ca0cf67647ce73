//! qalgo Algorithm Suite
//!
//! Oracle synthesis, circuit assembly and classical post-processing for
//! four textbook algorithms. Circuits are built with `qalgo-ir` and run on
//! any `qalgo-hal` [`Backend`](qalgo_hal::Backend).
//!
//! | Module | Oracle | Post-processing |
//! |--------|--------|-----------------|
//! | [`deutsch_jozsa`] | constant or random balanced function | all-zero test |
//! | [`grover`] | phase flip of marked states | success probability |
//! | [`simon`] | two-to-one XOR mask | [`gf2`] null space |
//! | [`shor`] | none (see [`period`]) | gcd of `a^(r/2) ± 1` |
//!
//! # Bit Ordering
//!
//! Bit `i` of an integer state is qubit `i` and classical bit `i`.
//! Histogram keys put classical bit 0 rightmost, so state `1` on three
//! qubits is reported as `"001"`.
//!
//! # Example
//!
//! ```ignore
//! use qalgo_adapter_sim::SimulatorBackend;
//! use qalgo_algos::{config::RunConfig, grover};
//!
//! let backend = SimulatorBackend::with_seed(7);
//! let report = grover::run(&backend, 3, &[1, 3], &RunConfig::default()).await?;
//! assert_eq!(report.iterations, 1);
//! assert!(report.success_probability > 0.9);
//! ```

mod bits;
pub mod config;
pub mod continued_fraction;
pub mod deutsch_jozsa;
pub mod error;
pub mod execution;
pub mod gf2;
pub mod grover;
pub mod period;
pub mod shor;
pub mod simon;

pub use config::{PeriodStrategy, RunConfig, ShorConfig, SimonConfig};
pub use error::{AlgoError, AlgoResult};
pub use execution::execute;
pub use gf2::LinearSystemGf2;
pub use period::{ClassicalOrderFinder, PeriodFinder, PhaseEstimationFinder};
pub use shor::Factorization;
