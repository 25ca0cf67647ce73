//! Run configuration for the algorithm runners.
//!
//! Every config deserializes from JSON with missing fields falling back to
//! their defaults, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

/// Shot budget for Deutsch-Jozsa and Grover runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of shots per circuit.
    pub shots: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { shots: 1024 }
    }
}

/// Shot budget for Simon runs.
///
/// Simon needs many distinct outcomes to span the secret's orthogonal
/// complement, so the default is larger than [`RunConfig`]'s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimonConfig {
    /// Number of shots per circuit.
    pub shots: u32,
}

impl Default for SimonConfig {
    fn default() -> Self {
        Self { shots: 10_000 }
    }
}

/// How Shor's classical loop obtains a period for a candidate base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStrategy {
    /// Brute-force multiplicative order.
    #[default]
    Classical,
    /// Ideal phase sample followed by continued-fraction recovery.
    PhaseEstimation,
}

/// Configuration for Shor factoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShorConfig {
    /// Number of random bases tried before giving up.
    pub max_attempts: u32,
    /// Period estimation strategy.
    pub period_strategy: PeriodStrategy,
}

impl Default for ShorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 64,
            period_strategy: PeriodStrategy::default(),
        }
    }
}

impl ShorConfig {
    /// Use the given period estimation strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: PeriodStrategy) -> Self {
        self.period_strategy = strategy;
        self
    }

    /// Cap the number of attempts.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}
