//! Measurement results.
//!
//! A [`Counts`] histogram maps measured bit-strings to the number of shots
//! that produced them. Keys are rendered with classical bit 0 as the
//! rightmost character, so `"01"` on two classical bits means bit 0 read
//! `1` and bit 1 read `0`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Histogram of measured bit-strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from `(bitstring, count)` pairs.
    ///
    /// Repeated keys accumulate.
    pub fn from_pairs<K: Into<String>>(pairs: impl IntoIterator<Item = (K, u64)>) -> Self {
        pairs.into_iter().collect()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Count for a bit-string, zero when it was never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The most frequently observed bit-string.
    ///
    /// Ties are broken towards the lexicographically smallest key so the
    /// answer does not depend on hash order.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.counts
            .iter()
            .max_by(|(ka, va), (kb, vb)| va.cmp(vb).then_with(|| kb.cmp(ka)))
            .map(|(k, v)| (k, *v))
    }

    /// Fraction of shots that produced `bitstring`.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }

    /// Iterate over `(bitstring, count)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Entries sorted by bit-string.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_unstable();
        entries
    }

    /// Number of distinct bit-strings.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Render `value` as a key over `width` classical bits.
    pub fn format_bits(value: u64, width: usize) -> String {
        format!("{value:0width$b}")
    }

    /// Decode a key into bits indexed by classical bit (index 0 = bit 0).
    ///
    /// Returns `None` if the key contains anything other than `0` and `1`.
    pub fn bits_of(bitstring: &str) -> Option<Vec<bool>> {
        bitstring
            .chars()
            .rev()
            .map(|c| match c {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

/// Result of executing a circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement histogram.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Record the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}
