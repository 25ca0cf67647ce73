//! What a backend accepts.
//!
//! Capabilities are fixed when a backend is built. Callers compare a
//! circuit against them before submitting; the simulator enforces them in
//! `validate` and `submit`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The primitive vocabulary emitted by the algorithm suite.
pub const STANDARD_GATES: [&str; 7] = ["x", "h", "z", "cx", "mcx", "mcz", "mch"];

/// Limits and gate support of one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub name: String,
    /// Register width.
    pub num_qubits: u32,
    /// Largest accepted shot count.
    pub max_shots: u32,
    pub is_simulator: bool,
    pub gate_set: GateSet,
}

impl Capabilities {
    /// A statevector simulator of `num_qubits` qubits running [`STANDARD_GATES`].
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            max_shots: 1_000_000,
            is_simulator: true,
            gate_set: GateSet::standard(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether `shots` is within `1..=max_shots`.
    pub fn accepts_shots(&self, shots: u32) -> bool {
        (1..=self.max_shots).contains(&shots)
    }
}

/// Primitive gate names a backend executes.
///
/// Composite gates never appear here: executors expand them before
/// checking support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateSet(BTreeSet<String>);

impl GateSet {
    pub fn standard() -> Self {
        STANDARD_GATES.into_iter().collect()
    }

    pub fn contains(&self, gate: &str) -> bool {
        self.0.contains(gate)
    }

    /// Gate names in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for GateSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_vocabulary() {
        let gates = GateSet::standard();
        assert!(gates.contains("mcz"));
        assert!(gates.contains("cx"));
        assert!(!gates.contains("rz"));
        assert_eq!(
            gates.iter().collect::<Vec<_>>(),
            vec!["cx", "h", "mch", "mcx", "mcz", "x", "z"]
        );
    }

    #[test]
    fn test_shot_limits() {
        let caps = Capabilities::simulator(4);
        assert!(!caps.accepts_shots(0));
        assert!(caps.accepts_shots(1));
        assert!(caps.accepts_shots(1_000_000));
        assert!(!caps.accepts_shots(1_000_001));
    }

    #[test]
    fn test_serde_shape() {
        let caps = Capabilities::simulator(4).with_name("local");
        let json = serde_json::to_value(&caps).unwrap();
        assert_eq!(json["name"], "local");
        assert_eq!(json["gate_set"].as_array().map(Vec::len), Some(7));

        let back: Capabilities = serde_json::from_value(json).unwrap();
        assert_eq!(back, caps);
    }
}
