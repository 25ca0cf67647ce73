//! Qubit and classical bit identifiers.
//!
//! A register is purely an indexing convention: qubit `i` of a circuit of
//! size `n` is `QubitId(i)` for `i` in `[0, n)`, and bit `i` of an integer
//! basis state corresponds to qubit `i`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Index of a qubit within a circuit's register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Iterate over the qubit ids in `range`.
    pub fn range(range: Range<u32>) -> impl Iterator<Item = QubitId> + Clone {
        range.map(QubitId)
    }

    /// Position of this qubit as a bit index into a basis-state integer.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Index of a classical bit within a circuit's classical register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl ClbitId {
    /// Iterate over the classical bit ids in `range`.
    pub fn range(range: Range<u32>) -> impl Iterator<Item = ClbitId> + Clone {
        range.map(ClbitId)
    }

    /// Position of this bit in a measured outcome integer.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}
