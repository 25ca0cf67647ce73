//! Linear algebra over GF(2).
//!
//! Rows are bit-vectors `y` standing for equations `y · s ≡ 0 (mod 2)`.
//! Elimination uses XOR only.

use crate::error::{AlgoError, AlgoResult};

/// Parity of the bitwise AND of two vectors.
pub fn dot(a: &[bool], b: &[bool]) -> bool {
    a.iter().zip(b).fold(false, |acc, (&x, &y)| acc ^ (x & y))
}

/// A homogeneous linear system over GF(2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearSystemGf2 {
    width: usize,
    rows: Vec<Vec<bool>>,
}

impl LinearSystemGf2 {
    /// An empty system over `width` unknowns.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
        }
    }

    /// Build a system from equations, checking every row has `width` bits.
    pub fn from_rows(
        width: usize,
        rows: impl IntoIterator<Item = Vec<bool>>,
    ) -> AlgoResult<Self> {
        let mut system = Self::new(width);
        for row in rows {
            system.push(row)?;
        }
        Ok(system)
    }

    /// Add an equation.
    pub fn push(&mut self, row: Vec<bool>) -> AlgoResult<()> {
        if row.len() != self.width {
            return Err(AlgoError::EquationWidthMismatch {
                expected: self.width,
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of unknowns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Current equations.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Reduce in place to reduced row-echelon form.
    ///
    /// All-zero rows are dropped. Returns the pivot column of each
    /// remaining row, in row order.
    pub fn row_reduce(&mut self) -> Vec<usize> {
        let mut pivots = Vec::new();
        for col in 0..self.width {
            let rank = pivots.len();
            let Some(found) = (rank..self.rows.len()).find(|&r| self.rows[r][col]) else {
                continue;
            };
            self.rows.swap(rank, found);

            let pivot_row = self.rows[rank].clone();
            for (r, row) in self.rows.iter_mut().enumerate() {
                if r != rank && row[col] {
                    for (bit, &p) in row.iter_mut().zip(&pivot_row) {
                        *bit ^= p;
                    }
                }
            }
            pivots.push(col);
        }
        self.rows.truncate(pivots.len());
        pivots
    }

    /// Number of independent equations.
    pub fn rank(&self) -> usize {
        self.clone().row_reduce().len()
    }

    /// A vector orthogonal to every equation.
    ///
    /// Sets the first free unknown to 1 and the other free unknowns to 0,
    /// then reads the pivot unknowns off the reduced rows. Returns the
    /// all-zero vector when the system has no equations or full rank.
    pub fn solve(&self) -> Vec<bool> {
        let mut reduced = self.clone();
        let pivots = reduced.row_reduce();
        let mut solution = vec![false; self.width];
        if pivots.is_empty() {
            return solution;
        }

        if let Some(free) = (0..self.width).find(|c| !pivots.contains(c)) {
            solution[free] = true;
            for (row, &pivot) in reduced.rows.iter().zip(&pivots) {
                solution[pivot] = row[free];
            }
        }
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_dot() {
        assert!(!dot(&bits("101"), &bits("101")));
        assert!(dot(&bits("110"), &bits("100")));
    }

    #[test]
    fn test_row_reduce() {
        let mut system =
            LinearSystemGf2::from_rows(3, [bits("110"), bits("011"), bits("101")]).unwrap();
        let pivots = system.row_reduce();
        assert_eq!(pivots, vec![0, 1]);
        assert_eq!(system.rows(), &[bits("101"), bits("011")]);
    }

    #[test]
    fn test_solve_unique_kernel() {
        // Orthogonal complement of 101 in GF(2)^3.
        let system = LinearSystemGf2::from_rows(3, [bits("010"), bits("101")]).unwrap();
        assert_eq!(system.solve(), bits("101"));
    }

    #[test]
    fn test_solve_empty_and_full_rank() {
        assert_eq!(LinearSystemGf2::new(4).solve(), vec![false; 4]);
        let full = LinearSystemGf2::from_rows(2, [bits("10"), bits("01")]).unwrap();
        assert_eq!(full.solve(), vec![false; 2]);
        assert_eq!(full.rank(), 2);
    }

    #[test]
    fn test_width_mismatch() {
        let err = LinearSystemGf2::from_rows(3, [bits("10")]).unwrap_err();
        assert!(matches!(
            err,
            AlgoError::EquationWidthMismatch {
                expected: 3,
                got: 2
            }
        ));
    }
}
