//! Property-based tests for GF(2) elimination and the Shor shortcut.

use proptest::prelude::*;
use qalgo_algos::gf2::{LinearSystemGf2, dot};
use qalgo_algos::{ShorConfig, shor};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A width and a set of equations of that width.
fn arb_system() -> impl Strategy<Value = (usize, Vec<Vec<bool>>)> {
    (1usize..=10).prop_flat_map(|width| {
        (
            Just(width),
            prop::collection::vec(prop::collection::vec(any::<bool>(), width), 0..12),
        )
    })
}

proptest! {
    #[test]
    fn solution_is_orthogonal_to_every_equation((width, rows) in arb_system()) {
        let system = LinearSystemGf2::from_rows(width, rows.clone()).unwrap();
        let solution = system.solve();

        prop_assert_eq!(solution.len(), width);
        for row in &rows {
            prop_assert!(!dot(row, &solution));
        }
    }

    #[test]
    fn solution_is_nonzero_below_full_rank((width, rows) in arb_system()) {
        let system = LinearSystemGf2::from_rows(width, rows).unwrap();
        let rank = system.rank();
        let solution = system.solve();

        if rank > 0 && rank < width {
            prop_assert!(solution.iter().any(|&b| b));
        } else {
            prop_assert!(solution.iter().all(|&b| !b));
        }
    }

    #[test]
    fn reduction_is_idempotent((width, rows) in arb_system()) {
        let mut once = LinearSystemGf2::from_rows(width, rows).unwrap();
        let pivots = once.row_reduce();

        let mut twice = once.clone();
        prop_assert_eq!(twice.row_reduce(), pivots);
        prop_assert_eq!(twice.rows(), once.rows());
        prop_assert_eq!(twice.solve(), once.solve());
    }

    #[test]
    fn even_numbers_take_the_shortcut(k in 2u64..1_000_000) {
        let mut rng = StdRng::seed_from_u64(k);
        let result = shor::factor(2 * k, &ShorConfig::default(), &mut rng).unwrap();
        prop_assert_eq!(result.factors, (2, k));
        prop_assert_eq!(result.attempts, 0);
    }
}
