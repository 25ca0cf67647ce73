//! Period estimation for Shor's classical loop.
//!
//! Two strategies find the order `r` of `a` modulo `N`:
//!
//! | Strategy | How `r` is obtained |
//! |----------|---------------------|
//! | [`ClassicalOrderFinder`] | trial exponentiation until `a^r ≡ 1` |
//! | [`PhaseEstimationFinder`] | an ideal `t`-bit phase sample `j/r`, recovered with continued fractions |
//!
//! Neither builds a circuit: the modular-exponentiation unitary needs
//! phase rotations outside the supported gate vocabulary.

use rand::{Rng, RngCore};

use crate::config::PeriodStrategy;
use crate::continued_fraction::limit_denominator;
use crate::shor::mod_pow;

/// Estimates the multiplicative order of `a` modulo `n`.
pub trait PeriodFinder: Send + Sync {
    /// A candidate period, or `None` when this attempt produced nothing usable.
    fn find_period(&self, a: u64, n: u64, rng: &mut dyn RngCore) -> Option<u64>;

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Smallest `r ≥ 1` with `a^r ≡ 1 (mod n)`, if any exists below `n`.
pub fn multiplicative_order(a: u64, n: u64) -> Option<u64> {
    if n < 2 {
        return None;
    }
    let a = u128::from(a % n);
    let modulus = u128::from(n);
    let mut x = a;
    for r in 1..n {
        if x == 1 {
            return Some(r);
        }
        x = x * a % modulus;
    }
    None
}

/// Brute-force order finding.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalOrderFinder;

impl PeriodFinder for ClassicalOrderFinder {
    fn find_period(&self, a: u64, n: u64, _rng: &mut dyn RngCore) -> Option<u64> {
        multiplicative_order(a, n)
    }

    fn name(&self) -> &'static str {
        "classical"
    }
}

/// Continued-fraction recovery from a sampled phase.
///
/// Models an ideal phase-estimation register of `t = 2·bitlen(N)` qubits:
/// the sample is `j/r` for uniform `j ∈ [0, r)`, rounded to `t` bits. The
/// denominator recovered from it is only a divisor of `r` when `j` shares
/// a factor with `r`, so candidates are verified and rejected ones return
/// `None`. Moduli of 32 bits or more are not supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseEstimationFinder;

impl PhaseEstimationFinder {
    /// Precision of the phase register for modulus `n`.
    pub fn precision(n: u64) -> u32 {
        2 * (u64::BITS - n.leading_zeros())
    }
}

impl PeriodFinder for PhaseEstimationFinder {
    fn find_period(&self, a: u64, n: u64, rng: &mut dyn RngCore) -> Option<u64> {
        let t = Self::precision(n);
        if t > 62 {
            return None;
        }
        let r = multiplicative_order(a, n)?;

        let scale = 1u64 << t;
        let j = rng.gen_range(0..r);
        let phase = ((u128::from(j) << t) + u128::from(r) / 2) / u128::from(r);
        let phase = u64::try_from(phase).ok()? % scale;

        let (_, q) = limit_denominator(phase, scale, n)?;
        (q > 1 && mod_pow(a, q, n) == 1).then_some(q)
    }

    fn name(&self) -> &'static str {
        "phase_estimation"
    }
}

impl PeriodStrategy {
    /// The finder implementing this strategy.
    pub fn finder(self) -> Box<dyn PeriodFinder> {
        match self {
            PeriodStrategy::Classical => Box::new(ClassicalOrderFinder),
            PeriodStrategy::PhaseEstimation => Box::new(PhaseEstimationFinder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_multiplicative_order() {
        assert_eq!(multiplicative_order(7, 15), Some(4));
        assert_eq!(multiplicative_order(2, 21), Some(6));
        assert_eq!(multiplicative_order(4, 15), Some(2));
        // Not coprime: no order exists.
        assert_eq!(multiplicative_order(3, 15), None);
    }

    #[test]
    fn test_precision() {
        assert_eq!(PhaseEstimationFinder::precision(15), 8);
        assert_eq!(PhaseEstimationFinder::precision(21), 10);
    }

    #[test]
    fn test_phase_estimation_returns_verified_periods() {
        let mut rng = StdRng::seed_from_u64(3);
        let finder = PhaseEstimationFinder;
        let mut found = 0;
        for _ in 0..50 {
            if let Some(r) = finder.find_period(7, 15, &mut rng) {
                assert_eq!(r, 4);
                found += 1;
            }
        }
        // j ∈ {1, 3} of {0, 1, 2, 3} yields the full period.
        assert!(found > 10);
    }

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(PeriodStrategy::Classical.finder().name(), "classical");
        assert_eq!(
            PeriodStrategy::PhaseEstimation.finder().name(),
            "phase_estimation"
        );
    }
}
