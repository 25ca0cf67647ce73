//! Shor factoring: the classical loop around period finding.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::ShorConfig;
use crate::error::{AlgoError, AlgoResult};
use crate::period::PeriodFinder;

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `base^exp mod modulus`.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = u128::from(modulus);
    let mut base = u128::from(base) % m;
    let mut acc = 1u128;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    acc as u64
}

/// A factor pair with the number of bases tried to find it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factorization {
    /// The two factors, in the order they were found.
    pub factors: (u64, u64),
    /// Random bases drawn; zero for the even shortcut.
    pub attempts: u32,
}

impl Factorization {
    /// The factors with the smaller first.
    pub fn sorted(&self) -> (u64, u64) {
        let (p, q) = self.factors;
        (p.min(q), p.max(q))
    }
}

/// Factor `n` using the period strategy in `config`.
///
/// Even numbers return `(2, n/2)` without drawing a base. Odd numbers run
/// the randomized loop for at most `config.max_attempts` bases; primes and
/// prime powers exhaust it.
pub fn factor<R: Rng + ?Sized>(
    n: u64,
    config: &ShorConfig,
    rng: &mut R,
) -> AlgoResult<Factorization> {
    let finder = config.period_strategy.finder();
    factor_with(n, finder.as_ref(), config.max_attempts, rng)
}

/// Factor `n` with an explicit period finder.
#[instrument(skip(finder, rng), fields(finder = finder.name()))]
pub fn factor_with<R: Rng + ?Sized>(
    n: u64,
    finder: &dyn PeriodFinder,
    max_attempts: u32,
    rng: &mut R,
) -> AlgoResult<Factorization> {
    if n < 2 {
        return Err(AlgoError::InvalidModulus(n));
    }
    if n % 2 == 0 {
        return Ok(Factorization {
            factors: (2, n / 2),
            attempts: 0,
        });
    }

    for attempt in 1..=max_attempts {
        let a = rng.gen_range(2..n);
        let g = gcd(a, n);
        if g != 1 {
            info!(a, attempt, "Base shares a factor with n");
            return Ok(Factorization {
                factors: (g, n / g),
                attempts: attempt,
            });
        }

        let Some(r) = finder.find_period(a, n, &mut &mut *rng) else {
            debug!(a, attempt, "No period found");
            continue;
        };
        if r % 2 != 0 {
            debug!(a, r, attempt, "Odd period");
            continue;
        }

        let x = mod_pow(a, r / 2, n);
        if x == 1 || x == n - 1 {
            debug!(a, r, attempt, "Trivial square root of unity");
            continue;
        }

        let p = gcd(x - 1, n);
        let q = gcd(x + 1, n);
        if u128::from(p) * u128::from(q) == u128::from(n) {
            info!(a, r, attempt, p, q, "Factored");
            return Ok(Factorization {
                factors: (p, q),
                attempts: attempt,
            });
        }
        debug!(a, r, p, q, attempt, "Factors do not multiply back to n");
    }

    warn!(max_attempts, "Shor loop exhausted its attempts");
    Err(AlgoError::AttemptsExhausted {
        n,
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PeriodStrategy;
    use crate::period::ClassicalOrderFinder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(gcd(0, 9), 9);
    }

    #[test]
    fn test_mod_pow() {
        assert_eq!(mod_pow(7, 2, 15), 4);
        assert_eq!(mod_pow(2, 10, 1000), 24);
        assert_eq!(mod_pow(5, 0, 7), 1);
        assert_eq!(mod_pow(u64::MAX, 2, u64::MAX - 1), 1);
    }

    #[test]
    fn test_even_shortcut() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = factor(10, &ShorConfig::default(), &mut rng).unwrap();
        assert_eq!(result.factors, (2, 5));
        assert_eq!(result.attempts, 0);
    }

    #[test]
    fn test_factor_15_and_21() {
        for strategy in [PeriodStrategy::Classical, PeriodStrategy::PhaseEstimation] {
            let config = ShorConfig::default().with_strategy(strategy);
            let mut rng = StdRng::seed_from_u64(42);
            assert_eq!(factor(15, &config, &mut rng).unwrap().sorted(), (3, 5));
            assert_eq!(factor(21, &config, &mut rng).unwrap().sorted(), (3, 7));
        }
    }

    #[test]
    fn test_invalid_modulus() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            factor(1, &ShorConfig::default(), &mut rng),
            Err(AlgoError::InvalidModulus(1))
        ));
    }

    #[test]
    fn test_prime_exhausts_attempts() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = factor_with(13, &ClassicalOrderFinder, 8, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            AlgoError::AttemptsExhausted { n: 13, attempts: 8 }
        ));
    }
}
