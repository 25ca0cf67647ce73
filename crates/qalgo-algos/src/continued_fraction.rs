//! Best rational approximations.

/// The closest fraction to `numerator / denominator` with denominator at
/// most `max_denominator`, in lowest terms.
///
/// Walks the continued-fraction convergents and then compares the last
/// convergent with the best semiconvergent, so the answer matches the
/// classic `limit_denominator` algorithm. Returns `None` for a zero
/// denominator or a zero bound.
pub fn limit_denominator(
    numerator: u64,
    denominator: u64,
    max_denominator: u64,
) -> Option<(u64, u64)> {
    if denominator == 0 || max_denominator == 0 {
        return None;
    }
    let g = crate::shor::gcd(numerator, denominator);
    let (num, den) = (u128::from(numerator / g), u128::from(denominator / g));
    let max_den = u128::from(max_denominator);
    if den <= max_den {
        return Some((numerator / g, denominator / g));
    }

    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    let (mut n, mut d) = (num, den);
    loop {
        let a = n / d;
        let q2 = q0 + a * q1;
        if q2 > max_den {
            break;
        }
        (p0, q0, p1, q1) = (p1, q1, p0 + a * p1, q2);
        (n, d) = (d, n - a * d);
    }

    let k = (max_den - q0) / q1;
    let (bp, bq) = (p0 + k * p1, q0 + k * q1);

    // |p/q - num/den| compared across candidates, scaled by den.
    let err = |p: u128, q: u128| (p as i128 * den as i128 - num as i128 * q as i128).unsigned_abs();
    let (p, q) = if err(p1, q1) * bq <= err(bp, bq) * q1 {
        (p1, q1)
    } else {
        (bp, bq)
    };
    Some((u64::try_from(p).ok()?, u64::try_from(q).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_small() {
        assert_eq!(limit_denominator(1, 4, 10), Some((1, 4)));
        assert_eq!(limit_denominator(0, 8, 15), Some((0, 1)));
        assert_eq!(limit_denominator(6, 8, 15), Some((3, 4)));
    }

    #[test]
    fn test_pi() {
        assert_eq!(
            limit_denominator(3_141_592_653_589_793, 1_000_000_000_000_000, 1000),
            Some((355, 113))
        );
        assert_eq!(
            limit_denominator(3_141_592_653_589_793, 1_000_000_000_000_000, 100),
            Some((311, 99))
        );
    }

    #[test]
    fn test_prefers_closer_candidate() {
        assert_eq!(limit_denominator(3, 8, 3), Some((1, 3)));
    }

    #[test]
    fn test_recovers_phase() {
        // 3/4 sampled at 8 bits, bounded by N = 15.
        assert_eq!(limit_denominator(192, 256, 15), Some((3, 4)));
        // 1/6 rounded to 10 bits: 171/1024.
        assert_eq!(limit_denominator(171, 1024, 21), Some((1, 6)));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(limit_denominator(1, 0, 10), None);
        assert_eq!(limit_denominator(1, 3, 0), None);
    }
}
