//! Factorials, powers, and sums in `f64`.
//!
//! Queueing normalizations multiply factorials of server counts or
//! population sizes by powers of the offered load. Past `170!` the factorial
//! alone overflows `f64` while the product it belongs to is still finite, so
//! those products are formed from logarithms instead.

/// `ln(m! / (m − k)!)`, the logarithm of the falling factorial.
///
/// Returns negative infinity when `k > m`, since the falling factorial is zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ln_falling_factorial(m: usize, k: usize) -> f64 {
    if k > m {
        return f64::NEG_INFINITY;
    }

    (m - k + 1..=m).map(|j| (j as f64).ln()).sum()
}

/// `ln(n!)`.
#[must_use]
pub fn ln_factorial(n: usize) -> f64 {
    ln_falling_factorial(n, n)
}

/// `ln(Σ exp(xᵢ))`, evaluated without overflowing the exponentials.
///
/// Returns negative infinity for an empty sequence.
#[must_use]
pub fn ln_sum_exp(terms: impl IntoIterator<Item = f64> + Clone) -> f64 {
    let max = terms.clone().into_iter().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return max;
    }

    let scaled: f64 = terms.into_iter().map(|x| (x - max).exp()).sum();
    max + scaled.ln()
}

/// `base` raised to a non-negative integer power.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn powu(base: f64, exponent: usize) -> f64 {
    match i32::try_from(exponent) {
        Ok(exponent) => base.powi(exponent),
        Err(_) => base.powf(exponent as f64),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn small_factorials() {
        assert_relative_eq!(ln_factorial(0), 0.0);
        assert_relative_eq!(ln_factorial(1), 0.0);
        assert_relative_eq!(ln_factorial(5).exp(), 120.0, max_relative = 1e-12);
        assert_relative_eq!(ln_factorial(10).exp(), 3_628_800.0, max_relative = 1e-12);
    }

    #[test]
    fn factorials_past_f64_range_stay_finite() {
        // ln(200!) ≈ 863.23
        assert_relative_eq!(ln_factorial(200), 863.231_987, epsilon = 1e-5);
        assert!(ln_factorial(10_000).is_finite());
    }

    #[test]
    fn falling_factorials() {
        assert_relative_eq!(ln_falling_factorial(6, 0), 0.0);
        assert_relative_eq!(ln_falling_factorial(6, 1).exp(), 6.0, max_relative = 1e-12);
        assert_relative_eq!(ln_falling_factorial(6, 3).exp(), 120.0, max_relative = 1e-12);
        assert_relative_eq!(ln_falling_factorial(6, 6), ln_factorial(6));
        assert_eq!(ln_falling_factorial(3, 4), f64::NEG_INFINITY);
    }

    #[test]
    fn sums_of_exponentials() {
        assert_relative_eq!(
            ln_sum_exp([0.0, 1.0_f64.ln(), 2.0_f64.ln()]),
            4.0_f64.ln(),
            max_relative = 1e-12
        );
        // exp(1000) overflows on its own.
        assert_relative_eq!(
            ln_sum_exp([1000.0, 1000.0]),
            1000.0 + 2.0_f64.ln(),
            max_relative = 1e-12
        );
        assert_eq!(ln_sum_exp(Vec::new()), f64::NEG_INFINITY);
    }

    #[test]
    fn integer_powers() {
        assert_relative_eq!(powu(2.0, 0), 1.0);
        assert_relative_eq!(powu(2.0, 10), 1024.0);
        assert_relative_eq!(powu(0.5, 3), 0.125);
    }
}
