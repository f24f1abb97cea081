//! Goodness-of-fit checks for samplers.
//!
//! The one-sample Kolmogorov–Smirnov test compares the empirical CDF of a
//! sample against a theoretical CDF. It is how the samplers in this crate
//! are checked against their target laws.
//!
//! # Algorithms
//!
//! - **Statistic**: `Dₙ = maxᵢ max(i/n − F(x₍ᵢ₎), F(x₍ᵢ₎) − (i−1)/n)` over
//!   the sorted sample.
//! - **Critical value**: asymptotic Kolmogorov distribution,
//!   `c(α) = √(−ln(α/2) / 2)`, scaled by `1/√n`.
//!   Reference: Smirnov (1948), "Table for Estimating the Goodness of Fit
//!   of Empirical Distributions", *Ann. Math. Statist.* 19(2).

/// Outcome of a one-sample Kolmogorov–Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsTest {
    /// The statistic `Dₙ`.
    pub statistic: f64,
    /// Critical value of `Dₙ` at the requested significance level.
    pub critical_value: f64,
}

impl KsTest {
    /// Whether the sample is rejected as not drawn from the theoretical law.
    pub fn rejects(&self) -> bool {
        self.statistic > self.critical_value
    }
}

/// Computes the Kolmogorov–Smirnov statistic `Dₙ` of `samples` against
/// the theoretical CDF `cdf`.
///
/// # Complexity
/// Time: O(n log n), Space: O(n)
///
/// # Returns
/// - `None` if `samples` is empty or contains NaN.
///
/// # Examples
/// ```
/// use u_variate::stats::ks_statistic;
/// // An evenly spread U(0,1) sample reaches the minimum Dₙ = 1/(2n).
/// let xs = [0.1, 0.3, 0.5, 0.7, 0.9];
/// let d = ks_statistic(&xs, |x| x).unwrap();
/// assert!((d - 0.1).abs() < 1e-12);
/// ```
pub fn ks_statistic<F: Fn(f64) -> f64>(samples: &[f64], cdf: F) -> Option<f64> {
    if samples.is_empty() || samples.iter().any(|x| x.is_nan()) {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let d = sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let f = cdf(x);
            let above = (i + 1) as f64 / n - f;
            let below = f - i as f64 / n;
            above.max(below)
        })
        .fold(0.0_f64, f64::max);
    Some(d)
}

/// Asymptotic critical value of `Dₙ` at significance level `alpha`.
///
/// # Returns
/// - `None` if `n == 0` or `alpha` is outside `(0, 1)`.
///
/// # Examples
/// ```
/// use u_variate::stats::ks_critical_value;
/// // The classic 1.36/√n at α = 0.05.
/// let c = ks_critical_value(100, 0.05).unwrap();
/// assert!((c - 0.1358).abs() < 1e-3);
/// ```
pub fn ks_critical_value(n: usize, alpha: f64) -> Option<f64> {
    if n == 0 || !(alpha > 0.0 && alpha < 1.0) {
        return None;
    }
    Some((-(alpha / 2.0).ln() / 2.0).sqrt() / (n as f64).sqrt())
}

/// Runs the one-sample Kolmogorov–Smirnov test at level `alpha`.
///
/// # Returns
/// - `None` under the conditions of [`ks_statistic`] or
///   [`ks_critical_value`].
pub fn ks_test<F: Fn(f64) -> f64>(samples: &[f64], cdf: F, alpha: f64) -> Option<KsTest> {
    let critical_value = ks_critical_value(samples.len(), alpha)?;
    let statistic = ks_statistic(samples, cdf)?;
    Some(KsTest {
        statistic,
        critical_value,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistic_single_point() {
        // One sample at the median: D = 0.5.
        let d = ks_statistic(&[0.5], |x| x).unwrap();
        assert!((d - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_statistic_order_independent() {
        let a = ks_statistic(&[0.9, 0.1, 0.5], |x| x).unwrap();
        let b = ks_statistic(&[0.1, 0.5, 0.9], |x| x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_statistic_detects_wrong_law() {
        // All mass near 1 against U(0,1).
        let xs: Vec<f64> = (0..100).map(|i| 0.9 + i as f64 * 0.001).collect();
        let ks = ks_test(&xs, |x| x, 0.05).unwrap();
        assert!(ks.rejects());
        assert!(ks.statistic > 0.85);
    }

    #[test]
    fn test_statistic_rejects_bad_input() {
        assert!(ks_statistic(&[], |x| x).is_none());
        assert!(ks_statistic(&[0.1, f64::NAN], |x| x).is_none());
    }

    #[test]
    fn test_critical_value() {
        let c = ks_critical_value(1, 0.05).unwrap();
        assert!((c - 1.3581).abs() < 1e-3);
        assert!(ks_critical_value(0, 0.05).is_none());
        assert!(ks_critical_value(10, 0.0).is_none());
        assert!(ks_critical_value(10, 1.0).is_none());
    }

    #[test]
    fn test_uniform_grid_passes() {
        let n = 1000;
        let xs: Vec<f64> = (0..n).map(|i| (i as f64 + 0.5) / n as f64).collect();
        let ks = ks_test(&xs, |x| x, 0.05).unwrap();
        assert!(!ks.rejects());
        assert!((ks.statistic - 0.5 / n as f64).abs() < 1e-12);
    }
}
