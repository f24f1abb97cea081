//! Random number generation helpers.
//!
//! Provides seeded RNG construction, the half-open `(0, 1]` uniform draw
//! used by logarithm-based inversion formulas, and the cumulative table
//! that drives mixture selection.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use u_variate::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Draws a uniform value in `(0, 1]`.
///
/// Computed as `1 − U` for `U ~ U[0, 1)`, so the result is never zero
/// and `ln` of it is always finite.
///
/// # Examples
/// ```
/// use u_variate::random::{create_rng, unit_open_closed};
/// let mut rng = create_rng(7);
/// let u = unit_open_closed(&mut rng);
/// assert!(u > 0.0 && u <= 1.0);
/// ```
pub fn unit_open_closed<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - rng.random::<f64>()
}

/// Running probability totals over an ordered list of pieces.
///
/// Selection returns the first entry whose cumulative total exceeds the
/// draw. When rounding leaves the draw uncovered (the totals end slightly
/// below 1) the last entry with positive probability absorbs the residue,
/// so [`select`](Self::select) always yields an index.
///
/// # Complexity
/// - Construction: O(n)
/// - Selection: O(log n) via binary search
///
/// # Examples
/// ```
/// use u_variate::random::CumulativeTable;
/// let table = CumulativeTable::new(&[0.2, 0.5, 0.3]).unwrap();
/// assert_eq!(table.select(0.1), 0);
/// assert_eq!(table.select(0.2), 1);
/// assert_eq!(table.select(0.95), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeTable {
    cumulative: Vec<f64>,
    fallback: usize,
}

impl CumulativeTable {
    /// Builds the table from per-entry probabilities.
    ///
    /// # Returns
    /// - `None` if `probabilities` is empty or has no positive entry.
    pub fn new(probabilities: &[f64]) -> Option<Self> {
        let fallback = probabilities.iter().rposition(|&p| p > 0.0)?;

        let mut cumulative = Vec::with_capacity(probabilities.len());
        let mut total = 0.0;
        for &p in probabilities {
            total += p;
            cumulative.push(total);
        }

        Some(Self {
            cumulative,
            fallback,
        })
    }

    /// Returns the index of the first entry whose cumulative total
    /// exceeds `u`.
    pub fn select(&self, u: f64) -> usize {
        let i = self.cumulative.partition_point(|&c| c <= u);
        if i < self.cumulative.len() {
            i
        } else {
            self.fallback
        }
    }

    /// Draws `u ~ U[0, 1)` and selects an entry.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.select(rng.random::<f64>())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Returns the sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<f64> = (0..10).map(|_| rng1.random()).collect();
        let vals2: Vec<f64> = (0..10).map(|_| rng2.random()).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_unit_open_closed_range() {
        let mut rng = create_rng(1);
        for _ in 0..10_000 {
            let u = unit_open_closed(&mut rng);
            assert!(u > 0.0 && u <= 1.0, "u = {u}");
        }
    }

    #[test]
    fn test_table_skips_zero_probability() {
        let table = CumulativeTable::new(&[0.0, 0.0, 1.0]).unwrap();
        let mut rng = create_rng(42);
        for _ in 0..100 {
            assert_eq!(table.sample(&mut rng), 2);
        }
    }

    #[test]
    fn test_table_fallback_on_short_total() {
        // Totals stop at 0.99995, a draw above that lands on the last
        // positive entry.
        let table = CumulativeTable::new(&[0.5, 0.49995, 0.0]).unwrap();
        assert_eq!(table.select(0.99999), 1);
        assert!((table.total() - 0.99995).abs() < 1e-12);
    }

    #[test]
    fn test_table_boundaries() {
        let table = CumulativeTable::new(&[0.25, 0.25, 0.5]).unwrap();
        assert_eq!(table.select(0.0), 0);
        assert_eq!(table.select(0.25), 1);
        assert_eq!(table.select(0.4999), 1);
        assert_eq!(table.select(0.5), 2);
        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_rejects_empty_and_zero() {
        assert!(CumulativeTable::new(&[]).is_none());
        assert!(CumulativeTable::new(&[0.0, 0.0]).is_none());
    }

    #[test]
    fn test_table_frequencies() {
        let table = CumulativeTable::new(&[0.25, 0.75]).unwrap();
        let mut rng = create_rng(42);
        let mut counts = [0u32; 2];
        let n = 10000;
        for _ in 0..n {
            counts[table.sample(&mut rng)] += 1;
        }
        let ratio = counts[1] as f64 / counts[0] as f64;
        assert!(
            (ratio - 3.0).abs() < 0.5,
            "expected ratio ~3.0, got {ratio}"
        );
    }
}
