//! Survival counts over a threshold grid
//!
//! The survival count at threshold `t` is the number of samples with value
//! `>= t`. Evaluated over a dense grid of thresholds, it gives the
//! complementary cumulative curve used to compare fragment populations over
//! several orders of magnitude.
//!
//! [`SurvivalCurve::new`] sorts the samples once and locates every threshold
//! with a binary search, which takes `O(n log n + g log n)` for `n` samples and
//! `g` thresholds. [`SurvivalCurve::brute_force`] is the `O(n * g)` reference
//! that scans every sample for every threshold; both produce identical counts.

use crate::binning::{Binning, BinningError};

/// Default number of points in a survival threshold grid.
pub const DEFAULT_GRID_POINTS: usize = 3000;

/// Builds a geometric grid of `points` thresholds from `lo` to `hi` inclusive.
///
/// # Errors
///
/// Fails if `points < 2`, or if `lo`/`hi` do not form a valid log-space range.
///
/// # Examples
///
/// ```
/// use breakup_stats::survival::geometric_grid;
///
/// let grid = geometric_grid(1.0, 1000.0, 4).unwrap();
/// assert_eq!(grid.len(), 4);
/// assert_eq!(grid[0], 1.0);
/// assert!((grid[1] - 10.0).abs() < 1e-9);
/// assert_eq!(grid[3], 1000.0);
/// ```
pub fn geometric_grid(lo: f64, hi: f64, points: usize) -> Result<Vec<f64>, BinningError> {
    if points < 2 {
        return Err(BinningError::TooFewGridPoints { points });
    }
    // A grid of `points` thresholds is exactly the edge set of `points - 1` log-space bins
    Ok(Binning::log_space(lo, hi, points - 1)?.edges())
}

/// Survival counts of a sample set over a threshold grid.
///
/// `counts[i]` is the number of samples `>= thresholds[i]`. NaN samples are
/// ignored and never counted.
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalCurve {
    /// Thresholds, in the order they were given.
    pub thresholds: Vec<f64>,
    /// Number of samples at or above each threshold.
    pub counts: Vec<usize>,
    /// Number of (non-NaN) samples.
    pub total: usize,
}

impl SurvivalCurve {
    /// Computes survival counts from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breakup_stats::survival::SurvivalCurve;
    /// let curve = SurvivalCurve::new([3.0, 1.0, 2.0, 2.0], &[0.5, 2.0, 2.5, 4.0]);
    /// assert_eq!(curve.counts, vec![4, 3, 1, 0]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, thresholds: &[f64]) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|value| !value.is_nan())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, thresholds)
    }

    /// Computes survival counts from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order or contains NaN.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], thresholds: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let total = sorted_values.len();
        let counts = thresholds
            .iter()
            .map(|&threshold| total - sorted_values.partition_point(|&value| value < threshold))
            .collect();

        Self {
            thresholds: thresholds.to_vec(),
            counts,
            total,
        }
    }

    /// Computes survival counts by scanning every sample for every threshold.
    ///
    /// This is the `O(n * g)` reference for [`SurvivalCurve::new`], kept to
    /// cross-check the binary-search path.
    #[must_use]
    pub fn brute_force<I>(values: I, thresholds: &[f64]) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values
            .into_iter()
            .filter(|value| !value.is_nan())
            .collect::<Vec<_>>();
        let counts = thresholds
            .iter()
            .map(|&threshold| values.iter().filter(|&&value| value >= threshold).count())
            .collect();

        Self {
            thresholds: thresholds.to_vec(),
            counts,
            total: values.len(),
        }
    }

    /// Survival counts divided by the number of samples.
    ///
    /// Returns zeros for an empty sample set.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn fractions(&self) -> Vec<f64> {
        if self.total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|&count| count as f64 / total)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_values() {
        let curve = SurvivalCurve::new(std::iter::empty(), &[1.0, 2.0]);
        assert_eq!(curve.counts, vec![0, 0]);
        assert_eq!(curve.fractions(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let curve = SurvivalCurve::new([1.0, 2.0, 3.0], &[2.0]);
        assert_eq!(curve.counts, vec![2]);
    }

    #[test]
    fn test_ties_counted_at_threshold() {
        let values = [1.0, 1.0, 1.0, 5.0];
        let curve = SurvivalCurve::new(values, &[0.0, 1.0, 1.0001, 5.0, 5.1]);
        assert_eq!(curve.counts, vec![4, 4, 1, 1, 0]);
    }

    #[test]
    fn test_nan_ignored() {
        let values = [f64::NAN, 1.0, -f64::NAN, 2.0];
        let fast = SurvivalCurve::new(values, &[0.0, 1.5]);
        let naive = SurvivalCurve::brute_force(values, &[0.0, 1.5]);
        assert_eq!(fast.counts, vec![2, 1]);
        assert_eq!(fast, naive);
    }

    #[test]
    fn test_fractions() {
        let curve = SurvivalCurve::new([1.0, 2.0, 3.0, 4.0], &[2.5]);
        assert_eq!(curve.fractions(), vec![0.5]);
    }

    #[test]
    fn test_grid_errors() {
        assert_eq!(
            geometric_grid(1.0, 10.0, 1).unwrap_err(),
            BinningError::TooFewGridPoints { points: 1 }
        );
        assert!(geometric_grid(0.0, 10.0, 10).is_err());
        assert_eq!(geometric_grid(0.001, 10.0, DEFAULT_GRID_POINTS).unwrap().len(), 3000);
    }

    /// Fixed fixtures: the binary-search path must reproduce the brute-force
    /// counts exactly before the latter can be retired.
    #[test]
    fn test_brute_force_agreement_on_fixtures() {
        let fixtures: [&[f64]; 4] = [
            &[0.5, 1.0, 1.0, 2.0],
            &[0.002, 0.004, 0.004, 0.01, 0.1, 0.35, 1.2, 7.5, 9.99, 10.0],
            &[4200.0, 150.0, 12.5, 12.5, 980.0, 3.0, 61.0, 7.0e3],
            &[],
        ];
        let grid = geometric_grid(0.001, 10_000.0, DEFAULT_GRID_POINTS).unwrap();
        for fixture in fixtures {
            let fast = SurvivalCurve::new(fixture.iter().copied(), &grid);
            let naive = SurvivalCurve::brute_force(fixture.iter().copied(), &grid);
            assert_eq!(fast.counts, naive.counts);
        }
    }

    proptest! {
        /// Property: binary-search and brute-force counts are identical
        #[test]
        fn prop_matches_brute_force(
            values in prop::collection::vec(-100.0f64..100.0, 0..300),
            thresholds in prop::collection::vec(-120.0f64..120.0, 0..100),
        ) {
            let fast = SurvivalCurve::new(values.iter().copied(), &thresholds);
            let naive = SurvivalCurve::brute_force(values.iter().copied(), &thresholds);
            prop_assert_eq!(fast, naive);
        }

        /// Property: survival counts never increase with the threshold
        #[test]
        fn prop_non_increasing(
            values in prop::collection::vec(0.0001f64..20.0, 0..300),
        ) {
            let grid = geometric_grid(0.001, 10.0, 500).unwrap();
            let curve = SurvivalCurve::new(values, &grid);
            prop_assert!(curve.counts.is_sorted_by(|a, b| a >= b));
        }
    }
}
