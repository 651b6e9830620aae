use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::binning::Binning;

/// How each sample contributes to its bin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// Each sample adds `1`.
    #[default]
    Raw,
    /// Each sample adds `1 / total`, where `total` is the number of samples
    /// offered to the histogram (binned or not).
    Relative,
}

/// A histogram representation of a dataset's distribution.
///
/// The histogram divides `[lo, hi]` of its [`Binning`] into bins and counts the
/// values falling into each bin. Out-of-range values are clipped or excluded
/// according to the binning scheme (see [`crate::binning`]).
#[derive(Debug, Clone)]
pub struct Histogram {
    /// The binning scheme the histogram was built with.
    pub binning: Binning,
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
    /// Number of values offered to the histogram, including excluded ones.
    pub total: usize,
}

/// A single bin in a histogram.
///
/// Each bin represents a range of values and the count of data points falling within that range.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    ///
    /// The last bin of a histogram also includes its end.
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Arguments
    ///
    /// * `values` - The data points to create the histogram from.
    /// * `binning` - The bin layout. Values outside its range are clipped
    ///   (linear) or excluded (log-space).
    ///
    /// # Examples
    ///
    /// ```
    /// # use breakup_stats::{binning::Binning, histogram::Histogram};
    /// let binning = Binning::linear(0.0, 4.0, 4).unwrap();
    /// let histogram = Histogram::new([0.5, 1.5, 1.7, 3.2, 4.0], binning);
    /// let counts: Vec<_> = histogram.bins.iter().map(|bin| bin.count).collect();
    /// assert_eq!(counts, vec![1, 2, 0, 2]);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, binning: Binning) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let edges = binning.edges();
        let mut bins = edges
            .windows(2)
            .map(|pair| HistogramBin {
                range: pair[0]..pair[1],
                count: 0,
            })
            .collect::<Vec<_>>();

        let mut total = 0;
        for value in values {
            total += 1;
            if let Some(idx) = binning.bin_index(&edges, value) {
                bins[idx].count += 1;
            }
        }

        Self {
            binning,
            bins,
            total,
        }
    }

    /// Returns the `bins.len() + 1` bin edges.
    #[must_use]
    pub fn edges(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|bin| bin.range.start)
            .chain(self.bins.last().map(|bin| bin.range.end))
            .collect()
    }

    /// Returns the lower edge of every bin.
    #[must_use]
    pub fn lower_edges(&self) -> Vec<f64> {
        self.bins.iter().map(|bin| bin.range.start).collect()
    }

    /// Number of values that were assigned to some bin.
    #[must_use]
    pub fn binned_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Per-bin counts in the requested mode.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breakup_stats::{binning::Binning, histogram::{CountMode, Histogram}};
    /// let binning = Binning::log_space(1.0, 100.0, 2).unwrap();
    /// // 1000.0 is out of range and excluded, but still weighs in the denominator
    /// let histogram = Histogram::new([2.0, 20.0, 30.0, 1000.0], binning);
    /// assert_eq!(histogram.counts(CountMode::Raw), vec![1.0, 2.0]);
    /// assert_eq!(histogram.counts(CountMode::Relative), vec![0.25, 0.5]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn counts(&self, mode: CountMode) -> Vec<f64> {
        let weight = match mode {
            CountMode::Raw => 1.0,
            CountMode::Relative if self.total == 0 => 0.0,
            CountMode::Relative => 1.0 / self.total as f64,
        };
        self.bins
            .iter()
            .map(|bin| bin.count as f64 * weight)
            .collect()
    }

    /// Ascending running sum of the per-bin counts.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breakup_stats::{binning::Binning, histogram::{CountMode, Histogram}};
    /// let binning = Binning::linear(0.0, 3.0, 3).unwrap();
    /// let histogram = Histogram::new([0.5, 1.5, 1.6, 2.5], binning);
    /// assert_eq!(histogram.cumulative(CountMode::Raw), vec![1.0, 3.0, 4.0]);
    /// assert_eq!(histogram.cumulative(CountMode::Relative), vec![0.25, 0.75, 1.0]);
    /// ```
    #[must_use]
    pub fn cumulative(&self, mode: CountMode) -> Vec<f64> {
        self.counts(mode)
            .into_iter()
            .scan(0.0, |running, count| {
                *running += count;
                Some(*running)
            })
            .collect()
    }

    /// Relative counts divided by bin width.
    ///
    /// Integrates to the fraction of samples that were binned.
    #[must_use]
    pub fn density(&self) -> Vec<f64> {
        self.counts(CountMode::Relative)
            .into_iter()
            .zip(&self.bins)
            .map(|(fraction, bin)| fraction / (bin.range.end - bin.range.start))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_values() {
        let binning = Binning::linear(0.0, 1.0, 5).unwrap();
        let histogram = Histogram::new(std::iter::empty(), binning);
        assert_eq!(histogram.bins.len(), 5);
        assert_eq!(histogram.total, 0);
        assert_eq!(histogram.counts(CountMode::Relative), vec![0.0; 5]);
    }

    #[test]
    fn test_edges_match_binning() {
        let binning = Binning::log_space(0.001, 10.0, 4).unwrap();
        let histogram = Histogram::new([0.5], binning);
        assert_eq!(histogram.edges(), binning.edges());
        assert_eq!(histogram.lower_edges().len(), 4);
    }

    #[test]
    fn test_linear_retains_out_of_range_values() {
        let binning = Binning::linear(0.0, 5.0, 100).unwrap();
        let histogram = Histogram::new([-1.0, 0.0, 2.5, 5.0, 7.0], binning);
        assert_eq!(histogram.binned_count(), 5);
        assert_eq!(histogram.bins[0].count, 2);
        assert_eq!(histogram.bins[99].count, 2);
    }

    #[test]
    fn test_log_space_drops_out_of_range_values() {
        let binning = Binning::log_space(0.001, 10.0, 4).unwrap();
        let histogram = Histogram::new([0.0001, 0.005, 0.05, 5.0, 50.0], binning);
        assert_eq!(histogram.total, 5);
        assert_eq!(histogram.binned_count(), 3);
        assert_eq!(histogram.counts(CountMode::Raw), vec![1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_density_normalizes_by_width() {
        let binning = Binning::linear(0.0, 2.0, 2).unwrap();
        let histogram = Histogram::new([0.5, 1.5, 1.5, 1.5], binning);
        assert_eq!(histogram.density(), vec![0.25, 0.75]);
    }

    proptest! {
        /// Property: in-range samples are conserved by both schemes
        #[test]
        fn prop_in_range_counts_are_conserved(
            values in prop::collection::vec(0.001f64..=10.0, 0..500),
            num_bins in 1usize..200,
        ) {
            for binning in [
                Binning::linear(0.001, 10.0, num_bins).unwrap(),
                Binning::log_space(0.001, 10.0, num_bins).unwrap(),
            ] {
                let histogram = Histogram::new(values.iter().copied(), binning);
                let in_range = values.iter().filter(|v| binning.contains(**v)).count() as u64;
                prop_assert_eq!(histogram.binned_count(), in_range);
            }
        }

        /// Property: log-space histograms count exactly the in-range samples
        #[test]
        fn prop_log_space_counts_only_in_range(
            values in prop::collection::vec(0.0001f64..100.0, 0..500),
        ) {
            let binning = Binning::log_space(0.001, 10.0, 50).unwrap();
            let histogram = Histogram::new(values.iter().copied(), binning);
            let in_range = values.iter().filter(|v| binning.contains(**v)).count() as u64;
            prop_assert_eq!(histogram.binned_count(), in_range);
            prop_assert_eq!(histogram.total, values.len());
        }

        /// Property: the cumulative curve is non-decreasing and ends at the binned total
        #[test]
        fn prop_cumulative_ends_at_binned_count(
            values in prop::collection::vec(-1.0f64..6.0, 1..300),
        ) {
            let binning = Binning::linear(0.0, 5.0, 20).unwrap();
            let histogram = Histogram::new(values.iter().copied(), binning);
            let cumulative = histogram.cumulative(CountMode::Raw);
            prop_assert!(cumulative.is_sorted_by(|a, b| a <= b));
            prop_assert_eq!(*cumulative.last().unwrap(), values.len() as f64);
        }
    }
}
