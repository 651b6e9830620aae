//! Fixed-edge binning schemes for histograms
//!
//! This module provides the two binning schemes used to build comparable
//! histograms from fragment attributes:
//!
//! - **Linear**: `num_bins` equal-width bins spanning `[lo, hi]`
//! - **Log-space**: `num_bins` geometrically spaced bins spanning `[lo, hi]`,
//!   with edges at `lo * (hi / lo)^(i / num_bins)`
//!
//! # Bin Assignment
//!
//! Every bin is the half-open interval `[edge_i, edge_i+1)`, except the last
//! bin which is closed on the right so that `hi` itself is counted.
//!
//! Samples outside `[lo, hi]` are treated differently by the two schemes:
//!
//! - **Linear** bins *clip* outliers into the outermost bins. A value below
//!   `lo` lands in the first bin, a value above `hi` lands in the last bin.
//! - **Log-space** bins *exclude* outliers. They are not counted anywhere.
//!
//! Histograms of the same attribute built with the two schemes therefore
//! disagree on their total count whenever samples fall outside the range.
//! Downstream plots depend on this behavior, so it is kept as is.
//!
//! # Examples
//!
//! ```
//! use breakup_stats::binning::Binning;
//!
//! let binning = Binning::log_space(0.001, 10.0, 4).unwrap();
//! let edges = binning.edges();
//! assert_eq!(edges.len(), 5);
//! assert_eq!(edges[0], 0.001);
//! assert_eq!(edges[4], 10.0);
//!
//! // Out-of-range values are excluded from log-space bins...
//! assert_eq!(binning.bin_index(&edges, 20.0), None);
//!
//! // ...but clipped into the outermost bin of linear bins.
//! let linear = Binning::linear(0.0, 5.0, 100).unwrap();
//! let edges = linear.edges();
//! assert_eq!(linear.bin_index(&edges, 20.0), Some(99));
//! ```

use serde::{Deserialize, Serialize};

/// Scale of a plot axis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    /// Linear axis
    #[default]
    Linear,
    /// Base-10 logarithmic axis
    Log,
}

/// Error returned when a binning scheme or threshold grid is invalid.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum BinningError {
    #[display("number of bins must be positive")]
    ZeroBins,
    #[display("a threshold grid needs at least 2 points, got {points}")]
    TooFewGridPoints { points: usize },
    #[display("bin range bounds must be finite, got [{lo}, {hi}]")]
    NonFiniteBounds { lo: f64, hi: f64 },
    #[display("bin range upper bound {hi} must exceed lower bound {lo}")]
    EmptyRange { lo: f64, hi: f64 },
    #[display("log-space bins need a positive lower bound, got {lo}")]
    NonPositiveLogBound { lo: f64 },
}

/// A validated binning scheme.
///
/// Construct with [`Binning::linear`] or [`Binning::log_space`]. The fields are
/// private so that every `Binning` in existence has a finite, non-empty range,
/// a positive bin count, and a positive lower bound when log-spaced.
///
/// Serialized as a tagged [`BinningSpec`], and validated again on
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BinningSpec", into = "BinningSpec")]
pub struct Binning {
    scale: AxisScale,
    lo: f64,
    hi: f64,
    num_bins: usize,
}

/// Unvalidated, serializable form of a [`Binning`].
///
/// ```json
/// { "kind": "log_space", "lo": 0.001, "hi": 10.0, "num_bins": 50 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinningSpec {
    Linear { lo: f64, hi: f64, num_bins: usize },
    LogSpace { lo: f64, hi: f64, num_bins: usize },
}

impl TryFrom<BinningSpec> for Binning {
    type Error = BinningError;

    fn try_from(spec: BinningSpec) -> Result<Self, Self::Error> {
        match spec {
            BinningSpec::Linear { lo, hi, num_bins } => Self::linear(lo, hi, num_bins),
            BinningSpec::LogSpace { lo, hi, num_bins } => Self::log_space(lo, hi, num_bins),
        }
    }
}

impl From<Binning> for BinningSpec {
    fn from(binning: Binning) -> Self {
        let Binning {
            scale,
            lo,
            hi,
            num_bins,
        } = binning;
        match scale {
            AxisScale::Linear => BinningSpec::Linear { lo, hi, num_bins },
            AxisScale::Log => BinningSpec::LogSpace { lo, hi, num_bins },
        }
    }
}

impl Binning {
    /// Creates `num_bins` equal-width bins spanning `[lo, hi]`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breakup_stats::binning::Binning;
    /// let binning = Binning::linear(0.0, 4.0, 4).unwrap();
    /// assert_eq!(binning.edges(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    ///
    /// assert!(Binning::linear(1.0, 1.0, 4).is_err());
    /// assert!(Binning::linear(0.0, 1.0, 0).is_err());
    /// ```
    pub fn linear(lo: f64, hi: f64, num_bins: usize) -> Result<Self, BinningError> {
        check_range(lo, hi, num_bins)?;
        Ok(Self {
            scale: AxisScale::Linear,
            lo,
            hi,
            num_bins,
        })
    }

    /// Creates `num_bins` geometrically spaced bins spanning `[lo, hi]`.
    ///
    /// Requires `0 < lo < hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breakup_stats::binning::Binning;
    /// assert!(Binning::log_space(0.001, 10.0, 50).is_ok());
    /// assert!(Binning::log_space(0.0, 10.0, 50).is_err());
    /// ```
    pub fn log_space(lo: f64, hi: f64, num_bins: usize) -> Result<Self, BinningError> {
        check_range(lo, hi, num_bins)?;
        if lo <= 0.0 {
            return Err(BinningError::NonPositiveLogBound { lo });
        }
        Ok(Self {
            scale: AxisScale::Log,
            lo,
            hi,
            num_bins,
        })
    }

    /// Axis scale on which these bins look equal-width.
    #[must_use]
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    #[must_use]
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Returns `true` if `value` lies within the closed range `[lo, hi]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.lo..=self.hi).contains(&value)
    }

    /// Computes the `num_bins + 1` bin edges.
    ///
    /// The first and last edges are exactly `lo` and `hi`. Interior edges are
    /// computed directly from their index rather than accumulated, so rounding
    /// errors do not build up across bins.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn edges(&self) -> Vec<f64> {
        let n = self.num_bins;
        (0..=n)
            .map(|i| {
                if i == 0 {
                    return self.lo;
                }
                if i == n {
                    return self.hi;
                }
                let fraction = i as f64 / n as f64;
                match self.scale {
                    AxisScale::Linear => self.lo + (self.hi - self.lo) * fraction,
                    AxisScale::Log => self.lo * (self.hi / self.lo).powf(fraction),
                }
            })
            .collect()
    }

    /// Locates the bin a value belongs to.
    ///
    /// `edges` must be the result of [`Binning::edges`] for this binning.
    ///
    /// # Returns
    ///
    /// * `Some(idx)` - index of the bin `[edges[idx], edges[idx + 1])` holding
    ///   the value (the last bin also holds `hi`); linear bins clip
    ///   out-of-range values into the first or last bin
    /// * `None` - the value is NaN, or it is out of range for log-space bins
    #[must_use]
    pub fn bin_index(&self, edges: &[f64], value: f64) -> Option<usize> {
        debug_assert_eq!(edges.len(), self.num_bins + 1);
        if value.is_nan() {
            return None;
        }
        let last = self.num_bins - 1;
        if value < self.lo {
            return match self.scale {
                AxisScale::Linear => Some(0),
                AxisScale::Log => None,
            };
        }
        if value > self.hi {
            return match self.scale {
                AxisScale::Linear => Some(last),
                AxisScale::Log => None,
            };
        }
        // edges[0] == lo <= value, so at least one edge passes the predicate
        let upper = edges.partition_point(|&edge| edge <= value);
        Some((upper - 1).min(last))
    }
}

fn check_range(lo: f64, hi: f64, num_bins: usize) -> Result<(), BinningError> {
    if num_bins == 0 {
        return Err(BinningError::ZeroBins);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return Err(BinningError::NonFiniteBounds { lo, hi });
    }
    if hi <= lo {
        return Err(BinningError::EmptyRange { lo, hi });
    }
    Ok(())
}
