//! Statistical building blocks for comparing fragment populations.
//!
//! This crate is independent of the fragment domain and works on plain `f64`
//! samples:
//!
//! - **Binning**: linear and log-space bin layouts with explicit out-of-range rules
//! - **Histograms**: raw, relative, cumulative and density views of binned samples
//! - **Survival counts**: number of samples at or above each threshold of a grid
//! - **Two-sample KS test**: Kolmogorov–Smirnov statistic and asymptotic p-value
//! - **Descriptive statistics**: min, max, mean, median, variance, standard deviation
//!
//! # Modules
//!
//! - [`binning`]: Bin layouts and bin assignment
//! - [`histogram`]: Histogram construction and count transforms
//! - [`survival`]: Survival counts over a threshold grid
//! - [`ks`]: Two-sample Kolmogorov–Smirnov test
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//!
//! # Examples
//!
//! ## Creating a log-space histogram
//!
//! ```
//! use breakup_stats::{binning::Binning, histogram::{CountMode, Histogram}};
//!
//! let binning = Binning::log_space(0.001, 10.0, 4).unwrap();
//! let histogram = Histogram::new([0.002, 0.02, 0.03, 2.0], binning);
//! assert_eq!(histogram.counts(CountMode::Raw), vec![1.0, 2.0, 0.0, 1.0]);
//! ```
//!
//! ## Computing a survival curve
//!
//! ```
//! use breakup_stats::survival::{SurvivalCurve, geometric_grid};
//!
//! let grid = geometric_grid(0.001, 10.0, 3000).unwrap();
//! let curve = SurvivalCurve::new([0.01, 0.1, 1.0], &grid);
//! assert_eq!(curve.counts[0], 3);
//! assert_eq!(*curve.counts.last().unwrap(), 0);
//! ```
//!
//! ## Comparing two samples
//!
//! ```
//! use breakup_stats::ks::KsTest;
//!
//! let test = KsTest::two_sample([1.0, 2.0, 3.0], [1.0, 2.0, 3.0]).unwrap();
//! assert_eq!(test.statistic, 0.0);
//! assert_eq!(test.p_value, 1.0);
//! ```

pub mod binning;
pub mod descriptive;
pub mod histogram;
pub mod ks;
pub mod survival;
