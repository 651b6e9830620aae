//! Comparison of fragment populations produced by breakup simulations
//!
//! This crate validates one implementation of a satellite breakup model
//! against another by comparing the fragment populations both produce for the
//! same scenario (explosion or collision).
//!
//! # Overview
//!
//! The analysis supports three workflows:
//!
//! ## Statistical Comparison Workflow
//!
//! Decide whether two implementations draw from the same distributions:
//!
//! 1. **Parse Records** ([`fragment::RawFragment`]): Extract typed records and
//!    velocity magnitudes from exported rows
//! 2. **Build Populations** ([`population::FragmentPopulation`]): Tag records
//!    with scenario and role, flag range outliers
//! 3. **Compare** ([`comparison::ComparisonReport`]): Run a two-sample
//!    Kolmogorov–Smirnov test per attribute
//!
//! ## Visual Comparison Workflow
//!
//! Produce renderer-independent figures overlaying both implementations:
//!
//! 1. **Describe Figures** ([`distribution::PlotSet`]): Use the standard suite
//!    or load one from JSON
//! 2. **Render** ([`distribution::render_distribution`],
//!    [`distribution::render_scatter`]): Histograms, cumulative histograms,
//!    survival curves and scatter plots as [`plot::Plot`] values
//!
//! ## Benchmark Workflow
//!
//! Plot runtime over fragment count from recorded measurements
//! ([`benchmark::TimingDataset`]).
//!
//! # Examples
//!
//! ```
//! use breakup_analysis::{
//!     attribute::Attribute,
//!     comparison::{ComparisonReport, DEFAULT_ALPHA, Outcome},
//!     fragment::RawFragment,
//!     population::{FragmentPopulation, ImplementationRole},
//! };
//!
//! let row = |lc: f64, velocity: &str| RawFragment {
//!     name: "Iridium 33-Collision-Fragment".to_owned(),
//!     characteristic_length: lc,
//!     area_to_mass: lc / 10.0,
//!     velocity: Some(velocity.to_owned()),
//! };
//! let reference = FragmentPopulation::from_raw(
//!     "Iridium-Kosmos",
//!     ImplementationRole::Reference,
//!     "C++",
//!     &[row(0.1, "[1 2 2]"), row(0.2, "[2 4 4]")],
//! )?;
//! let candidate = FragmentPopulation::from_raw(
//!     "Iridium-Kosmos",
//!     ImplementationRole::Candidate,
//!     "Python",
//!     &[row(0.1, "[1 2 2]"), row(0.2, "[2 4 4]")],
//! )?;
//!
//! let report = ComparisonReport::build(&reference, &candidate, &Attribute::ALL, DEFAULT_ALPHA)?;
//! for entry in &report.entries {
//!     let Outcome::Compared { result, rejected } = &entry.outcome else {
//!         unreachable!();
//!     };
//!     assert_eq!(result.statistic, 0.0);
//!     assert!(!rejected);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`attribute`]: Compared fragment attributes, units and ranges of interest
//! - [`fragment`]: Fragment records and velocity parsing
//! - [`population`]: Tagged fragment populations and range outliers
//! - [`distribution`]: Distribution and scatter figures
//! - [`comparison`]: KS comparison and per-scenario reports
//! - [`benchmark`]: Runtime measurement datasets
//! - [`plot`]: Renderer-independent plot descriptions

pub mod attribute;
pub mod benchmark;
pub mod comparison;
pub mod distribution;
pub mod fragment;
pub mod plot;
pub mod population;
