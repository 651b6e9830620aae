//! Two-sample comparison of fragment populations
//!
//! [`compare_attribute`] runs a two-sample Kolmogorov–Smirnov test on one
//! attribute of a reference and a candidate population.
//! [`ComparisonReport::build`] does so for a list of attributes in parallel
//! and collects one [`ReportEntry`] per attribute. An attribute that cannot be
//! compared is recorded as failed while the others proceed.
//!
//! # One-sided Statistics
//!
//! The two-sided statistic `D` does not depend on argument order. The
//! one-sided statistics do, so they are reported with an explicit direction:
//!
//! - `reference_above_candidate`: `max (F_ref - F_cand)`, large when the
//!   reference population has more mass at small values
//! - `candidate_above_reference`: `max (F_cand - F_ref)`

use std::fmt;

use breakup_stats::ks::KsTest;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    attribute::{Attribute, IncompatibleAttributeError},
    population::{FragmentPopulation, ImplementationRole},
};

/// Default significance level of a comparison report.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// KS test result of one attribute of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub scenario: String,
    pub attribute: Attribute,
    /// Two-sided KS statistic `D`.
    pub statistic: f64,
    pub p_value: f64,
    /// Size of the reference sample.
    pub n: usize,
    /// Size of the candidate sample.
    pub m: usize,
    /// First value at which `D` is attained.
    pub location: f64,
    pub reference_above_candidate: f64,
    pub candidate_above_reference: f64,
}

impl ComparisonResult {
    #[must_use]
    pub fn rejects_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: D={:.6} p={:.6} (n={}, m={})",
            self.attribute, self.statistic, self.p_value, self.n, self.m
        )
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum CompareError {
    #[display("{_0}")]
    IncompatibleAttribute(IncompatibleAttributeError),
    #[display("population '{population}' has no {attribute} samples")]
    EmptySample {
        attribute: Attribute,
        population: String,
    },
}

impl From<IncompatibleAttributeError> for CompareError {
    fn from(err: IncompatibleAttributeError) -> Self {
        Self::IncompatibleAttribute(err)
    }
}

/// Compares one attribute of two populations.
///
/// # Examples
///
/// ```
/// use breakup_analysis::{
///     attribute::Attribute,
///     comparison::compare_attribute,
///     fragment::FragmentRecord,
///     population::{FragmentPopulation, ImplementationRole},
/// };
///
/// let population = |role, lengths: &[f64]| {
///     let records = lengths
///         .iter()
///         .map(|&lc| FragmentRecord::new(String::new(), lc, 0.1, None))
///         .collect();
///     FragmentPopulation::from_records("scenario", role, "impl", records).unwrap()
/// };
/// let reference = population(ImplementationRole::Reference, &[0.5, 1.0, 1.0, 2.0]);
/// let candidate = population(ImplementationRole::Candidate, &[0.5, 1.0, 1.5, 2.0]);
///
/// let result = compare_attribute(&reference, &candidate, Attribute::CharacteristicLength).unwrap();
/// assert_eq!(result.statistic, 0.25);
/// assert_eq!(result.location, 1.0);
/// ```
pub fn compare_attribute(
    reference: &FragmentPopulation,
    candidate: &FragmentPopulation,
    attribute: Attribute,
) -> Result<ComparisonResult, CompareError> {
    let reference_values = reference.values(attribute)?;
    let candidate_values = candidate.values(attribute)?;
    let test = KsTest::two_sample(
        reference_values.iter().copied(),
        candidate_values.iter().copied(),
    )
    .ok_or_else(|| {
        let empty = if reference_values.is_empty() {
            reference
        } else {
            candidate
        };
        CompareError::EmptySample {
            attribute,
            population: empty.display_name(),
        }
    })?;
    let result = ComparisonResult {
        scenario: reference.scenario().to_owned(),
        attribute,
        statistic: test.statistic,
        p_value: test.p_value,
        n: test.n,
        m: test.m,
        location: test.location,
        reference_above_candidate: test.a_above_b,
        candidate_above_reference: test.b_above_a,
    };
    tracing::debug!(
        attribute = attribute.id(),
        statistic = result.statistic,
        p_value = result.p_value,
        location = result.location,
        "compared attribute"
    );
    Ok(result)
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ReportError {
    #[display("scenario mismatch: reference is '{reference}', candidate is '{candidate}'")]
    ScenarioMismatch { reference: String, candidate: String },
    #[display("population '{population}' is tagged {actual}, expected {expected}")]
    RoleMismatch {
        population: String,
        expected: ImplementationRole,
        actual: ImplementationRole,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Compared {
        result: ComparisonResult,
        /// Whether "same distribution" is rejected at the report's alpha.
        rejected: bool,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub attribute: Attribute,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Per-attribute comparison of two populations of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub scenario: String,
    pub reference: String,
    pub candidate: String,
    pub alpha: f64,
    pub entries: Vec<ReportEntry>,
}

impl ComparisonReport {
    /// Compares every attribute in `attributes`, in parallel.
    ///
    /// Entries keep the order of `attributes`.
    pub fn build(
        reference: &FragmentPopulation,
        candidate: &FragmentPopulation,
        attributes: &[Attribute],
        alpha: f64,
    ) -> Result<Self, ReportError> {
        for (population, expected) in [
            (reference, ImplementationRole::Reference),
            (candidate, ImplementationRole::Candidate),
        ] {
            if population.role() != expected {
                return Err(ReportError::RoleMismatch {
                    population: population.label().to_owned(),
                    expected,
                    actual: population.role(),
                });
            }
        }
        if reference.scenario() != candidate.scenario() {
            return Err(ReportError::ScenarioMismatch {
                reference: reference.scenario().to_owned(),
                candidate: candidate.scenario().to_owned(),
            });
        }

        tracing::info!(
            scenario = reference.scenario(),
            attributes = attributes.len(),
            "comparing populations"
        );
        let entries = attributes
            .par_iter()
            .map(|&attribute| {
                let outcome = match compare_attribute(reference, candidate, attribute) {
                    Ok(result) => Outcome::Compared {
                        rejected: result.rejects_at(alpha),
                        result,
                    },
                    Err(err) => {
                        tracing::warn!(attribute = attribute.id(), "comparison failed: {err}");
                        Outcome::Failed {
                            reason: err.to_string(),
                        }
                    }
                };
                ReportEntry { attribute, outcome }
            })
            .collect();

        Ok(Self {
            scenario: reference.scenario().to_owned(),
            reference: reference.label().to_owned(),
            candidate: candidate.label().to_owned(),
            alpha,
            entries,
        })
    }

    /// Results of the attributes that could be compared.
    pub fn results(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.entries.iter().filter_map(|entry| match &entry.outcome {
            Outcome::Compared { result, .. } => Some(result),
            Outcome::Failed { .. } => None,
        })
    }
}
