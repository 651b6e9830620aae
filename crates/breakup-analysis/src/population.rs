//! Fragment populations produced by one implementation for one scenario
//!
//! A [`FragmentPopulation`] is the full set of fragments one breakup
//! implementation produced for a scenario, tagged with the scenario label and
//! the role of the implementation in the comparison (reference or candidate).
//!
//! # Loading Rules
//!
//! - **Malformed rows abort the load.** A single unparsable row fails the whole
//!   population with its row index, so that a partial population never reaches
//!   the comparator. KS statistics and survival counts depend on the sample
//!   size and would be silently wrong otherwise.
//! - **Range outliers are flagged, not dropped.** Rows with a negative
//!   characteristic length or a non-positive area-to-mass ratio are kept and
//!   listed in [`FragmentPopulation::outliers`]. Excluding them is an explicit
//!   step ([`FragmentPopulation::without_outliers`]) that yields a new
//!   population.
//! - **Velocity is all or nothing.** Either every row has a velocity, or none
//!   has, in which case the population lacks the velocity-magnitude attribute.
//!
//! # Examples
//!
//! ```
//! use breakup_analysis::{
//!     attribute::Attribute,
//!     fragment::RawFragment,
//!     population::{FragmentPopulation, ImplementationRole},
//! };
//!
//! let rows = vec![
//!     RawFragment {
//!         name: "fragment".to_owned(),
//!         characteristic_length: 0.5,
//!         area_to_mass: 0.1,
//!         velocity: Some("[1.0 2.0 2.0]".to_owned()),
//!     },
//!     RawFragment {
//!         name: "fragment".to_owned(),
//!         characteristic_length: -1.0,
//!         area_to_mass: 0.2,
//!         velocity: Some("[0.0 3.0 4.0]".to_owned()),
//!     },
//! ];
//! let population =
//!     FragmentPopulation::from_raw("Iridium-Kosmos", ImplementationRole::Reference, "C++", &rows)
//!         .unwrap();
//!
//! assert_eq!(population.len(), 2);
//! assert_eq!(population.outliers().len(), 1);
//! assert_eq!(population.values(Attribute::VelocityMagnitude).unwrap(), vec![3.0, 5.0]);
//! assert_eq!(population.without_outliers().len(), 1);
//! ```

use breakup_stats::descriptive::DescriptiveStats;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    attribute::{Attribute, IncompatibleAttributeError},
    fragment::{FragmentRecord, ParseFragmentError, RawFragment},
};

/// Role of an implementation in a comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationRole {
    /// The trusted implementation
    #[display("reference")]
    Reference,
    /// The implementation under validation
    #[display("candidate")]
    Candidate,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadPopulationError {
    /// Row index is zero-based and excludes any header line.
    #[display("malformed record at row {row}")]
    MalformedRecord {
        row: usize,
        source: ParseFragmentError,
    },
    #[display("record at row {row} disagrees with row 0 on whether a velocity is present")]
    InconsistentVelocity { row: usize },
}

/// Reason a record was flagged as a range outlier.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum OutlierKind {
    #[display("negative characteristic length {_0}")]
    NegativeLength(f64),
    #[display("non-positive area-to-mass ratio {_0}")]
    NonPositiveAreaToMass(f64),
}

/// A record whose values lie outside their physical range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeOutlier {
    /// Index of the record in the population.
    pub row: usize,
    pub kind: OutlierKind,
}

/// An immutable population of fragments.
#[derive(Debug, Clone)]
pub struct FragmentPopulation {
    scenario: String,
    role: ImplementationRole,
    label: String,
    records: Vec<FragmentRecord>,
    has_velocity: bool,
    outliers: Vec<RangeOutlier>,
}

impl FragmentPopulation {
    /// Builds a population from raw rows, extracting features in parallel.
    ///
    /// If several rows are malformed, the error reports the first one.
    pub fn from_raw(
        scenario: impl Into<String>,
        role: ImplementationRole,
        label: impl Into<String>,
        rows: &[RawFragment],
    ) -> Result<Self, LoadPopulationError> {
        let records = rows
            .par_iter()
            .enumerate()
            .map(|(row, raw)| {
                raw.extract()
                    .map_err(|source| LoadPopulationError::MalformedRecord { row, source })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(scenario, role, label, records)
    }

    /// Builds a population from already extracted records.
    ///
    /// Records with a non-finite value are rejected like malformed rows.
    pub fn from_records(
        scenario: impl Into<String>,
        role: ImplementationRole,
        label: impl Into<String>,
        records: Vec<FragmentRecord>,
    ) -> Result<Self, LoadPopulationError> {
        for (row, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|source| LoadPopulationError::MalformedRecord { row, source })?;
        }
        let has_velocity = records
            .first()
            .is_none_or(|record| record.velocity().is_some());
        if let Some(row) = records
            .iter()
            .position(|record| record.velocity().is_some() != has_velocity)
        {
            return Err(LoadPopulationError::InconsistentVelocity { row });
        }

        let population = Self {
            scenario: scenario.into(),
            role,
            label: label.into(),
            outliers: find_outliers(&records),
            records,
            has_velocity,
        };
        for outlier in &population.outliers {
            tracing::warn!(
                population = %population.display_name(),
                row = outlier.row,
                "range outlier: {}",
                outlier.kind
            );
        }
        tracing::info!(
            population = %population.display_name(),
            scenario = %population.scenario,
            records = population.len(),
            outliers = population.outliers.len(),
            "loaded fragment population"
        );
        Ok(population)
    }

    #[must_use]
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    #[must_use]
    pub fn role(&self) -> ImplementationRole {
        self.role
    }

    /// Human-readable implementation label, e.g. `C++`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label followed by the role, e.g. `C++ (reference)`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.label, self.role)
    }

    #[must_use]
    pub fn records(&self) -> &[FragmentRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn outliers(&self) -> &[RangeOutlier] {
        &self.outliers
    }

    #[must_use]
    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::CharacteristicLength | Attribute::AreaToMassRatio => true,
            Attribute::VelocityMagnitude => self.has_velocity,
        }
    }

    /// Attribute values of all records, in record order.
    pub fn values(&self, attribute: Attribute) -> Result<Vec<f64>, IncompatibleAttributeError> {
        if !self.has_attribute(attribute) {
            return Err(IncompatibleAttributeError {
                attribute,
                population: self.display_name(),
            });
        }
        Ok(self
            .records
            .iter()
            .filter_map(|record| record.value(attribute))
            .collect())
    }

    /// Returns a new population holding only the records matching `predicate`.
    #[must_use]
    pub fn filtered<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&FragmentRecord) -> bool,
    {
        let records = self
            .records
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect::<Vec<_>>();
        Self {
            scenario: self.scenario.clone(),
            role: self.role,
            label: self.label.clone(),
            outliers: find_outliers(&records),
            records,
            has_velocity: self.has_velocity,
        }
    }

    /// Returns a new population without the flagged range outliers.
    #[must_use]
    pub fn without_outliers(&self) -> Self {
        self.filtered(|record| outlier_kind(record).is_none())
    }

    /// Descriptive statistics of every attribute the population carries.
    #[must_use]
    pub fn summarize(&self) -> Vec<(Attribute, Option<DescriptiveStats>)> {
        Attribute::ALL
            .into_iter()
            .filter_map(|attribute| {
                let values = self.values(attribute).ok()?;
                Some((attribute, DescriptiveStats::new(values)))
            })
            .collect()
    }
}

fn outlier_kind(record: &FragmentRecord) -> Option<OutlierKind> {
    if record.characteristic_length() < 0.0 {
        return Some(OutlierKind::NegativeLength(record.characteristic_length()));
    }
    if record.area_to_mass() <= 0.0 {
        return Some(OutlierKind::NonPositiveAreaToMass(record.area_to_mass()));
    }
    None
}

fn find_outliers(records: &[FragmentRecord]) -> Vec<RangeOutlier> {
    records
        .iter()
        .enumerate()
        .filter_map(|(row, record)| outlier_kind(record).map(|kind| RangeOutlier { row, kind }))
        .collect()
}
