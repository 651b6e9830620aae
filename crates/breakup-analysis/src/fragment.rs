//! Fragment records and velocity feature extraction
//!
//! Breakup simulations export one row per fragment. This module turns such a
//! row ([`RawFragment`]) into a typed [`FragmentRecord`], parsing the
//! ejection velocity field into a [`Velocity`] vector on the way.
//!
//! # Velocity Field Format
//!
//! The velocity is a bracket-delimited list of exactly three
//! whitespace-separated floating-point tokens:
//!
//! ```text
//! [-12.5 3.75e+02 +1.0E-3]
//! ```
//!
//! # Examples
//!
//! ```
//! use breakup_analysis::fragment::Velocity;
//!
//! let velocity: Velocity = "[1.0 2.0 2.0]".parse().unwrap();
//! assert_eq!(velocity.magnitude(), 3.0);
//!
//! assert!("[1.0 2.0]".parse::<Velocity>().is_err());
//! ```

use std::{fmt, num::ParseFloatError, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// Error produced when a fragment row cannot be turned into a record.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ParseFragmentError {
    #[display("velocity field {field:?} is not enclosed in brackets")]
    MissingBrackets { field: String },
    #[display("velocity field has {count} components, expected 3")]
    ComponentCount { count: usize },
    #[display("invalid velocity component {token:?}")]
    InvalidComponent {
        token: String,
        source: ParseFloatError,
    },
    #[display("velocity component {token:?} is not finite")]
    NonFiniteComponent { token: String },
    #[display("{field} value {value} is not finite")]
    NonFiniteField { field: &'static str, value: f64 },
}

/// Ejection velocity vector in m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity([f64; 3]);

impl Velocity {
    #[must_use]
    pub fn new(components: [f64; 3]) -> Self {
        Self(components)
    }

    #[must_use]
    pub fn components(&self) -> [f64; 3] {
        self.0
    }

    /// Euclidean norm of the vector.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        let [x, y, z] = self.0;
        x.hypot(y).hypot(z)
    }
}

impl FromStr for Velocity {
    type Err = ParseFragmentError;

    fn from_str(field: &str) -> Result<Self, Self::Err> {
        let inner = field
            .trim()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| ParseFragmentError::MissingBrackets {
                field: field.to_owned(),
            })?;

        let tokens = inner.split_whitespace().collect::<Vec<_>>();
        let [x, y, z] = tokens.as_slice() else {
            return Err(ParseFragmentError::ComponentCount {
                count: tokens.len(),
            });
        };
        Ok(Self([
            parse_component(x)?,
            parse_component(y)?,
            parse_component(z)?,
        ]))
    }
}

fn parse_component(token: &str) -> Result<f64, ParseFragmentError> {
    let value = token
        .parse::<f64>()
        .map_err(|source| ParseFragmentError::InvalidComponent {
            token: token.to_owned(),
            source,
        })?;
    if !value.is_finite() {
        return Err(ParseFragmentError::NonFiniteComponent {
            token: token.to_owned(),
        });
    }
    Ok(value)
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "[{x} {y} {z}]")
    }
}

/// One fragment row as exported by a breakup simulation.
///
/// Field names follow the CSV headers of the simulation output. Columns not
/// listed here (ID, satellite type, area, mass, position, orbital elements)
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFragment {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Characteristic Length [m]")]
    pub characteristic_length: f64,
    #[serde(rename = "A/M [m^2/kg]")]
    pub area_to_mass: f64,
    /// Raw velocity field, `None` when the column is absent or empty.
    #[serde(
        rename = "Ejection Velocity [m/s]",
        alias = "Velocity [m/s]",
        default
    )]
    pub velocity: Option<String>,
}

impl RawFragment {
    /// Parses the row into a typed record.
    pub fn extract(&self) -> Result<FragmentRecord, ParseFragmentError> {
        check_finite("characteristic length", self.characteristic_length)?;
        check_finite("area-to-mass ratio", self.area_to_mass)?;
        let velocity = self
            .velocity
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::parse::<Velocity>)
            .transpose()?;
        Ok(FragmentRecord::new(
            self.name.clone(),
            self.characteristic_length,
            self.area_to_mass,
            velocity,
        ))
    }
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ParseFragmentError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParseFragmentError::NonFiniteField { field, value })
    }
}

/// An immutable fragment record.
///
/// The velocity magnitude is not stored: it is always derived from the
/// velocity vector.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentRecord {
    name: String,
    characteristic_length: f64,
    area_to_mass: f64,
    velocity: Option<Velocity>,
}

impl FragmentRecord {
    #[must_use]
    pub fn new(
        name: String,
        characteristic_length: f64,
        area_to_mass: f64,
        velocity: Option<Velocity>,
    ) -> Self {
        Self {
            name,
            characteristic_length,
            area_to_mass,
            velocity,
        }
    }

    /// Checks that every value of the record is finite.
    pub fn validate(&self) -> Result<(), ParseFragmentError> {
        check_finite("characteristic length", self.characteristic_length)?;
        check_finite("area-to-mass ratio", self.area_to_mass)?;
        let non_finite = self
            .velocity
            .and_then(|velocity| velocity.0.into_iter().find(|value| !value.is_finite()));
        match non_finite {
            Some(value) => Err(ParseFragmentError::NonFiniteComponent {
                token: value.to_string(),
            }),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Characteristic length in m.
    #[must_use]
    pub fn characteristic_length(&self) -> f64 {
        self.characteristic_length
    }

    /// Area-to-mass ratio in m²/kg.
    #[must_use]
    pub fn area_to_mass(&self) -> f64 {
        self.area_to_mass
    }

    #[must_use]
    pub fn velocity(&self) -> Option<Velocity> {
        self.velocity
    }

    /// Ejection velocity magnitude in m/s, if the record has a velocity.
    #[must_use]
    pub fn velocity_magnitude(&self) -> Option<f64> {
        self.velocity.map(|velocity| velocity.magnitude())
    }

    /// Scalar value of an attribute, if the record carries it.
    #[must_use]
    pub fn value(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::CharacteristicLength => Some(self.characteristic_length),
            Attribute::AreaToMassRatio => Some(self.area_to_mass),
            Attribute::VelocityMagnitude => self.velocity_magnitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(velocity: Option<&str>) -> RawFragment {
        RawFragment {
            name: "Iridium 33-Collision-Fragment".to_owned(),
            characteristic_length: 0.25,
            area_to_mass: 0.08,
            velocity: velocity.map(str::to_owned),
        }
    }

    #[test]
    fn test_magnitude() {
        let velocity: Velocity = "[1.0 2.0 2.0]".parse().unwrap();
        assert_eq!(velocity.components(), [1.0, 2.0, 2.0]);
        assert_eq!(velocity.magnitude(), 3.0);
    }

    #[test]
    fn test_magnitude_of_large_components() {
        let velocity: Velocity = "[1e200 1e200 1e200]".parse().unwrap();
        let expected = 3.0_f64.sqrt() * 1e200;
        assert!(velocity.magnitude().is_finite());
        assert!((velocity.magnitude() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_scientific_notation_with_sign() {
        let velocity: Velocity = "[ -3.0e+00 +4.0E0 0 ]".parse().unwrap();
        assert_eq!(velocity.components(), [-3.0, 4.0, 0.0]);
        assert_eq!(velocity.magnitude(), 5.0);
    }

    #[test]
    fn test_tolerates_surrounding_whitespace() {
        let velocity: Velocity = "  [1 2 2]\n".parse().unwrap();
        assert_eq!(velocity.magnitude(), 3.0);
    }

    #[test]
    fn test_wrong_component_count() {
        assert_eq!(
            "[1.0 2.0]".parse::<Velocity>().unwrap_err(),
            ParseFragmentError::ComponentCount { count: 2 }
        );
        assert_eq!(
            "[1 2 3 4]".parse::<Velocity>().unwrap_err(),
            ParseFragmentError::ComponentCount { count: 4 }
        );
        assert_eq!(
            "[]".parse::<Velocity>().unwrap_err(),
            ParseFragmentError::ComponentCount { count: 0 }
        );
    }

    #[test]
    fn test_missing_brackets() {
        assert!(matches!(
            "1.0 2.0 2.0".parse::<Velocity>().unwrap_err(),
            ParseFragmentError::MissingBrackets { .. }
        ));
        assert!(matches!(
            "[1.0 2.0 2.0".parse::<Velocity>().unwrap_err(),
            ParseFragmentError::MissingBrackets { .. }
        ));
    }

    #[test]
    fn test_invalid_and_non_finite_components() {
        assert!(matches!(
            "[1.0 abc 2.0]".parse::<Velocity>().unwrap_err(),
            ParseFragmentError::InvalidComponent { token, .. } if token == "abc"
        ));
        assert!(matches!(
            "[1.0 2.0,3.0]".parse::<Velocity>().unwrap_err(),
            ParseFragmentError::ComponentCount { count: 2 }
        ));
        assert!(matches!(
            "[1.0 inf 2.0]".parse::<Velocity>().unwrap_err(),
            ParseFragmentError::NonFiniteComponent { .. }
        ));
    }

    #[test]
    fn test_display_round_trips() {
        let velocity = Velocity::new([1.5, -2.0, 1e-3]);
        assert_eq!(velocity.to_string().parse::<Velocity>().unwrap(), velocity);
    }

    #[test]
    fn test_extract_record() {
        let record = raw(Some("[1.0 2.0 2.0]")).extract().unwrap();
        assert_eq!(record.characteristic_length(), 0.25);
        assert_eq!(record.area_to_mass(), 0.08);
        assert_eq!(record.velocity_magnitude(), Some(3.0));
        assert_eq!(record.value(Attribute::VelocityMagnitude), Some(3.0));
        assert_eq!(record.value(Attribute::CharacteristicLength), Some(0.25));
    }

    #[test]
    fn test_extract_without_velocity() {
        for velocity in [None, Some(""), Some("   ")] {
            let record = raw(velocity).extract().unwrap();
            assert_eq!(record.velocity(), None);
            assert_eq!(record.value(Attribute::VelocityMagnitude), None);
        }
    }

    #[test]
    fn test_extract_rejects_non_finite_fields() {
        let mut row = raw(None);
        row.area_to_mass = f64::NAN;
        assert!(matches!(
            row.extract().unwrap_err(),
            ParseFragmentError::NonFiniteField { field: "area-to-mass ratio", .. }
        ));
    }

    #[test]
    fn test_validate_record() {
        let record = FragmentRecord::new(
            String::new(),
            0.1,
            0.2,
            Some(Velocity::new([1.0, 0.0, 0.0])),
        );
        assert_eq!(record.validate(), Ok(()));

        let record = FragmentRecord::new(String::new(), f64::NAN, 0.2, None);
        assert!(matches!(
            record.validate().unwrap_err(),
            ParseFragmentError::NonFiniteField { field: "characteristic length", .. }
        ));

        let record = FragmentRecord::new(
            String::new(),
            0.1,
            0.2,
            Some(Velocity::new([1.0, f64::INFINITY, 0.0])),
        );
        assert_eq!(
            record.validate().unwrap_err(),
            ParseFragmentError::NonFiniteComponent {
                token: "inf".to_owned()
            }
        );
    }
}
