//! Scalar fragment attributes compared between populations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A scalar attribute of a fragment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    /// Characteristic length in m
    #[serde(alias = "lc")]
    CharacteristicLength,
    /// Area-to-mass ratio in m²/kg
    #[serde(alias = "am")]
    AreaToMassRatio,
    /// Ejection velocity magnitude in m/s, derived from the velocity vector
    #[serde(alias = "dv")]
    VelocityMagnitude,
}

impl Attribute {
    /// All attributes, in report order.
    pub const ALL: [Self; 3] = [
        Self::CharacteristicLength,
        Self::AreaToMassRatio,
        Self::VelocityMagnitude,
    ];

    /// Short identifier used on the command line and in file names.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::CharacteristicLength => "lc",
            Self::AreaToMassRatio => "am",
            Self::VelocityMagnitude => "dv",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CharacteristicLength => "Characteristic Length",
            Self::AreaToMassRatio => "A/M",
            Self::VelocityMagnitude => "Ejection Velocity",
        }
    }

    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::CharacteristicLength => "m",
            Self::AreaToMassRatio => "m^2/kg",
            Self::VelocityMagnitude => "m/s",
        }
    }

    /// Axis label with unit, e.g. `Characteristic Length [m]`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} [{}]", self.name(), self.unit())
    }

    /// Physical range of interest `(min, max)` of the attribute.
    ///
    /// Both bounds are positive so that the range can span log-space grids.
    #[must_use]
    pub fn range_of_interest(self) -> (f64, f64) {
        match self {
            Self::CharacteristicLength => (0.001, 10.0),
            Self::AreaToMassRatio => (0.001, 100.0),
            Self::VelocityMagnitude => (1.0, 10_000.0),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("unknown attribute '{name}' (expected one of: lc, am, dv)")]
pub struct UnknownAttributeError {
    pub name: String,
}

impl FromStr for Attribute {
    type Err = UnknownAttributeError;

    /// Accepts the short id (`lc`) or the snake-case name (`characteristic_length`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lc" | "characteristic_length" => Ok(Self::CharacteristicLength),
            "am" | "area_to_mass_ratio" => Ok(Self::AreaToMassRatio),
            "dv" | "velocity_magnitude" => Ok(Self::VelocityMagnitude),
            _ => Err(UnknownAttributeError { name: s.to_owned() }),
        }
    }
}

/// Error returned when a population does not carry a requested attribute.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
#[display("population '{population}' has no {attribute} values")]
pub struct IncompatibleAttributeError {
    pub attribute: Attribute,
    pub population: String,
}
