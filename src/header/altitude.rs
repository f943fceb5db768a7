use crate::errors::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Altitude sensor a flight relies on
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AltitudeSource {
    /// Barometric (pressure) altitude
    #[default]
    Pressure,
    /// GNSS altitude
    Gnss,
}

impl std::str::FromStr for AltitudeSource {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("PRESS") {
            Ok(Self::Pressure)
        } else if trimmed.eq_ignore_ascii_case("GNSS") {
            Ok(Self::Gnss)
        } else {
            Err(ParsingError::AltitudeSource(trimmed.to_string()))
        }
    }
}

impl std::fmt::Display for AltitudeSource {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pressure => fmt.write_str("PRESS"),
            Self::Gnss => fmt.write_str("GNSS"),
        }
    }
}

impl AltitudeSource {
    /// Selects the altitude source, preferring the pressure sensor.
    /// Returns None when neither sensor can be trusted.
    pub fn select(press_alt_valid: bool, gnss_alt_valid: bool) -> Option<Self> {
        if press_alt_valid {
            Some(Self::Pressure)
        } else if gnss_alt_valid {
            Some(Self::Gnss)
        } else {
            None
        }
    }
}
