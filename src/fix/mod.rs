//! Position fixes (B records)
use hifitime::Epoch;
use strum_macros::{Display, EnumIter, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geo;

mod formatting;
mod parsing;

/// GPS validity letter of a B record
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GpsValidity {
    /// 3D fix
    #[default]
    A,
    /// 2D fix or no GPS data
    V,
}

/// [RawFix] gathers the fields of one B record, as they were recorded.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawFix {
    /// Seconds since last midnight (UTC). Once attached to a flight,
    /// it is corrected for 00:00 UTC crossings and may exceed one day.
    pub rawtime: f64,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// GPS validity
    pub validity: GpsValidity,
    /// Pressure altitude (m)
    pub press_alt: f64,
    /// GNSS altitude (m)
    pub gnss_alt: f64,
    /// Zero based position of this fix in the log
    pub index: usize,
    /// B record extensions, as described by the I record
    pub extras: String,
}

impl RawFix {
    /// Great circle distance (km) to another [RawFix]
    pub fn distance_to(&self, other: &Self) -> f64 {
        geo::earth_distance(self.lat, self.lon, other.lat, other.lon)
    }

    /// Bearing (degrees) towards another [RawFix]
    pub fn bearing_to(&self, other: &Self) -> f64 {
        geo::bearing_to(self.lat, self.lon, other.lat, other.lon)
    }
}

/// [Fix] is a [RawFix] that belongs to a valid flight, and
/// carries all the derived fields.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    /// Recorded fields
    pub raw: RawFix,
    /// Absolute timestamp: flight date + rawtime
    pub timestamp: Epoch,
    /// Altitude (m) from the selected altitude source
    pub alt: f64,
    /// Ground speed (km/h)
    pub gsp: f64,
    /// Bearing (degrees) towards next fix
    pub bearing: f64,
    /// Bearing change rate (deg/s)
    pub bearing_change_rate: f64,
    /// True when this fix is part of the flight
    pub flying: bool,
    /// True when circling
    pub circling: bool,
}

impl Fix {
    /// Zero based position in the log
    pub fn index(&self) -> usize {
        self.raw.index
    }

    /// Seconds since midnight of the flight date
    pub fn rawtime(&self) -> f64 {
        self.raw.rawtime
    }

    /// Latitude in decimal degrees
    pub fn lat(&self) -> f64 {
        self.raw.lat
    }

    /// Longitude in decimal degrees
    pub fn lon(&self) -> f64 {
        self.raw.lon
    }

    /// Great circle distance (km) to another [Fix]
    pub fn distance_to(&self, other: &Self) -> f64 {
        self.raw.distance_to(&other.raw)
    }

    /// Bearing (degrees) towards another [Fix]
    pub fn bearing_to(&self, other: &Self) -> f64 {
        self.raw.bearing_to(&other.raw)
    }
}
