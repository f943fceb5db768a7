//! Thermals and glides
use crate::fix::Fix;

use hifitime::{Duration, Unit};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod tracker;

pub(crate) use tracker::SegmentTracker;

// Splits a duration into whole minutes and seconds
fn minutes_seconds(duration_s: f64) -> (i64, i64) {
    let total = duration_s.round() as i64;
    (total / 60, total % 60)
}

/// [Thermal] is a sustained circling portion of a flight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thermal {
    /// First circling [Fix]
    pub enter: Fix,
    /// First [Fix] out of the thermal
    pub exit: Fix,
}

impl Thermal {
    /// Builds a new [Thermal] from its boundaries
    pub fn new(enter: &Fix, exit: &Fix) -> Self {
        Self {
            enter: enter.clone(),
            exit: exit.clone(),
        }
    }

    pub(crate) fn duration_s(&self) -> f64 {
        self.exit.rawtime() - self.enter.rawtime()
    }

    /// Time spent in this [Thermal]
    pub fn duration(&self) -> Duration {
        self.duration_s() * Unit::Second
    }

    /// Altitude gained (m), negative when sinking
    pub fn alt_change(&self) -> f64 {
        self.exit.alt - self.enter.alt
    }

    /// Average vertical velocity (m/s)
    pub fn vertical_velocity(&self) -> f64 {
        let dt = self.duration_s();
        if dt.abs() < 1e-7 {
            0.0
        } else {
            self.alt_change() / dt
        }
    }
}

impl std::fmt::Display for Thermal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (min, sec) = minutes_seconds(self.duration_s());
        write!(
            f,
            "Thermal(vertical_velocity={:.2} m/s, duration={}m {}s)",
            self.vertical_velocity(),
            min,
            sec
        )
    }
}

/// [Glide] is the portion of a flight between two thermals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Glide {
    /// First [Fix] of this glide
    pub enter: Fix,
    /// Last [Fix] of this glide
    pub exit: Fix,
    /// Length (km) of the recorded track between both fixes.
    /// This is not the distance between them.
    pub track_length: f64,
}

impl Glide {
    /// Builds a new [Glide] from its boundaries and track length (km)
    pub fn new(enter: &Fix, exit: &Fix, track_length: f64) -> Self {
        Self {
            enter: enter.clone(),
            exit: exit.clone(),
            track_length,
        }
    }

    fn duration_s(&self) -> f64 {
        self.exit.rawtime() - self.enter.rawtime()
    }

    /// Time spent in this [Glide]
    pub fn duration(&self) -> Duration {
        self.duration_s() * Unit::Second
    }

    /// Average ground speed (km/h)
    pub fn speed(&self) -> f64 {
        let dt = self.duration_s();
        if dt.abs() < 1e-7 {
            0.0
        } else {
            self.track_length / dt * 3600.0
        }
    }

    /// Altitude change (m), usually negative
    pub fn alt_change(&self) -> f64 {
        self.exit.alt - self.enter.alt
    }

    /// Glide ratio (L/D): track length per altitude lost.
    /// Negative when the glide ended higher than it started,
    /// null when the altitude did not change.
    pub fn glide_ratio(&self) -> f64 {
        let alt_lost = -self.alt_change();
        if alt_lost.abs() < 1e-7 {
            0.0
        } else {
            self.track_length * 1000.0 / alt_lost
        }
    }
}

impl std::fmt::Display for Glide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (min, sec) = minutes_seconds(self.duration_s());
        write!(
            f,
            "Glide(dist={:.2} km, avg_speed={:.2} kph, avg L/D={:.2}, duration={}m {}s)",
            self.track_length,
            self.speed(),
            self.glide_ratio(),
            min,
            sec
        )
    }
}
