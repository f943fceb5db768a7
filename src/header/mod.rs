//! Flight recorder metadata (A, H and I records)
use hifitime::Epoch;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod altitude;
mod parsing;

pub use altitude::AltitudeSource;

/// [Metadata] gathers everything the recorder declares about itself
/// and the flight. Every field is optional: recorders only emit a subset.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metadata {
    /// Three letter manufacturer code (A record)
    pub manufacturer: Option<String>,
    /// Recorder unique ID (A record)
    pub unique_id: Option<String>,
    /// Flight date, at 00:00:00 UTC (HFDTE)
    pub date: Option<Epoch>,
    /// Glider type (HFGTY)
    pub glider_type: Option<String>,
    /// Competition class (HFCCL)
    pub competition_class: Option<String>,
    /// Recorder firmware version (HFRFW)
    pub firmware_version: Option<String>,
    /// Recorder hardware version (HFRHW)
    pub hardware_version: Option<String>,
    /// Recorder type (HFFTY)
    pub recorder_type: Option<String>,
    /// GPS receiver (HFGPS)
    pub gps_receiver: Option<String>,
    /// Pressure sensor (HFPRS)
    pub pressure_sensor: Option<String>,
    /// B record extensions description (I records)
    pub i_record: Option<String>,
}

impl std::fmt::Display for Metadata {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let unknown = "?";
        write!(
            f,
            "{}{} ",
            self.manufacturer.as_deref().unwrap_or(unknown),
            self.unique_id.as_deref().unwrap_or(unknown),
        )?;
        match self.date {
            Some(date) => write!(f, "{}", date)?,
            None => write!(f, "(no date)")?,
        }
        if let Some(glider) = &self.glider_type {
            write!(f, " - {}", glider)?;
        }
        Ok(())
    }
}
