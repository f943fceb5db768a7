//! Validated and analyzed flights
use crate::{
    config::FlightParsingConfig,
    errors::Error,
    fix::{Fix, RawFix},
    header::{AltitudeSource, Metadata},
    records::IgcRecords,
    segment::{Glide, Thermal},
};

use hifitime::Epoch;
use thiserror::Error;

use std::{
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod builder;
mod derived;
mod detection;
mod validation;

pub use builder::FlightBuilder;

/// Diagnostic attached to a log during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Note {
    /// Informative: does not invalidate the flight on its own
    Warning(String),
    /// Fatal to the flight
    Error(String),
}

impl Note {
    /// Returns true if this [Note] invalidates the flight
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Warning(msg) => write!(f, "Warning: {}", msg),
            Self::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

fn first_error(notes: &[Note]) -> String {
    notes
        .iter()
        .find(|note| note.is_error())
        .map(|note| note.to_string())
        .unwrap_or_default()
}

/// [InvalidFlight] is returned when a log does not pass validation.
/// It keeps everything that was gathered before the failing stage.
#[derive(Debug, Clone, Error)]
#[error("invalid flight ({})", first_error(.notes))]
pub struct InvalidFlight {
    /// Ordered diagnostics, at least one of them being a [Note::Error]
    pub notes: Vec<Note>,
    /// Fixes, as parsed
    pub fixes: Vec<RawFix>,
    /// Recorder and flight metadata
    pub metadata: Metadata,
}

/// [Flight] is a validated IGC log, with its fixes fully derived
/// and its thermals and glides detected.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flight {
    fixes: Vec<Fix>,
    notes: Vec<Note>,
    metadata: Metadata,
    date: Epoch,
    alt_source: AltitudeSource,
    press_alt_valid: bool,
    gnss_alt_valid: bool,
    takeoff: usize,
    landing: usize,
    thermals: Vec<Thermal>,
    glides: Vec<Glide>,
    config: FlightParsingConfig,
}

impl Flight {
    /// Validates and analyzes [IgcRecords].
    pub fn new(records: IgcRecords, config: FlightParsingConfig) -> Result<Self, InvalidFlight> {
        FlightBuilder::new(records, config).build()
    }

    /// Parses, validates and analyzes a [Flight] from any [Read]able input.
    pub fn parse<R: Read>(
        reader: &mut BufReader<R>,
        config: FlightParsingConfig,
    ) -> Result<Self, Error> {
        let records = IgcRecords::parse(reader)?;
        Ok(Self::new(records, config)?)
    }

    /// Parses, validates and analyzes a [Flight] from a local IGC file.
    /// ```
    /// use igc_flight::prelude::*;
    ///
    /// let flight = Flight::from_file(
    ///     "data/IGC/thermals.igc",
    ///     FlightParsingConfig::default(),
    /// ).unwrap();
    ///
    /// assert_eq!(flight.alt_source(), AltitudeSource::Pressure);
    /// assert_eq!(flight.thermals().len(), 2);
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P, config: FlightParsingConfig) -> Result<Self, Error> {
        let records = IgcRecords::from_file(path)?;
        Ok(Self::new(records, config)?)
    }

    /// Parses, validates and analyzes a [Flight] from a local gzip compressed IGC file.
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file<P: AsRef<Path>>(
        path: P,
        config: FlightParsingConfig,
    ) -> Result<Self, Error> {
        let records = IgcRecords::from_gzip_file(path)?;
        Ok(Self::new(records, config)?)
    }

    /// All fixes of the log, takeoff and landing included.
    pub fn fixes(&self) -> &[Fix] {
        &self.fixes
    }

    /// Warnings raised during validation.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Recorder and flight metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Flight date, at 00:00:00 UTC
    pub fn date(&self) -> Epoch {
        self.date
    }

    /// Altitude sensor the analysis relies on
    pub fn alt_source(&self) -> AltitudeSource {
        self.alt_source
    }

    /// True if the pressure altitude passed the sanity checks
    pub fn press_alt_valid(&self) -> bool {
        self.press_alt_valid
    }

    /// True if the GNSS altitude passed the sanity checks
    pub fn gnss_alt_valid(&self) -> bool {
        self.gnss_alt_valid
    }

    /// First [Fix] in flight
    pub fn takeoff_fix(&self) -> &Fix {
        &self.fixes[self.takeoff]
    }

    /// [Fix] at which the aircraft was found on the ground again,
    /// or the last [Fix] of the log.
    pub fn landing_fix(&self) -> &Fix {
        &self.fixes[self.landing]
    }

    /// Fixes from takeoff to landing, both included.
    pub fn flight_fixes(&self) -> &[Fix] {
        &self.fixes[self.takeoff..=self.landing]
    }

    /// Detected thermals, in chronological order
    pub fn thermals(&self) -> &[Thermal] {
        &self.thermals
    }

    /// Glides between thermals, in chronological order
    pub fn glides(&self) -> &[Glide] {
        &self.glides
    }

    /// [FlightParsingConfig] this [Flight] was analyzed with
    pub fn config(&self) -> &FlightParsingConfig {
        &self.config
    }

    /// Raw flying (true) / standing (false) observations,
    /// as fed to the flight mode decoder.
    pub fn flying_emissions(&self) -> Vec<bool> {
        let gsp = self.fixes.iter().map(|fix| fix.gsp).collect::<Vec<_>>();
        detection::flying_emissions(&gsp, self.config.min_gsp_flight)
    }

    /// Raw circling (true) / straight (false) observations,
    /// as fed to the circling mode decoder.
    pub fn circling_emissions(&self) -> Vec<bool> {
        let flying = self.fixes.iter().map(|fix| fix.flying).collect::<Vec<_>>();
        let rates = self
            .fixes
            .iter()
            .map(|fix| fix.bearing_change_rate)
            .collect::<Vec<_>>();
        detection::circling_emissions(&flying, &rates, self.config.min_bearing_change_circling)
    }
}

impl FromStr for Flight {
    type Err = Error;
    /// Parses, validates and analyzes a [Flight] with default thresholds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = BufReader::new(s.as_bytes());
        Self::parse(&mut reader, FlightParsingConfig::default())
    }
}

impl std::fmt::Display for Flight {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Flight({} fixes, {} thermals, {} glides)",
            self.fixes.len(),
            self.thermals.len(),
            self.glides.len()
        )
    }
}
