use thiserror::Error;

use crate::flight::InvalidFlight;

/// Errors related to IGC records parsing.
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("not a B record")]
    NotAFix,
    #[error("B record is too short")]
    FixTooShort,
    #[error("invalid time of day")]
    FixTime,
    #[error("invalid latitude")]
    Latitude,
    #[error("invalid longitude")]
    Longitude,
    #[error("invalid gps validity letter")]
    GpsValidity,
    #[error("invalid pressure altitude")]
    PressureAltitude,
    #[error("invalid gnss altitude")]
    GnssAltitude,
    #[error("unknown altitude source \"{0}\"")]
    AltitudeSource(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to IGC records formatting.
#[derive(Debug, Error)]
pub enum FormattingError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the file and reader entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
    #[error(transparent)]
    InvalidFlight(#[from] InvalidFlight),
}
