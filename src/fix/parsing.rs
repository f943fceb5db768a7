use crate::{
    errors::ParsingError,
    fix::{GpsValidity, RawFix},
};

use std::str::FromStr;

/// Minimal B record length: tag, time, position, validity and altitudes
const B_RECORD_MIN_LEN: usize = 35;

fn parse_digits(s: Option<&str>) -> Option<u32> {
    let s = s?;
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok()
}

fn parse_altitude(s: Option<&str>) -> Option<f64> {
    let s = s?;
    let bytes = s.as_bytes();
    if bytes.len() != 5 {
        return None;
    }
    if bytes[0] != b'-' && !bytes[0].is_ascii_digit() {
        return None;
    }
    if !bytes[1..].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i32>().ok().map(|alt| alt as f64)
}

// Parses "DDMMmmmH" (latitude) or "DDDMMmmmH" (longitude)
fn parse_angle(s: Option<&str>, deg_len: usize, positive: u8, negative: u8) -> Option<f64> {
    let s = s?;
    let deg = parse_digits(s.get(..deg_len))?;
    let min = parse_digits(s.get(deg_len..deg_len + 2))?;
    let min_dec = parse_digits(s.get(deg_len + 2..deg_len + 5))?;

    let mut angle = deg as f64;
    angle += min as f64 / 60.0;
    angle += min_dec as f64 / 1000.0 / 60.0;

    match s.as_bytes().get(deg_len + 5) {
        Some(h) if *h == positive => Some(angle),
        Some(h) if *h == negative => Some(-angle),
        _ => None,
    }
}

impl RawFix {
    /// Parses a [RawFix] from a B record line.
    ///
    /// ## Input
    /// - line: B record, trailing line terminators already removed
    /// - index: zero based position of this fix in its log
    pub fn from_b_record(line: &str, index: usize) -> Result<Self, ParsingError> {
        if !line.starts_with('B') {
            return Err(ParsingError::NotAFix);
        }

        if line.len() < B_RECORD_MIN_LEN {
            return Err(ParsingError::FixTooShort);
        }

        let hours = parse_digits(line.get(1..3)).ok_or(ParsingError::FixTime)?;
        let minutes = parse_digits(line.get(3..5)).ok_or(ParsingError::FixTime)?;
        let seconds = parse_digits(line.get(5..7)).ok_or(ParsingError::FixTime)?;

        let rawtime = (hours as f64 * 60.0 + minutes as f64) * 60.0 + seconds as f64;

        let lat = parse_angle(line.get(7..15), 2, b'N', b'S').ok_or(ParsingError::Latitude)?;
        let lon = parse_angle(line.get(15..24), 3, b'E', b'W').ok_or(ParsingError::Longitude)?;

        let validity = line
            .get(24..25)
            .and_then(|v| GpsValidity::from_str(v).ok())
            .ok_or(ParsingError::GpsValidity)?;

        let press_alt = parse_altitude(line.get(25..30)).ok_or(ParsingError::PressureAltitude)?;
        let gnss_alt = parse_altitude(line.get(30..35)).ok_or(ParsingError::GnssAltitude)?;

        let extras = line.get(35..).unwrap_or_default().to_string();

        Ok(Self {
            rawtime,
            lat,
            lon,
            validity,
            press_alt,
            gnss_alt,
            index,
            extras,
        })
    }
}

impl FromStr for RawFix {
    type Err = ParsingError;
    /// Parses a standalone B record, with a null index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_b_record(s.trim_end_matches(&['\r', '\n'][..]), 0)
    }
}
