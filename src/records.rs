//! IGC record reader
use crate::{errors::ParsingError, fix::RawFix};

use log::trace;

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

/// Two fixes closer than this (in seconds) are considered duplicates.
const DUPLICATE_FIX_TIME_S: f64 = 1e-5;

/// [IgcRecords] is an IGC log partitioned by record type.
/// Fixes are parsed, other records are kept as raw lines.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IgcRecords {
    /// Recorder identification (A records)
    pub a_records: Vec<String>,
    /// Headers (H records)
    pub h_records: Vec<String>,
    /// B record extensions description (I records)
    pub i_records: Vec<String>,
    /// Valid fixes, in order of appearance and consecutively indexed.
    pub fixes: Vec<RawFix>,
}

impl IgcRecords {
    /// Parses [IgcRecords] from any [Read]able input.
    /// Input is decoded as ISO-8859-1, so any byte sequence is accepted.
    /// Malformed B records and fixes that repeat the previous fix time are dropped.
    pub fn parse<R: Read>(reader: &mut BufReader<R>) -> Result<Self, ParsingError> {
        let mut records = Self::default();
        let mut buf = Vec::<u8>::with_capacity(128);

        loop {
            buf.clear();
            let size = reader.read_until(b'\n', &mut buf)?;
            if size == 0 {
                break;
            }

            // ISO-8859-1: each byte is one char
            let line: String = buf
                .iter()
                .filter(|b| **b != b'\r' && **b != b'\n')
                .map(|b| *b as char)
                .collect();

            records.push_line(line);
        }

        Ok(records)
    }

    fn push_line(&mut self, line: String) {
        match line.chars().next() {
            Some('A') => self.a_records.push(line),
            Some('H') => self.h_records.push(line),
            Some('I') => self.i_records.push(line),
            Some('B') => self.push_fix(&line),
            _ => {}, // other record types are not used
        }
    }

    fn push_fix(&mut self, line: &str) {
        let fix = match RawFix::from_b_record(line, self.fixes.len()) {
            Ok(fix) => fix,
            Err(e) => {
                trace!("dropped \"{}\": {}", line, e);
                return;
            },
        };

        if let Some(last) = self.fixes.last() {
            if (fix.rawtime - last.rawtime).abs() < DUPLICATE_FIX_TIME_S {
                trace!("dropped \"{}\": duplicate fix time", line);
                return;
            }
        }

        self.fixes.push(fix);
    }

    /// Parses [IgcRecords] from a local IGC file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let fd = File::open(path)?;
        let mut reader = BufReader::new(fd);
        Self::parse(&mut reader)
    }

    /// Parses [IgcRecords] from a local gzip compressed IGC file.
    #[cfg(feature = "flate2")]
    #[cfg_attr(docsrs, doc(cfg(feature = "flate2")))]
    pub fn from_gzip_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        let fd = File::open(path)?;
        let fd = GzDecoder::new(fd);
        let mut reader = BufReader::new(fd);
        Self::parse(&mut reader)
    }
}

impl FromStr for IgcRecords {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut reader = BufReader::new(s.as_bytes());
        Self::parse(&mut reader)
    }
}

#[cfg(test)]
mod test {
    use super::IgcRecords;
    use std::str::FromStr;

    #[test]
    fn record_partitioning() {
        let content = "AXXXABC\r\n\
            HFDTE150720\r\n\
            I013638FXA\r\n\
            LXXXcomment\r\n\
            \r\n\
            B1000004630000N01215000EA0050000523\r\n\
            B1000014630000N01215000EA0050000524\r\n\
            GABCDEF\r\n";

        let records = IgcRecords::from_str(content).unwrap();
        assert_eq!(records.a_records, vec!["AXXXABC".to_string()]);
        assert_eq!(records.h_records, vec!["HFDTE150720".to_string()]);
        assert_eq!(records.i_records, vec!["I013638FXA".to_string()]);
        assert_eq!(records.fixes.len(), 2);
        assert_eq!(records.fixes[1].gnss_alt, 524.0);
    }

    #[test]
    fn dropped_fixes() {
        let content = "B1000004630000N01215000EA0050000523\n\
            B1000004630000N01215000EA0050000524\n\
            B10000Z4630000N01215000EA0050000524\n\
            B100002463\n\
            B1000024630000N01215000EA0050000525\n";

        let records = IgcRecords::from_str(content).unwrap();
        assert_eq!(records.fixes.len(), 2);

        // indices remain consecutive
        assert_eq!(records.fixes[0].index, 0);
        assert_eq!(records.fixes[1].index, 1);
        assert_eq!(records.fixes[1].rawtime, 36002.0);
        assert_eq!(records.fixes[1].gnss_alt, 525.0);
    }

    #[test]
    fn latin1_input() {
        let bytes = b"HFPLTPILOTINCHARGE:J\xe9r\xf4me\r\nB1000004630000N01215000EA0050000523\r\n";
        let mut reader = std::io::BufReader::new(&bytes[..]);
        let records = IgcRecords::parse(&mut reader).unwrap();
        assert_eq!(records.h_records[0], "HFPLTPILOTINCHARGE:J\u{e9}r\u{f4}me");
        assert_eq!(records.fixes.len(), 1);
    }
}
