use crate::header::Metadata;

use hifitime::Epoch;
use scan_fmt::scan_fmt;

/// Removes every character outside of the printable ASCII range.
pub(crate) fn strip_non_printable(s: &str) -> String {
    s.chars().filter(|c| (' '..='~').contains(c)).collect()
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

// Matches "WORD1 WORD2 : value" where spaces are optional,
// and returns the (printable) value.
fn labelled_value(payload: &str, label: &[&str]) -> Option<String> {
    let mut rem = payload;
    for word in label {
        rem = strip_prefix_ignore_case(rem.trim_start_matches(' '), word)?;
    }
    let rem = rem.trim_start_matches(' ').strip_prefix(':')?;
    Some(strip_non_printable(rem.trim_start_matches(' ')))
}

fn parse_date(payload: &str) -> Option<Epoch> {
    let digits = match strip_prefix_ignore_case(payload, "DATE:") {
        Some(rem) => rem.trim_start_matches(' '),
        None => payload,
    };

    let (day, month, year) = scan_fmt!(
        digits,
        "{/[0-9][0-9]/}{/[0-9][0-9]/}{/[0-9][0-9]/}",
        u32,
        u32,
        u32
    );
    let (day, month, year) = (day?, month?, year?);

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    Epoch::maybe_from_gregorian_utc(2000 + year as i32, month as u8, day as u8, 0, 0, 0, 0).ok()
}

// Everything that follows the tag, once ':', ' ' and "GPS" are skipped.
fn parse_gps_receiver(payload: &str) -> Option<String> {
    let mut rem = payload;
    loop {
        if let Some(next) = rem.strip_prefix(|c: char| c == ':' || c == ' ') {
            rem = next;
        } else if let Some(next) = strip_prefix_ignore_case(rem, "GPS") {
            rem = next;
        } else {
            break;
        }
    }
    non_empty(strip_non_printable(rem))
}

impl Metadata {
    /// Builds [Metadata] from the A, H and I records of a log.
    /// Unknown or malformed headers are ignored.
    ///
    /// ## Input
    /// - a_records: A records, only the first one is used
    /// - h_records: H records, in order of appearance
    /// - i_records: I records, joined with a whitespace
    pub fn parse(a_records: &[String], h_records: &[String], i_records: &[String]) -> Self {
        let mut metadata = Self::default();

        if let Some(a_record) = a_records.first() {
            let field = |skip: usize| {
                let value = a_record.chars().skip(skip).take(3).collect::<String>();
                non_empty(strip_non_printable(&value))
            };
            metadata.manufacturer = field(1);
            metadata.unique_id = field(4);
        }

        if !i_records.is_empty() {
            metadata.i_record = non_empty(strip_non_printable(&i_records.join(" ")));
        }

        for h_record in h_records {
            metadata.parse_h_record(h_record);
        }

        metadata
    }

    fn parse_h_record(&mut self, record: &str) {
        let (tag, payload) = match (record.get(..5), record.get(5..)) {
            (Some(tag), Some(payload)) => (tag, payload),
            _ => return,
        };

        match tag.to_ascii_uppercase().as_str() {
            "HFDTE" => {
                if let Some(date) = parse_date(payload) {
                    self.date = Some(date);
                }
            },
            "HFGTY" => {
                if let Some(value) = labelled_value(payload, &["GLIDER", "TYPE"]) {
                    self.glider_type = non_empty(value);
                }
            },
            "HFRFW" | "HFRHW" => {
                if let Some(value) = labelled_value(payload, &["FIRMWARE", "VERSION"]) {
                    self.firmware_version = non_empty(value);
                }
                if let Some(value) = labelled_value(payload, &["HARDWARE", "VERSION"]) {
                    self.hardware_version = non_empty(value);
                }
            },
            "HFFTY" => {
                if let Some(value) = labelled_value(payload, &["FR", "TYPE"]) {
                    self.recorder_type = non_empty(value);
                }
            },
            "HFGPS" => {
                if let Some(value) = parse_gps_receiver(payload) {
                    self.gps_receiver = Some(value);
                }
            },
            "HFPRS" => {
                if let Some(value) = labelled_value(payload, &["PRESS", "ALT", "SENSOR"]) {
                    self.pressure_sensor = non_empty(value);
                }
            },
            "HFCCL" => {
                if let Some(value) = labelled_value(payload, &["COMPETITION", "CLASS"]) {
                    self.competition_class = non_empty(value);
                }
            },
            _ => {}, // not used
        }
    }
}

#[cfg(test)]
mod test {
    use super::{labelled_value, parse_date, parse_gps_receiver, strip_non_printable};
    use crate::header::Metadata;
    use hifitime::Epoch;

    fn records(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn non_printable_stripping() {
        assert_eq!(strip_non_printable("LXN\u{7f}\t1\u{e9}"), "LXN1");
        assert_eq!(strip_non_printable("~ ok !"), "~ ok !");
    }

    #[test]
    fn date_parsing() {
        for (payload, date) in [
            ("020911", Some(Epoch::from_gregorian_utc_at_midnight(2011, 9, 2))),
            ("DATE:311216,01", Some(Epoch::from_gregorian_utc_at_midnight(2016, 12, 31))),
            ("date:  150720", Some(Epoch::from_gregorian_utc_at_midnight(2020, 7, 15))),
            ("021311", None),
            ("000911", None),
            ("310211", None),
            ("0209", None),
            ("DATE:", None),
            ("02A911", None),
            ("DATE:020911garbage", Some(Epoch::from_gregorian_utc_at_midnight(2011, 9, 2))),
        ] {
            assert_eq!(parse_date(payload), date, "failed for \"{}\"", payload);
        }
    }

    #[test]
    fn labelled_values() {
        assert_eq!(
            labelled_value("GLIDERTYPE:test_glider_xx", &["GLIDER", "TYPE"]),
            Some("test_glider_xx".to_string())
        );
        assert_eq!(
            labelled_value(" Glider Type :  LS4", &["GLIDER", "TYPE"]),
            Some("LS4".to_string())
        );
        assert_eq!(labelled_value("GLIDERID:D-1234", &["GLIDER", "TYPE"]), None);
        assert_eq!(labelled_value("GLIDERTYPE LS4", &["GLIDER", "TYPE"]), None);
    }

    #[test]
    fn gps_receiver() {
        assert_eq!(
            parse_gps_receiver("uBLOX LEA-4S-2,16,max9000m"),
            Some("uBLOX LEA-4S-2,16,max9000m".to_string())
        );
        assert_eq!(
            parse_gps_receiver(":GPS: Garmin"),
            Some("Garmin".to_string())
        );
        assert_eq!(parse_gps_receiver("GPS:"), None);
    }

    #[test]
    fn metadata_parsing() {
        let metadata = Metadata::parse(
            &records(&["ALXNABCFLIGHT:1"]),
            &records(&[
                "HFDTE020911",
                "HFFXA035",
                "HFPLTPILOTINCHARGE:Test Pilot",
                "HFGTYGLIDERTYPE:test_glider_xx",
                "HFRFWFIRMWAREVERSION:2.2",
                "HFRHWHARDWAREVERSION:2",
                "HFFTYFRTYPE:LXNAVIGATION,LX8000F",
                "HFGPSuBLOX LEA-4S-2,16,max9000m",
                "HFPRSPRESSALTSENSOR:INTERSEMA,MS5534A,max10000m",
                "HFCCLCOMPETITIONCLASS:some_competition_class",
            ]),
            &records(&["I023638FXA3941ENL"]),
        );

        assert_eq!(metadata.manufacturer.as_deref(), Some("LXN"));
        assert_eq!(metadata.unique_id.as_deref(), Some("ABC"));
        assert_eq!(
            metadata.date,
            Some(Epoch::from_gregorian_utc_at_midnight(2011, 9, 2))
        );
        assert_eq!(metadata.glider_type.as_deref(), Some("test_glider_xx"));
        assert_eq!(metadata.firmware_version.as_deref(), Some("2.2"));
        assert_eq!(metadata.hardware_version.as_deref(), Some("2"));
        assert_eq!(
            metadata.recorder_type.as_deref(),
            Some("LXNAVIGATION,LX8000F")
        );
        assert_eq!(
            metadata.gps_receiver.as_deref(),
            Some("uBLOX LEA-4S-2,16,max9000m")
        );
        assert_eq!(
            metadata.pressure_sensor.as_deref(),
            Some("INTERSEMA,MS5534A,max10000m")
        );
        assert_eq!(
            metadata.competition_class.as_deref(),
            Some("some_competition_class")
        );
        assert_eq!(metadata.i_record.as_deref(), Some("I023638FXA3941ENL"));
    }

    #[test]
    fn firmware_in_hardware_tag() {
        let metadata = Metadata::parse(
            &[],
            &records(&["HFRHWFIRMWARE VERSION: 7.1", "HFRFWHARDWARE VERSION:"]),
            &[],
        );
        assert_eq!(metadata.firmware_version.as_deref(), Some("7.1"));
        assert!(metadata.hardware_version.is_none());
        assert!(metadata.manufacturer.is_none());
        assert!(metadata.date.is_none());
        assert!(metadata.i_record.is_none());
    }

    #[test]
    fn short_a_record() {
        let metadata = Metadata::parse(&records(&["AXY"]), &[], &[]);
        assert_eq!(metadata.manufacturer.as_deref(), Some("XY"));
        assert!(metadata.unique_id.is_none());

        let metadata = Metadata::parse(&records(&["AXXXAB"]), &[], &[]);
        assert_eq!(metadata.manufacturer.as_deref(), Some("XXX"));
        assert_eq!(metadata.unique_id.as_deref(), Some("AB"));

        // latin-1 characters count as one, then get stripped
        let metadata = Metadata::parse(&records(&["AX\u{e9}XAB\u{e9}ZZ"]), &[], &[]);
        assert_eq!(metadata.manufacturer.as_deref(), Some("XX"));
        assert_eq!(metadata.unique_id.as_deref(), Some("AB"));

        let metadata = Metadata::parse(&records(&["A"]), &[], &[]);
        assert!(metadata.manufacturer.is_none());

        let metadata = Metadata::parse(&records(&["AXXXABC"]), &[], &[]);
        assert_eq!(metadata.manufacturer.as_deref(), Some("XXX"));
        assert_eq!(metadata.unique_id.as_deref(), Some("ABC"));
    }
}
