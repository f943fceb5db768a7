use crate::{errors::FormattingError, fix::RawFix};

use std::io::Write;

const SECONDS_PER_DAY: i64 = 86_400;

// Splits an angle into (degrees, minutes, thousandths of minute)
fn split_angle(angle: f64) -> (i64, i64, i64) {
    let thousandths = (angle.abs() * 60_000.0).round() as i64;
    (
        thousandths / 60_000,
        (thousandths % 60_000) / 1000,
        thousandths % 1000,
    )
}

impl std::fmt::Display for RawFix {
    /// Formats this [RawFix] as a B record (without line terminator).
    /// Rawtime is wrapped to the time of day.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let rawtime = (self.rawtime.floor() as i64).rem_euclid(SECONDS_PER_DAY);

        let (lat_deg, lat_min, lat_min_dec) = split_angle(self.lat);
        let lat_sign = if self.lat.is_sign_negative() { 'S' } else { 'N' };

        let (lon_deg, lon_min, lon_min_dec) = split_angle(self.lon);
        let lon_sign = if self.lon.is_sign_negative() { 'W' } else { 'E' };

        write!(
            f,
            "B{:02}{:02}{:02}{:02}{:02}{:03}{}{:03}{:02}{:03}{}{}{:05}{:05}{}",
            rawtime / 3600,
            (rawtime % 3600) / 60,
            rawtime % 60,
            lat_deg,
            lat_min,
            lat_min_dec,
            lat_sign,
            lon_deg,
            lon_min,
            lon_min_dec,
            lon_sign,
            self.validity,
            self.press_alt as i32,
            self.gnss_alt as i32,
            self.extras,
        )
    }
}

impl RawFix {
    /// Reconstructs the B record of this [RawFix].
    pub fn to_b_record(&self) -> String {
        self.to_string()
    }

    /// Writes this [RawFix] as a CRLF terminated B record.
    pub fn format<W: Write>(&self, writer: &mut W) -> Result<(), FormattingError> {
        write!(writer, "{}\r\n", self)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::fix::{GpsValidity, RawFix};
    use rand::Rng;
    use std::{io::BufWriter, str::FromStr};

    #[test]
    fn b_record_formatting() {
        for line in [
            "B1101355206343N00006198WA0058700558",
            "B0000013330000S07036000WV-0012-0020012034",
            "B2359590000000N00000000EA0000000000",
            "B1200004559999N17959999EA9999999999FXA123",
        ] {
            let fix = RawFix::from_str(line).unwrap();
            assert_eq!(fix.to_b_record(), line);
        }
    }

    #[test]
    fn formatting_wraps_time_of_day() {
        let fix = RawFix {
            rawtime: 86_400.0 + 3661.0,
            lat: 46.5,
            lon: 12.25,
            validity: GpsValidity::A,
            press_alt: 1200.0,
            gnss_alt: 1234.0,
            index: 0,
            extras: String::new(),
        };
        assert_eq!(fix.to_b_record(), "B0101014630000N01215000EA0120001234");
    }

    #[test]
    fn crlf_output() {
        let fix = RawFix::from_str("B1101355206343N00006198WA0058700558").unwrap();
        let mut writer = BufWriter::new(Vec::new());
        fix.format(&mut writer).unwrap();
        let bytes = writer.into_inner().unwrap();
        assert_eq!(bytes, b"B1101355206343N00006198WA0058700558\r\n");
    }

    #[test]
    fn randomized_round_trip() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let line = format!(
                "B{:02}{:02}{:02}{:02}{:02}{:03}{}{:03}{:02}{:03}{}{}{:05}{:05}{}",
                rng.gen_range(0..24),
                rng.gen_range(0..60),
                rng.gen_range(0..60),
                rng.gen_range(0..90),
                rng.gen_range(0..60),
                rng.gen_range(0..1000),
                if rng.gen_bool(0.5) { 'N' } else { 'S' },
                rng.gen_range(0..180),
                rng.gen_range(0..60),
                rng.gen_range(0..1000),
                if rng.gen_bool(0.5) { 'E' } else { 'W' },
                if rng.gen_bool(0.5) { 'A' } else { 'V' },
                rng.gen_range(-9999..100_000),
                rng.gen_range(-9999..100_000),
                ["", "012034", "FXA999SIU12"][rng.gen_range(0..3)],
            );

            let fix = RawFix::from_str(&line).unwrap();
            let formatted = fix.to_b_record();
            assert_eq!(formatted, line);

            let reparsed = RawFix::from_str(&formatted).unwrap();
            assert_eq!(reparsed, fix);
        }
    }
}
