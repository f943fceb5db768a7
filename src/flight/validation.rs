//! Sanity checks run over raw fixes, before any analysis
use crate::{config::FlightParsingConfig, fix::RawFix, flight::Note};

use itertools::Itertools;
use log::trace;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A decreasing time is a 00:00 UTC crossing when the next day
/// lands this close (in seconds) to the previous fix.
const DAY_SWITCH_TOLERANCE_S: f64 = 200.0;

/// Per channel altitude statistics
#[derive(Debug, Default, Copy, Clone)]
struct AltitudeStats {
    changes_sum: f64,
    huge_changes: usize,
    range_violations: usize,
}

impl AltitudeStats {
    fn new_pair(&mut self, delta_m: f64, delta_s: f64, max_rate: f64) {
        if delta_m / delta_s > max_rate {
            self.huge_changes += 1;
        } else {
            self.changes_sum += delta_m;
        }
    }

    fn new_altitude(&mut self, alt: f64, cfg: &FlightParsingConfig) {
        if alt > cfg.max_alt || alt < cfg.min_alt {
            self.range_violations += 1;
        }
    }

    // Returns true when this channel can be trusted.
    fn validate(
        &self,
        channel: &str,
        nb_fixes: usize,
        cfg: &FlightParsingConfig,
        notes: &mut Vec<Note>,
    ) -> bool {
        let mut valid = true;

        let avg = if nb_fixes > 1 {
            self.changes_sum / (nb_fixes - 1) as f64
        } else {
            0.0
        };

        if avg < cfg.min_avg_abs_alt_change {
            notes.push(Note::Warning(format!(
                "average {} altitude change between fixes is: {:.6}. It is lower than the minimum: {:.6}.",
                channel, avg, cfg.min_avg_abs_alt_change
            )));
            valid = false;
        }

        if self.huge_changes > cfg.max_alt_change_violations {
            notes.push(Note::Warning(format!(
                "too many high changes in {} altitude: {}. Maximum allowed: {}.",
                channel, self.huge_changes, cfg.max_alt_change_violations
            )));
            valid = false;
        }

        if self.range_violations > 0 {
            notes.push(Note::Warning(format!(
                "{} altitude limits exceeded in {} fixes.",
                channel, self.range_violations
            )));
            valid = false;
        }

        valid
    }
}

/// Checks both altitude channels, appending a warning for each failed check.
///
/// ## Output
/// - (pressure altitude valid, gnss altitude valid)
pub(crate) fn check_altitudes(
    fixes: &[RawFix],
    cfg: &FlightParsingConfig,
    notes: &mut Vec<Note>,
) -> (bool, bool) {
    let mut press = AltitudeStats::default();
    let mut gnss = AltitudeStats::default();

    for (f0, f1) in fixes.iter().tuple_windows() {
        let delta_s = (f1.rawtime - f0.rawtime).abs();
        if delta_s > 0.5 {
            press.new_pair((f1.press_alt - f0.press_alt).abs(), delta_s, cfg.max_alt_change_rate);
            gnss.new_pair((f1.gnss_alt - f0.gnss_alt).abs(), delta_s, cfg.max_alt_change_rate);
        }
    }

    for fix in fixes {
        press.new_altitude(fix.press_alt, cfg);
        gnss.new_altitude(fix.gnss_alt, cfg);
    }

    let press_valid = press.validate("pressure", fixes.len(), cfg, notes);
    let gnss_valid = gnss.validate("gnss", fixes.len(), cfg, notes);
    (press_valid, gnss_valid)
}

/// Corrects rawtimes for 00:00 UTC crossings, in place and in fix order,
/// then checks the time between fixes.
/// Fixes that still go back in time are counted as violations and dropped,
/// remaining fixes are indexed again.
/// Returns false (and appends an error) when the log cannot be used.
pub(crate) fn check_rawtime(
    fixes: &mut Vec<RawFix>,
    cfg: &FlightParsingConfig,
    notes: &mut Vec<Note>,
) -> bool {
    let mut days_added = 0;
    let mut offset_s = 0.0;
    let mut violations = 0;

    let mut kept = Vec::<RawFix>::with_capacity(fixes.len());

    for mut fix in fixes.drain(..) {
        fix.rawtime += offset_s;

        if let Some(prev_rawtime) = kept.last().map(|prev| prev.rawtime) {
            if prev_rawtime > fix.rawtime
                && fix.rawtime + SECONDS_PER_DAY < prev_rawtime + DAY_SWITCH_TOLERANCE_S
            {
                days_added += 1;
                offset_s += SECONDS_PER_DAY;
                fix.rawtime += SECONDS_PER_DAY;
            }

            let dt = fix.rawtime - prev_rawtime;
            if dt < cfg.min_seconds_between_fixes - 1e-5 {
                violations += 1;
            }
            if dt > cfg.max_seconds_between_fixes + 1e-5 {
                violations += 1;
            }

            if dt < 0.0 {
                trace!(
                    "fix #{} dropped: time goes back ({}s < {}s)",
                    fix.index,
                    fix.rawtime,
                    prev_rawtime
                );
                continue;
            }
        }

        fix.index = kept.len();
        kept.push(fix);
    }

    *fixes = kept;

    let mut valid = true;

    if violations > cfg.max_time_violations {
        notes.push(Note::Error(format!(
            "too many fixes intervals exceed time between fixes constraints. Allowed {} fixes, found {} fixes.",
            cfg.max_time_violations, violations
        )));
        valid = false;
    }

    if days_added > cfg.max_new_days_in_flight {
        notes.push(Note::Error(format!(
            "too many times did the flight cross the UTC 0:00 barrier. Allowed {} times, found {} times.",
            cfg.max_new_days_in_flight, days_added
        )));
        valid = false;
    }

    valid
}

#[cfg(test)]
mod test {
    use super::{check_altitudes, check_rawtime};
    use crate::{config::FlightParsingConfig, fix::RawFix};

    fn fixes(samples: &[(f64, f64, f64)]) -> Vec<RawFix> {
        samples
            .iter()
            .enumerate()
            .map(|(index, (rawtime, press_alt, gnss_alt))| RawFix {
                rawtime: *rawtime,
                press_alt: *press_alt,
                gnss_alt: *gnss_alt,
                index,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn flat_channel() {
        let cfg = FlightParsingConfig::default();
        let samples = (0..50)
            .map(|i| (i as f64, 500.0, 500.0 + i as f64))
            .collect::<Vec<_>>();

        let mut notes = Vec::new();
        let (press, gnss) = check_altitudes(&fixes(&samples), &cfg, &mut notes);
        assert!(!press);
        assert!(gnss);
        assert_eq!(notes.len(), 1);
        assert!(notes[0]
            .to_string()
            .starts_with("Warning: average pressure altitude change"));
    }

    #[test]
    fn huge_changes_and_limits() {
        let cfg = FlightParsingConfig::default();
        // pressure jumps by 100 m every 10 fixes, gnss exceeds the ceiling
        let samples = (0..60)
            .map(|i| {
                let press = if i % 10 == 9 { 600.0 } else { 500.0 + i as f64 };
                (i as f64, press, 10_000.0 + i as f64)
            })
            .collect::<Vec<_>>();

        let mut notes = Vec::new();
        let (press, gnss) = check_altitudes(&fixes(&samples), &cfg, &mut notes);
        assert!(!press);
        assert!(!gnss);

        let notes = notes.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        assert!(notes
            .iter()
            .any(|n| n.starts_with("Warning: too many high changes in pressure altitude")));
        assert!(notes.contains(&"Warning: gnss altitude limits exceeded in 59 fixes.".to_string()));
    }

    #[test]
    fn slow_samples_are_not_rates() {
        let cfg = FlightParsingConfig::default();
        // identical times are not considered for the rate nor the average
        let samples = vec![(0.0, 500.0, 500.0), (0.2, 900.0, 900.0), (1.2, 901.0, 901.0)];
        let mut notes = Vec::new();
        let (press, gnss) = check_altitudes(&fixes(&samples), &cfg, &mut notes);
        assert!(press);
        assert!(gnss);
        assert!(notes.is_empty());
    }

    #[test]
    fn midnight_crossing() {
        let cfg = FlightParsingConfig::default();
        let mut fixes = fixes(&[
            (86_398.0, 0.0, 0.0),
            (86_399.0, 0.0, 0.0),
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
        ]);

        let mut notes = Vec::new();
        assert!(check_rawtime(&mut fixes, &cfg, &mut notes));
        assert!(notes.is_empty());

        let rawtimes = fixes.iter().map(|f| f.rawtime).collect::<Vec<_>>();
        assert_eq!(rawtimes, vec![86_398.0, 86_399.0, 86_400.0, 86_401.0]);
    }

    #[test]
    fn backwards_time_is_not_a_crossing() {
        let cfg = FlightParsingConfig::default().with_time_between_fixes(1.0, 50.0, 0);
        let mut fixes = fixes(&[(100.0, 0.0, 0.0), (101.0, 0.0, 0.0), (50.0, 0.0, 0.0)]);

        let mut notes = Vec::new();
        assert!(!check_rawtime(&mut fixes, &cfg, &mut notes));
        assert_eq!(notes.len(), 1);
        assert!(notes[0].is_error());
    }

    #[test]
    fn backwards_time_is_dropped() {
        let cfg = FlightParsingConfig::default();
        let mut fixes = fixes(&[
            (100.0, 0.0, 0.0),
            (101.0, 0.0, 0.0),
            (71.0, 0.0, 0.0),
            (102.0, 0.0, 0.0),
            (101.5, 0.0, 0.0),
            (103.0, 0.0, 0.0),
        ]);

        let mut notes = Vec::new();
        assert!(check_rawtime(&mut fixes, &cfg, &mut notes));
        assert!(notes.is_empty());

        let rawtimes = fixes.iter().map(|f| f.rawtime).collect::<Vec<_>>();
        assert_eq!(rawtimes, vec![100.0, 101.0, 102.0, 103.0]);

        let indices = fixes.iter().map(|f| f.index).collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn too_many_crossings() {
        let cfg = FlightParsingConfig::default()
            .with_max_new_days_in_flight(1)
            .with_time_between_fixes(0.0, 86_400.0, 10);

        let mut fixes = fixes(&[
            (86_399.0, 0.0, 0.0),
            (0.0, 0.0, 0.0),
            (86_399.0, 0.0, 0.0),
            (0.0, 0.0, 0.0),
        ]);

        let mut notes = Vec::new();
        assert!(!check_rawtime(&mut fixes, &cfg, &mut notes));
        assert_eq!(fixes[3].rawtime, 2.0 * 86_400.0);
        assert_eq!(
            notes[0].to_string(),
            "Error: too many times did the flight cross the UTC 0:00 barrier. Allowed 1 times, found 2 times."
        );
    }
}
