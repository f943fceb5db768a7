//! Flight validation and analysis thresholds
use strum_macros::{Display, EnumIter, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When a log contains several flights (separated by landings),
/// [FlightPick] selects the portion that is analyzed.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlightPick {
    /// Only the first flight, up to the first landing.
    #[strum(serialize = "first")]
    First,
    /// From the first takeoff to the very last landing, ground
    /// time in between included.
    #[default]
    #[strum(serialize = "concat")]
    Concat,
}

/// [FlightParsingConfig] gathers all the thresholds used to validate
/// a log, then to detect flight and circling modes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightParsingConfig {
    /// Minimum number of fixes in a log.
    pub min_fixes: usize,
    /// Maximum time between fixes (s).
    /// Soft limit, some fixes are allowed to exceed it.
    pub max_seconds_between_fixes: f64,
    /// Minimum time between fixes (s).
    /// Soft limit, some fixes are allowed to exceed it.
    pub min_seconds_between_fixes: f64,
    /// Maximum number of fixes exceeding either time between fixes limits.
    pub max_time_violations: usize,
    /// Maximum number of times a log may cross 00:00 UTC.
    pub max_new_days_in_flight: usize,
    /// Minimum average of absolute altitude changes (m/fix).
    /// Catches sensors that report constant, or almost constant, altitude.
    pub min_avg_abs_alt_change: f64,
    /// Maximum altitude change rate between fixes (m/s).
    /// Soft limit, some fixes are allowed to exceed it.
    pub max_alt_change_rate: f64,
    /// Maximum number of fixes exceeding the altitude change rate.
    pub max_alt_change_violations: usize,
    /// Absolute maximum altitude (m).
    pub max_alt: f64,
    /// Absolute minimum altitude (m).
    pub min_alt: f64,
    /// Minimum ground speed (km/h) for a fix to emit "flying".
    pub min_gsp_flight: f64,
    /// Minimum ground time (s) to be considered a landing.
    /// Not applied to the tail of the log.
    pub min_landing_time: f64,
    /// Selected flight when several are found.
    pub which_flight_to_pick: FlightPick,
    /// Minimum bearing change rate (deg/s) for a fix to emit "circling".
    pub min_bearing_change_circling: f64,
    /// Minimum time (s) between the two fixes used to
    /// compute the bearing change rate.
    pub min_time_for_bearing_change: f64,
    /// Minimum circling duration (s) to be reported as a thermal.
    pub min_time_for_thermal: f64,
}

impl Default for FlightParsingConfig {
    fn default() -> Self {
        Self {
            min_fixes: 50,
            max_seconds_between_fixes: 50.0,
            min_seconds_between_fixes: 1.0,
            max_time_violations: 10,
            max_new_days_in_flight: 2,
            min_avg_abs_alt_change: 0.01,
            max_alt_change_rate: 50.0,
            max_alt_change_violations: 3,
            max_alt: 10000.0,
            min_alt: -600.0,
            min_gsp_flight: 15.0,
            min_landing_time: 5.0 * 60.0,
            which_flight_to_pick: FlightPick::default(),
            min_bearing_change_circling: 6.0,
            min_time_for_bearing_change: 5.0,
            min_time_for_thermal: 60.0,
        }
    }
}

impl FlightParsingConfig {
    /// Returns a new [FlightParsingConfig] with desired minimal number of fixes.
    pub fn with_min_fixes(&self, min_fixes: usize) -> Self {
        let mut s = self.clone();
        s.min_fixes = min_fixes;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired soft limits
    /// on the time between fixes (in seconds), and number of tolerated violations.
    pub fn with_time_between_fixes(&self, min_s: f64, max_s: f64, violations: usize) -> Self {
        let mut s = self.clone();
        s.min_seconds_between_fixes = min_s;
        s.max_seconds_between_fixes = max_s;
        s.max_time_violations = violations;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired number of tolerated 00:00 UTC crossings.
    pub fn with_max_new_days_in_flight(&self, days: usize) -> Self {
        let mut s = self.clone();
        s.max_new_days_in_flight = days;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired minimal average
    /// absolute altitude change (m/fix).
    pub fn with_min_avg_abs_alt_change(&self, change_m: f64) -> Self {
        let mut s = self.clone();
        s.min_avg_abs_alt_change = change_m;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired altitude change rate
    /// limit (m/s), and number of tolerated violations.
    pub fn with_max_alt_change_rate(&self, rate_m_s: f64, violations: usize) -> Self {
        let mut s = self.clone();
        s.max_alt_change_rate = rate_m_s;
        s.max_alt_change_violations = violations;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired absolute altitude bounds (m).
    pub fn with_altitude_bounds(&self, min_alt: f64, max_alt: f64) -> Self {
        let mut s = self.clone();
        s.min_alt = min_alt;
        s.max_alt = max_alt;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired "flying" ground speed (km/h).
    pub fn with_min_gsp_flight(&self, gsp_km_h: f64) -> Self {
        let mut s = self.clone();
        s.min_gsp_flight = gsp_km_h;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired minimal landing duration (s).
    pub fn with_min_landing_time(&self, landing_s: f64) -> Self {
        let mut s = self.clone();
        s.min_landing_time = landing_s;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired [FlightPick] policy.
    pub fn with_flight_pick(&self, pick: FlightPick) -> Self {
        let mut s = self.clone();
        s.which_flight_to_pick = pick;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired circling thresholds:
    /// bearing change rate (deg/s) and minimal time between the fixes
    /// it is computed from (s).
    pub fn with_circling_detection(&self, rate_deg_s: f64, min_time_s: f64) -> Self {
        let mut s = self.clone();
        s.min_bearing_change_circling = rate_deg_s;
        s.min_time_for_bearing_change = min_time_s;
        s
    }

    /// Returns a new [FlightParsingConfig] with desired minimal thermal duration (s).
    pub fn with_min_time_for_thermal(&self, thermal_s: f64) -> Self {
        let mut s = self.clone();
        s.min_time_for_thermal = thermal_s;
        s
    }
}

#[cfg(test)]
mod test {
    use super::{FlightParsingConfig, FlightPick};
    use std::str::FromStr;

    #[test]
    fn default_thresholds() {
        let cfg = FlightParsingConfig::default();
        assert_eq!(cfg.min_fixes, 50);
        assert_eq!(cfg.max_time_violations, 10);
        assert_eq!(cfg.min_landing_time, 300.0);
        assert_eq!(cfg.which_flight_to_pick, FlightPick::Concat);
        assert_eq!(cfg.min_time_for_thermal, 60.0);
    }

    #[test]
    fn builders() {
        let cfg = FlightParsingConfig::default()
            .with_min_fixes(10)
            .with_altitude_bounds(-100.0, 5000.0)
            .with_flight_pick(FlightPick::First);

        assert_eq!(cfg.min_fixes, 10);
        assert_eq!(cfg.min_alt, -100.0);
        assert_eq!(cfg.max_alt, 5000.0);
        assert_eq!(cfg.which_flight_to_pick, FlightPick::First);

        // untouched
        assert_eq!(cfg.min_gsp_flight, 15.0);
    }

    #[test]
    fn flight_pick() {
        assert_eq!(FlightPick::from_str("first").unwrap(), FlightPick::First);
        assert_eq!(FlightPick::from_str("concat").unwrap(), FlightPick::Concat);
        assert_eq!(FlightPick::Concat.to_string(), "concat");
        assert!(FlightPick::from_str("last").is_err());
    }
}
