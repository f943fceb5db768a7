//! Per fix quantities derived from the track
use crate::fix::RawFix;

use itertools::Itertools;

/// Ground speed (km/h) of each fix, from the previous fix.
/// First fix, and fixes sharing the previous fix time, have null speed.
pub(crate) fn ground_speeds(fixes: &[RawFix]) -> Vec<f64> {
    let mut gsp = Vec::with_capacity(fixes.len());
    if fixes.is_empty() {
        return gsp;
    }

    gsp.push(0.0);

    for (f0, f1) in fixes.iter().tuple_windows() {
        let dt = f1.rawtime - f0.rawtime;
        if dt.abs() < 1e-5 {
            gsp.push(0.0);
        } else {
            gsp.push(f1.distance_to(f0) / dt * 3600.0);
        }
    }

    gsp
}

/// Bearing (degrees) of each fix towards the next one.
/// The last fix inherits the bearing of the previous fix.
pub(crate) fn bearings(fixes: &[RawFix]) -> Vec<f64> {
    let mut bearings = fixes
        .iter()
        .tuple_windows()
        .map(|(f0, f1)| f0.bearing_to(f1))
        .collect::<Vec<_>>();

    match bearings.last() {
        Some(last) => bearings.push(*last),
        None => bearings.resize(fixes.len(), 0.0),
    }

    bearings
}

/// Bearing change rate (deg/s) of each fix.
///
/// Rates are computed against the closest previous fix that is at least
/// `min_time_s` older, since high sampling rates make neighbouring fixes
/// noisy. The first fix is never used as a reference.
/// Fixes with no such previous fix have a null rate.
pub(crate) fn bearing_change_rates(fixes: &[RawFix], bearings: &[f64], min_time_s: f64) -> Vec<f64> {
    (0..fixes.len())
        .map(|i| {
            let rawtime = fixes[i].rawtime;

            let prev = (1..i)
                .rev()
                .find(|j| (rawtime - fixes[*j].rawtime).abs() > min_time_s - 1e-7);

            match prev {
                Some(j) => {
                    let mut change = bearings[i] - bearings[j];
                    if change > 180.0 {
                        change -= 360.0;
                    } else if change <= -180.0 {
                        change += 360.0;
                    }
                    change / (rawtime - fixes[j].rawtime)
                },
                None => 0.0,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{bearing_change_rates, bearings, ground_speeds};
    use crate::fix::RawFix;

    fn fix(rawtime: f64, lat: f64, lon: f64) -> RawFix {
        RawFix {
            rawtime,
            lat,
            lon,
            ..Default::default()
        }
    }

    #[test]
    fn ground_speed() {
        // 0.01° of latitude is ~1.112 km
        let fixes = vec![
            fix(0.0, 46.0, 12.0),
            fix(60.0, 46.01, 12.0),
            fix(60.0, 46.02, 12.0),
        ];
        let gsp = ground_speeds(&fixes);
        assert_eq!(gsp.len(), 3);
        assert_eq!(gsp[0], 0.0);
        assert!((gsp[1] - 66.7).abs() < 0.1, "{}", gsp[1]);
        assert_eq!(gsp[2], 0.0);

        assert!(ground_speeds(&[]).is_empty());
    }

    #[test]
    fn bearing() {
        let fixes = vec![
            fix(0.0, 46.0, 12.0),
            fix(1.0, 46.01, 12.0),
            fix(2.0, 46.01, 12.01),
        ];
        let bearings = bearings(&fixes);
        assert_eq!(bearings.len(), 3);
        assert!(bearings[0].abs() < 1e-6);
        assert!((bearings[1] - 90.0).abs() < 0.01);
        assert_eq!(bearings[2], bearings[1]);

        assert_eq!(super::bearings(&[fix(0.0, 46.0, 12.0)]), vec![0.0]);
    }

    #[test]
    fn bearing_change_rate() {
        let fixes = (0..10).map(|i| fix(i as f64, 46.0, 12.0)).collect::<Vec<_>>();

        // turning left by 10°/s, crossing north
        let bearings = (0..10)
            .map(|i| {
                let b = 40.0 - 10.0 * i as f64;
                if b <= -180.0 {
                    b + 360.0
                } else {
                    b
                }
            })
            .collect::<Vec<_>>();

        let rates = bearing_change_rates(&fixes, &bearings, 5.0);
        for (i, rate) in rates.iter().enumerate() {
            // fix #5 would need fix #0
            if i < 6 {
                assert_eq!(*rate, 0.0, "fix #{}", i);
            } else {
                assert!((rate + 10.0).abs() < 1e-9, "fix #{}: {}", i, rate);
            }
        }
    }

    #[test]
    fn bearing_change_wraps() {
        let fixes = vec![
            fix(0.0, 46.0, 12.0),
            fix(1.0, 46.0, 12.0),
            fix(6.0, 46.0, 12.0),
        ];
        let rates = bearing_change_rates(&fixes, &[0.0, 170.0, -170.0], 5.0);
        assert_eq!(rates[1], 0.0);
        assert!((rates[2] - 4.0).abs() < 1e-9);

        let rates = bearing_change_rates(&fixes, &[0.0, -170.0, 170.0], 5.0);
        assert!((rates[2] + 4.0).abs() < 1e-9);

        // fix #0 is 6 s older, but never a reference
        let pair = vec![fix(0.0, 46.0, 12.0), fix(6.0, 46.0, 12.0)];
        let rates = bearing_change_rates(&pair, &[170.0, -170.0], 5.0);
        assert_eq!(rates, vec![0.0, 0.0]);
    }
}
