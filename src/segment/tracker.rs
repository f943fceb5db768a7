//! Thermal and glide tracking
use log::{debug, trace};

use crate::{
    fix::Fix,
    segment::{Glide, Thermal},
};

/// [SegmentTracker] walks the fixes of a flight, from takeoff to landing,
/// and splits them into alternating [Glide]s and [Thermal]s.
///
/// Circling stretches shorter than the minimal thermal duration are
/// not thermals: their fixes remain in the ongoing glide.
#[derive(Debug, Clone)]
pub(crate) struct SegmentTracker<'a> {
    /// Minimal thermal duration (s)
    min_thermal_s: f64,
    /// Circling mode of the previous fix
    circling: bool,
    /// True while a glide is open
    gliding: bool,
    /// First circling fix of the current circling stretch
    thermal_enter: Option<&'a Fix>,
    /// First fix of the open glide
    glide_enter: Option<&'a Fix>,
    /// Last fix of the open glide
    glide_last: Option<&'a Fix>,
    /// Track length (km) of the open glide
    distance_km: f64,
    /// Track length (km) of the open glide, when circling started
    distance_at_circling_km: f64,
    thermals: Vec<Thermal>,
    glides: Vec<Glide>,
}

impl<'a> SegmentTracker<'a> {
    /// Creates a new [SegmentTracker].
    ///
    /// ## Input
    /// - min_thermal_s: circling stretches must last at least that long (s)
    /// to be reported as [Thermal]s.
    pub fn new(min_thermal_s: f64) -> Self {
        Self {
            min_thermal_s,
            circling: false,
            gliding: false,
            thermal_enter: None,
            glide_enter: None,
            glide_last: None,
            distance_km: 0.0,
            distance_at_circling_km: 0.0,
            thermals: Vec::with_capacity(8),
            glides: Vec::with_capacity(8),
        }
    }

    /// Feed new [Fix]. Fixes must be provided in chronological order.
    pub fn new_fix(&mut self, fix: &'a Fix) {
        if !self.circling && fix.circling {
            self.circling = true;
            self.thermal_enter = Some(fix);
            self.distance_at_circling_km = self.distance_km;
        } else if self.circling && !fix.circling {
            self.circling = false;
            if let Some(enter) = self.thermal_enter.take() {
                self.close_thermal(enter, fix);
            }
        }

        match (self.gliding, self.glide_last) {
            (true, Some(last)) => {
                self.distance_km += fix.distance_to(last);
                self.glide_last = Some(fix);
            },
            _ => {
                self.gliding = true;
                self.glide_enter = Some(fix);
                self.glide_last = Some(fix);
                self.distance_km = 0.0;
            },
        }
    }

    fn close_thermal(&mut self, enter: &'a Fix, exit: &'a Fix) {
        let thermal = Thermal::new(enter, exit);

        if thermal.duration_s() > self.min_thermal_s - 1e-5 {
            // the glide ends where the thermal begins
            if let Some(glide_enter) = self.glide_enter {
                self.glides
                    .push(Glide::new(glide_enter, enter, self.distance_at_circling_km));
            }
            self.thermals.push(thermal);
            self.gliding = false;
        } else {
            trace!(
                "fix #{}: circling during {}s only, kept in glide",
                enter.index(),
                thermal.duration_s()
            );
        }
    }

    /// Closes the open glide, if any, on the last fix provided,
    /// and returns all thermals and glides.
    pub fn finish(mut self) -> (Vec<Thermal>, Vec<Glide>) {
        if self.gliding {
            if let (Some(enter), Some(exit)) = (self.glide_enter, self.glide_last) {
                self.glides.push(Glide::new(enter, exit, self.distance_km));
            }
        }

        debug!(
            "{} thermals, {} glides",
            self.thermals.len(),
            self.glides.len()
        );

        (self.thermals, self.glides)
    }
}
