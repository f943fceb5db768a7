//! Competition tasks
use crate::{fix::Fix, flight::Flight, geo};

use strum_macros::{Display, EnumIter, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default task end time: 23:59:59
const END_OF_DAY_S: f64 = 86_399.0;

/// Goal lines are crossed once the spherical angle between the previous
/// turnpoint and the aircraft, seen from the line center, reaches this value.
const GOAL_LINE_ANGLE_DEG: f64 = 90.0;

/// How a [Turnpoint] is achieved
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TurnpointKind {
    /// Inside the cylinder after the start time, then out of it
    #[strum(serialize = "start_exit")]
    StartExit,
    /// Out of the cylinder after the start time, then inside it
    #[strum(serialize = "start_enter")]
    StartEnter,
    /// First fix inside the cylinder
    #[strum(serialize = "cylinder")]
    Cylinder,
    /// End of speed section, achieved like a [TurnpointKind::Cylinder]
    #[strum(serialize = "End_of_speed_section")]
    EndOfSpeedSection,
    /// Goal, achieved like a [TurnpointKind::Cylinder]
    #[strum(serialize = "goal_cylinder")]
    GoalCylinder,
    /// Goal line, centered on the turnpoint and perpendicular
    /// to the last leg. `radius` is half of the line length.
    #[strum(serialize = "goal_line")]
    GoalLine,
}

/// [Turnpoint] of a [Task]
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Turnpoint {
    /// Latitude of the center, in decimal degrees
    pub lat: f64,
    /// Longitude of the center, in decimal degrees
    pub lon: f64,
    /// Radius (km)
    pub radius: f64,
    /// [TurnpointKind]
    pub kind: TurnpointKind,
}

impl Turnpoint {
    /// Builds a new [Turnpoint]
    pub fn new(lat: f64, lon: f64, radius: f64, kind: TurnpointKind) -> Self {
        Self {
            lat,
            lon,
            radius,
            kind,
        }
    }

    /// Returns true if this [Fix] lies strictly within the radius.
    pub fn in_radius(&self, fix: &Fix) -> bool {
        geo::earth_distance(self.lat, self.lon, fix.lat(), fix.lon()) < self.radius
    }

    // Goal line is crossed when the fix stands beyond the line,
    // as seen from the previous turnpoint.
    fn beyond_line(&self, previous: &Turnpoint, fix: &Fix) -> bool {
        let angle = geo::angle_at(
            self.lat,
            self.lon,
            previous.lat,
            previous.lon,
            fix.lat(),
            fix.lon(),
        );
        angle >= GOAL_LINE_ANGLE_DEG
    }
}

/// [Task] is an ordered list of [Turnpoint]s, to be achieved
/// within a time window.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    /// [Turnpoint]s, in order
    pub turnpoints: Vec<Turnpoint>,
    /// Seconds since midnight: pilots may not start before that time.
    pub start_time: f64,
    /// Seconds since midnight: nothing is credited after that time.
    pub end_time: f64,
}

impl Task {
    /// Builds a new [Task] that ends at 23:59:59.
    pub fn new(turnpoints: Vec<Turnpoint>, start_time: f64) -> Self {
        Self {
            turnpoints,
            start_time,
            end_time: END_OF_DAY_S,
        }
    }

    /// Returns a new [Task] with desired end time (seconds since midnight).
    pub fn with_end_time(&self, end_time: f64) -> Self {
        let mut s = self.clone();
        s.end_time = end_time;
        s
    }

    /// Replays this [Flight] against the [Task].
    ///
    /// ## Output
    /// - one [Fix] per achieved [Turnpoint], in order.
    /// The list is shorter than the [Turnpoint]s list when the task
    /// was not completed.
    pub fn check_flight<'a>(&self, flight: &'a Flight) -> Vec<&'a Fix> {
        self.check_fixes(flight.fixes())
    }

    /// Replays these fixes against the [Task]: see [Task::check_flight].
    pub fn check_fixes<'a>(&self, fixes: &'a [Fix]) -> Vec<&'a Fix> {
        let mut achieved = Vec::with_capacity(self.turnpoints.len());
        let mut positioned = false;

        for fix in fixes {
            let t = achieved.len();
            let turnpoint = match self.turnpoints.get(t) {
                Some(turnpoint) => turnpoint,
                None => break, // goal
            };

            if fix.rawtime() > self.end_time {
                break;
            }

            let after_start = fix.rawtime() >= self.start_time;

            match turnpoint.kind {
                TurnpointKind::StartExit | TurnpointKind::StartEnter => {
                    let inside = turnpoint.in_radius(fix);
                    let exiting = turnpoint.kind == TurnpointKind::StartExit;

                    if positioned {
                        if inside != exiting {
                            achieved.push(fix);
                            positioned = false;
                        }
                    } else if after_start && inside == exiting {
                        positioned = true;
                    }
                },
                TurnpointKind::Cylinder
                | TurnpointKind::EndOfSpeedSection
                | TurnpointKind::GoalCylinder => {
                    if turnpoint.in_radius(fix) {
                        achieved.push(fix);
                    }
                },
                TurnpointKind::GoalLine => {
                    let crossed = match t.checked_sub(1).and_then(|p| self.turnpoints.get(p)) {
                        Some(previous) => turnpoint.beyond_line(previous, fix),
                        None => true,
                    };
                    if crossed && turnpoint.in_radius(fix) {
                        achieved.push(fix);
                    }
                },
            }
        }

        achieved
    }
}
