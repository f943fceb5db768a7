use crate::{
    config::FlightParsingConfig,
    fix::{Fix, RawFix},
    flight::{derived, detection, validation, Flight, InvalidFlight, Note},
    header::{AltitudeSource, Metadata},
    records::IgcRecords,
    segment::SegmentTracker,
};

use hifitime::Unit;
use log::debug;

/// [FlightBuilder] runs the validation and analysis stages over
/// [IgcRecords], in order. The first failing stage stops the process.
#[derive(Debug, Clone)]
pub struct FlightBuilder {
    records: IgcRecords,
    config: FlightParsingConfig,
}

impl FlightBuilder {
    /// Prepares a new [FlightBuilder]
    pub fn new(records: IgcRecords, config: FlightParsingConfig) -> Self {
        Self { records, config }
    }

    /// Validates and analyzes the log.
    ///
    /// ## Output
    /// - [Flight] when the log is usable. It may still carry warnings.
    /// - [InvalidFlight] otherwise, carrying the diagnostics that explain why.
    pub fn build(self) -> Result<Flight, InvalidFlight> {
        let cfg = self.config;
        let metadata = Metadata::parse(
            &self.records.a_records,
            &self.records.h_records,
            &self.records.i_records,
        );

        let mut fixes = self.records.fixes;
        let mut notes = Vec::<Note>::new();

        if fixes.len() < cfg.min_fixes {
            notes.push(Note::Error(format!(
                "This file has {} fixes, less than the minimum {}.",
                fixes.len(),
                cfg.min_fixes
            )));
            return Err(invalid(notes, fixes, metadata));
        }

        let (press_alt_valid, gnss_alt_valid) =
            validation::check_altitudes(&fixes, &cfg, &mut notes);

        if !validation::check_rawtime(&mut fixes, &cfg, &mut notes) {
            return Err(invalid(notes, fixes, metadata));
        }

        let alt_source = match AltitudeSource::select(press_alt_valid, gnss_alt_valid) {
            Some(source) => source,
            None => {
                notes.push(Note::Error(
                    "neither pressure nor gnss altitude is valid.".to_string(),
                ));
                return Err(invalid(notes, fixes, metadata));
            },
        };

        let date = match metadata.date {
            Some(date) => date,
            None => {
                notes.push(Note::Error("no date record (HFDTE) in the file".to_string()));
                return Err(invalid(notes, fixes, metadata));
            },
        };

        let rawtimes = fixes.iter().map(|fix| fix.rawtime).collect::<Vec<_>>();
        let gsp = derived::ground_speeds(&fixes);

        let flying =
            detection::detect_flight(&rawtimes, &gsp, cfg.min_gsp_flight, cfg.min_landing_time);

        let (takeoff, landing) = match detection::takeoff_landing(&flying, cfg.which_flight_to_pick)
        {
            Some(takeoff_landing) => takeoff_landing,
            None => {
                notes.push(Note::Error("did not detect takeoff.".to_string()));
                return Err(invalid(notes, fixes, metadata));
            },
        };

        debug!(
            "takeoff: fix #{} ({}s) - landing: fix #{} ({}s)",
            takeoff, rawtimes[takeoff], landing, rawtimes[landing]
        );

        let bearings = derived::bearings(&fixes);
        let rates =
            derived::bearing_change_rates(&fixes, &bearings, cfg.min_time_for_bearing_change);
        let circling = detection::detect_circling(&flying, &rates, cfg.min_bearing_change_circling);

        let fixes = fixes
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                let alt = match alt_source {
                    AltitudeSource::Pressure => raw.press_alt,
                    AltitudeSource::Gnss => raw.gnss_alt,
                };
                Fix {
                    timestamp: date + raw.rawtime * Unit::Second,
                    alt,
                    gsp: gsp[i],
                    bearing: bearings[i],
                    bearing_change_rate: rates[i],
                    flying: flying[i],
                    circling: circling[i],
                    raw,
                }
            })
            .collect::<Vec<_>>();

        let mut tracker = SegmentTracker::new(cfg.min_time_for_thermal);
        for fix in &fixes[takeoff..=landing] {
            tracker.new_fix(fix);
        }
        let (thermals, glides) = tracker.finish();

        Ok(Flight {
            fixes,
            notes,
            metadata,
            date,
            alt_source,
            press_alt_valid,
            gnss_alt_valid,
            takeoff,
            landing,
            thermals,
            glides,
            config: cfg,
        })
    }
}

fn invalid(notes: Vec<Note>, fixes: Vec<RawFix>, metadata: Metadata) -> InvalidFlight {
    for note in notes.iter() {
        debug!("{}", note);
    }
    InvalidFlight {
        notes,
        fixes,
        metadata,
    }
}
