#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod decoder;
pub mod errors;
pub mod fix;
pub mod flight;
pub mod geo;
pub mod header;
pub mod records;
pub mod segment;
pub mod task;


pub mod prelude {
    pub use crate::{
        config::{FlightParsingConfig, FlightPick},
        decoder::{MarkovModel, ViterbiDecoder, CIRCLING_MODEL, FLYING_MODEL},
        errors::{Error, FormattingError, ParsingError},
        fix::{Fix, GpsValidity, RawFix},
        flight::{Flight, FlightBuilder, InvalidFlight, Note},
        header::{AltitudeSource, Metadata},
        records::IgcRecords,
        segment::{Glide, Thermal},
        task::{Task, Turnpoint, TurnpointKind},
    };
    // pub re-export
    pub use hifitime::prelude::{Duration, Epoch, TimeScale, Unit};
}
