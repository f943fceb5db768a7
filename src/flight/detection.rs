//! Flight and circling modes detection
use crate::{
    config::FlightPick,
    decoder::{ViterbiDecoder, CIRCLING_MODEL, FLYING_MODEL},
};

/// Observations fed to the flight mode decoder:
/// true when the ground speed exceeds `min_gsp`.
pub(crate) fn flying_emissions(gsp: &[f64], min_gsp: f64) -> Vec<bool> {
    gsp.iter().map(|gsp| *gsp > min_gsp).collect()
}

/// Observations fed to the circling mode decoder:
/// true when flying and turning faster than `min_rate`.
pub(crate) fn circling_emissions(flying: &[bool], rates: &[f64], min_rate: f64) -> Vec<bool> {
    flying
        .iter()
        .zip(rates.iter())
        .map(|(flying, rate)| *flying && rate.abs() > min_rate)
        .collect()
}

/// Flight mode of each fix.
/// Decoded ground stops shorter than `min_landing_time` are not landings,
/// unless they last until the end of the log.
pub(crate) fn detect_flight(rawtimes: &[f64], gsp: &[f64], min_gsp: f64, min_landing_time: f64) -> Vec<bool> {
    let decoder = ViterbiDecoder::new(&FLYING_MODEL);
    let decoded = decoder.decode(&flying_emissions(gsp, min_gsp));
    filter_short_landings(rawtimes, &decoded, min_landing_time)
}

fn filter_short_landings(rawtimes: &[f64], decoded: &[bool], min_landing_time: f64) -> Vec<bool> {
    let mut flying = Vec::with_capacity(decoded.len());

    // state of the ongoing ground stretch
    let mut landed = true;
    let mut short_stop = false;

    for (i, decoded_flying) in decoded.iter().enumerate() {
        if *decoded_flying {
            flying.push(true);
            landed = false;
            short_stop = false;
        } else if landed {
            flying.push(false);
        } else if short_stop {
            flying.push(true);
        } else {
            let next_flying = (i + 1..decoded.len()).find(|j| decoded[*j]);
            short_stop = matches!(
                next_flying,
                Some(j) if rawtimes[j] - rawtimes[i] < min_landing_time
            );
            landed = !short_stop;
            flying.push(short_stop);
        }
    }

    flying
}

/// Takeoff and landing positions.
///
/// ## Output
/// - None if the aircraft never flies
/// - (takeoff, landing): takeoff is the first fix in flight; landing is the
/// first fix on the ground that follows a flight, or the last fix when
/// the log ends in flight.
pub(crate) fn takeoff_landing(flying: &[bool], pick: FlightPick) -> Option<(usize, usize)> {
    let takeoff = flying.iter().position(|flying| *flying)?;

    let mut landing = None;
    for i in takeoff + 1..flying.len() {
        if flying[i - 1] && !flying[i] {
            landing = Some(i);
            if pick == FlightPick::First {
                break;
            }
        }
    }

    let ends_in_flight = flying.last().copied().unwrap_or_default();

    match (landing, pick) {
        (Some(landing), FlightPick::First) => Some((takeoff, landing)),
        (Some(landing), FlightPick::Concat) if !ends_in_flight => Some((takeoff, landing)),
        _ => Some((takeoff, flying.len() - 1)),
    }
}

/// Circling mode of each fix.
pub(crate) fn detect_circling(flying: &[bool], rates: &[f64], min_rate: f64) -> Vec<bool> {
    let decoder = ViterbiDecoder::new(&CIRCLING_MODEL);
    decoder.decode(&circling_emissions(flying, rates, min_rate))
}
