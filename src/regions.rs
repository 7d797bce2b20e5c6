//! # Region Extractor
//!
//! Derives, from one piece's ordered harmonic events, the contiguous key
//! regions, the phrase-boundary positions and the cadence records carried
//! by the events.
//!
//! ## Rules
//! - Event positions are `mn + onset / timesig`, computed exactly and memoized
//!   per event.
//! - Positions must be strictly increasing in input order.
//! - A region spans from its first event up to the start of the next region;
//!   the final region stops at the end of the piece.
//!
//! ## Example
//! ```rust
//! use modplan::{extract_key_regions, Category, Fraction, GroupingAxis, HarmonicEvent};
//!
//! let events = vec![
//!     HarmonicEvent::new(1, "0", "4/4", "I", Category::Local),
//!     HarmonicEvent::new(3, "1/2", "4/4", "V", Category::Applied),
//! ];
//! let regions = extract_key_regions(&events, GroupingAxis::Numeral, Fraction::from_integer(5))?;
//! assert_eq!(regions.len(), 2);
//! assert_eq!(regions[0].end, regions[1].start);
//! # Ok::<(), modplan::ChartError>(())
//! ```

use crate::error::ChartError;
use crate::fraction::Fraction;
use crate::model::{CadenceRecord, GroupingAxis, HarmonicEvent, KeyRegion, Scalar};

fn data_error(measure: i64, message: String) -> ChartError {
    ChartError::DataFormat { measure, message }
}

/// Fractional measure position of an event.
///
/// The first successful call caches the result on the event, so later calls
/// return the identical value without re-parsing.
pub fn derive_fractional_position(event: &HarmonicEvent) -> Result<Fraction, ChartError> {
    if let Some(position) = event.position.get() {
        return Ok(*position);
    }

    let timesig = event.timesig.to_fraction().map_err(|e| {
        data_error(
            event.mn,
            format!("Invalid time signature '{}': {}", event.timesig, e),
        )
    })?;
    if !timesig.is_positive() {
        return Err(data_error(
            event.mn,
            format!("Time signature must be positive, got '{}'", event.timesig),
        ));
    }

    let onset = event
        .onset
        .to_fraction()
        .map_err(|e| data_error(event.mn, format!("Invalid onset '{}': {}", event.onset, e)))?;
    if onset.is_negative() || onset >= timesig {
        return Err(data_error(
            event.mn,
            format!("Onset {} lies outside a {} measure", onset, timesig),
        ));
    }

    let position = onset
        .checked_div(timesig)
        .and_then(|offset| Fraction::from_integer(event.mn).checked_add(offset))
        .ok_or_else(|| {
            data_error(
                event.mn,
                format!("Position of onset {} in {} overflows", onset, timesig),
            )
        })?;
    Ok(*event.position.get_or_init(|| position))
}

/// Positions of all events, verified to be strictly increasing.
fn ordered_positions(events: &[HarmonicEvent]) -> Result<Vec<Fraction>, ChartError> {
    let mut positions: Vec<Fraction> = Vec::with_capacity(events.len());
    for event in events {
        let position = derive_fractional_position(event)?;
        if let Some(previous) = positions.last() {
            if position <= *previous {
                return Err(data_error(
                    event.mn,
                    format!(
                        "Events out of order: position {} does not follow {}",
                        position, previous
                    ),
                ));
            }
        }
        positions.push(position);
    }
    Ok(positions)
}

/// Positions of every event flagged as a phrase end, in score order.
pub fn extract_phrase_boundaries(events: &[HarmonicEvent]) -> Result<Vec<Fraction>, ChartError> {
    let positions = ordered_positions(events)?;
    Ok(events
        .iter()
        .zip(positions)
        .filter(|(event, _)| event.is_phrase_end())
        .map(|(_, position)| position)
        .collect())
}

/// Group consecutive events with the same key and category into regions.
///
/// `piece_end` closes the final region and must lie after the last event.
pub fn extract_key_regions(
    events: &[HarmonicEvent],
    axis: GroupingAxis,
    piece_end: Fraction,
) -> Result<Vec<KeyRegion>, ChartError> {
    let positions = ordered_positions(events)?;
    let mut regions: Vec<KeyRegion> = Vec::new();

    for (event, position) in events.iter().zip(positions.iter()) {
        if let Some(current) = regions.last_mut() {
            if current.key == event.key && current.category == event.category {
                continue;
            }
            current.end = *position;
        }
        regions.push(KeyRegion {
            start: *position,
            end: *position,
            key: event.key.clone(),
            category: event.category,
            axis_value: event.axis_value(axis),
        });
    }

    if let (Some(last_region), Some(last_position), Some(last_event)) =
        (regions.last_mut(), positions.last(), events.last())
    {
        if piece_end <= *last_position {
            return Err(data_error(
                last_event.mn,
                format!(
                    "Piece ends at {} but the last event sits at {}",
                    piece_end, last_position
                ),
            ));
        }
        last_region.end = piece_end;
    }

    Ok(regions)
}

/// Beat of an event inside its measure, counted in units of the time
/// signature's denominator and starting at 1.
fn event_beat(event: &HarmonicEvent) -> Result<String, ChartError> {
    if let Some(beat) = &event.beat {
        return Ok(beat.to_string());
    }
    let unit = match &event.timesig {
        Scalar::Text(s) => s
            .split_once('/')
            .and_then(|(_, d)| d.trim().parse::<i64>().ok())
            .unwrap_or(1),
        _ => 1,
    };
    let onset = event
        .onset
        .to_fraction()
        .map_err(|e| data_error(event.mn, format!("Invalid onset '{}': {}", event.onset, e)))?;
    onset
        .checked_mul(Fraction::from_integer(unit))
        .and_then(|beat| beat.checked_add(Fraction::from_integer(1)))
        .map(|beat| beat.to_string())
        .ok_or_else(|| data_error(event.mn, format!("Beat of onset {} overflows", onset)))
}

/// Cadence records for every event that carries a cadence code.
pub fn extract_cadences(events: &[HarmonicEvent]) -> Result<Vec<CadenceRecord>, ChartError> {
    let mut records = Vec::new();
    for event in events {
        let Some(code) = &event.cadence else {
            continue;
        };
        let position = derive_fractional_position(event)?;
        records.push(CadenceRecord {
            position: position.to_f64(),
            code: code.trim().to_string(),
            key: Some(event.key.clone()),
            beat: event_beat(event)?,
        });
    }
    Ok(records)
}
