//! Field parsing utilities for feed rows
//!
//! This module provides helper functions for converting raw field text into
//! typed values. Every failure carries the line number and column name so a
//! rejected batch can be traced back to the offending row.

use crate::app::models::StationId;
use crate::constants::{
    BOOL_FALSE_VALUES, BOOL_TRUE_VALUES, COMMUNICATION_DATE_WIDTHS,
    COMMUNICATION_DATETIME_FORMAT, COMMUNICATION_TIME_WIDTHS,
};
use crate::{Error, Result};
use chrono::{NaiveDateTime, Timelike};

/// Parse a base-10 station identifier
pub fn parse_station_id(value: &str, line: u64, field: &'static str) -> Result<StationId> {
    value
        .parse::<i64>()
        .map(StationId)
        .map_err(|e| Error::malformed_field(line, field, value, format!("not an integer: {}", e)))
}

/// Parse a decimal-point price
///
/// Comma decimals ("1,739") are rejected rather than guessed at.
pub fn parse_price(value: &str, line: u64, field: &'static str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|e| Error::malformed_field(line, field, value, format!("not a number: {}", e)))
}

/// Parse a boolean using the `1/t/true` and `0/f/false` lexicon
pub fn parse_bool(value: &str, line: u64, field: &'static str) -> Result<bool> {
    if BOOL_TRUE_VALUES.contains(&value) {
        Ok(true)
    } else if BOOL_FALSE_VALUES.contains(&value) {
        Ok(false)
    } else {
        Err(Error::malformed_field(line, field, value, "not a boolean"))
    }
}

/// Parse a `D/M/YYYY HH:MM:SS` communication timestamp
///
/// The layout is checked before chrono sees the value: chrono on its own
/// accepts two-digit years, signed years, unpadded minutes and runs of
/// whitespace. Leap seconds are rejected.
pub fn parse_communication_datetime(
    value: &str,
    line: u64,
    field: &'static str,
) -> Result<NaiveDateTime> {
    let reject = |reason: String| Error::malformed_field(line, field, value, reason);

    if !matches_communication_layout(value) {
        return Err(reject("expected 'D/M/YYYY HH:MM:SS'".to_string()));
    }

    let datetime = NaiveDateTime::parse_from_str(value, COMMUNICATION_DATETIME_FORMAT)
        .map_err(|e| reject(format!("expected 'D/M/YYYY HH:MM:SS': {}", e)))?;

    if datetime.nanosecond() >= 1_000_000_000 {
        return Err(reject("leap seconds are not accepted".to_string()));
    }

    Ok(datetime)
}

/// Whether `value` is a date and a time separated by exactly one space, with
/// every component made of ASCII digits of an allowed width
fn matches_communication_layout(value: &str) -> bool {
    let Some((date, time)) = value.split_once(' ') else {
        return false;
    };

    matches_components(date, '/', &COMMUNICATION_DATE_WIDTHS)
        && matches_components(time, ':', &COMMUNICATION_TIME_WIDTHS)
}

fn matches_components(text: &str, separator: char, widths: &[(usize, usize); 3]) -> bool {
    let parts: Vec<&str> = text.split(separator).collect();
    parts.len() == widths.len()
        && parts.iter().zip(widths).all(|(part, &(min, max))| {
            (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        })
}
