// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for parsing peak-hour time ranges.

use chrono::NaiveTime;
use thiserror::Error;

/// A string that does not parse as an `HH:MM-HH:MM` range.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("'{0}' is not a valid HH:MM-HH:MM time range")]
pub struct TimeRangeError(pub String);

/// Parse one `HH:MM` component, requiring zero-padded 24-hour form.
///
/// `chrono`'s `%H:%M` accepts single-digit hours, so the shape is checked
/// before handing off to the real parser.
fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    if value.len() != 5 || value.as_bytes()[2] != b':' {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Parse a peak-hour entry like `"07:30-10:00"` into its two endpoints.
///
/// Both endpoints must be zero-padded `HH:MM` on a 24-hour clock. The range
/// is purely syntactic: start and end are not ordered, so overnight windows
/// like `"22:00-02:00"` parse fine.
pub fn parse_time_range(range: &str) -> Result<(NaiveTime, NaiveTime), TimeRangeError> {
    range
        .split_once('-')
        .and_then(|(start, end)| Some((parse_hhmm(start)?, parse_hhmm(end)?)))
        .ok_or_else(|| TimeRangeError(range.to_string()))
}

/// Whether a peak-hour entry is a well-formed `HH:MM-HH:MM` range.
pub fn is_valid_time_range(range: &str) -> bool {
    parse_time_range(range).is_ok()
}
