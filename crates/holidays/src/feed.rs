// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::HolidayError;
use leavelink_domain::{BankHoliday, parse_iso_date};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct FeedDivision {
    events: Vec<FeedEvent>,
}

#[derive(Debug, Deserialize)]
struct FeedEvent {
    title: String,
    date: String,
    #[serde(default)]
    notes: Option<String>,
}

/// Parses a gov.uk style bank holiday feed and returns one division's
/// holidays ordered by date.
///
/// Empty notes are dropped.
///
/// # Errors
///
/// Returns an error if:
/// - The body is not valid feed JSON
/// - The division is missing
/// - A date is not a valid ISO calendar date
pub fn parse_feed(json: &str, division: &str) -> Result<Vec<BankHoliday>, HolidayError> {
    let mut divisions: HashMap<String, FeedDivision> = serde_json::from_str(json)?;
    let feed: FeedDivision = divisions
        .remove(division)
        .ok_or_else(|| HolidayError::DivisionNotFound(division.to_string()))?;

    let mut holidays: Vec<BankHoliday> = feed
        .events
        .into_iter()
        .map(|e| {
            let date = parse_iso_date(&e.date).map_err(|err| HolidayError::InvalidDate {
                date: e.date.clone(),
                error: err.to_string(),
            })?;
            Ok(BankHoliday {
                title: e.title,
                date,
                notes: e.notes.filter(|n| !n.trim().is_empty()),
            })
        })
        .collect::<Result<_, HolidayError>>()?;
    holidays.sort_by_key(|h| h.date);

    Ok(holidays)
}
