// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accrual period resolution.
//!
//! An accrual period is the one-year window over which an allowance is
//! consumed. It starts on the user's reset date and ends on the next one.
//! Periods are half-open: `[start, end)`.

use crate::error::DomainError;
use crate::types::{ResetDate, iso_date};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A one-year allowance window, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccrualPeriod {
    /// First day of the period (inclusive).
    #[serde(with = "iso_date")]
    start: Date,
    /// First day of the following period (exclusive).
    #[serde(with = "iso_date")]
    end: Date,
}

impl AccrualPeriod {
    /// Returns the first day of the period (inclusive).
    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Returns the first day after the period (exclusive).
    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns the last day inside the period.
    #[must_use]
    pub fn last_day(&self) -> Date {
        self.end.previous_day().unwrap_or(self.start)
    }

    /// Returns whether `date` falls inside the period.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }
}

/// Resolves the accrual period containing `reference`, shifted by
/// `year_offset` whole years.
///
/// The containing period starts on the most recent reset date on or before
/// `reference`. A reference date equal to the reset date starts a new
/// period. Offset `1` gives the following period, `-1` the previous one.
///
/// Adjacent periods are contiguous: the end of one is the start of the next.
///
/// # Arguments
///
/// * `reset` - The reset day and month for the leave type
/// * `year_offset` - Whole years to shift the containing period by
/// * `reference` - The date whose period is resolved
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the resolved period
/// falls outside the supported calendar range.
pub fn resolve_period(
    reset: ResetDate,
    year_offset: i32,
    reference: Date,
) -> Result<AccrualPeriod, DomainError> {
    let candidate: Date = reset.in_year(reference.year())?;
    let base_year: i32 = if reference < candidate {
        reference.year() - 1
    } else {
        reference.year()
    };

    let start_year: i32 = base_year
        .checked_add(year_offset)
        .ok_or_else(|| overflow(reset, year_offset))?;
    let end_year: i32 = start_year
        .checked_add(1)
        .ok_or_else(|| overflow(reset, year_offset))?;

    Ok(AccrualPeriod {
        start: reset.in_year(start_year)?,
        end: reset.in_year(end_year)?,
    })
}

/// Resolves a period relative to today's date (UTC).
///
/// # Errors
///
/// See [`resolve_period`].
pub fn resolve_current_period(
    reset: ResetDate,
    year_offset: i32,
) -> Result<AccrualPeriod, DomainError> {
    resolve_period(reset, year_offset, OffsetDateTime::now_utc().date())
}

fn overflow(reset: ResetDate, year_offset: i32) -> DomainError {
    DomainError::DateArithmeticOverflow {
        operation: format!("shifting the period for reset date {reset} by {year_offset} years"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn reset(day: u8, month: u8) -> ResetDate {
        ResetDate::new(day, month).unwrap()
    }

    #[test]
    fn test_reference_after_reset_uses_same_year() {
        let period: AccrualPeriod = resolve_period(reset(1, 4), 0, date!(2026 - 06 - 15)).unwrap();

        assert_eq!(period.start(), date!(2026 - 04 - 01));
        assert_eq!(period.end(), date!(2027 - 04 - 01));
    }

    #[test]
    fn test_reference_before_reset_uses_previous_year() {
        let period: AccrualPeriod = resolve_period(reset(1, 4), 0, date!(2026 - 03 - 31)).unwrap();

        assert_eq!(period.start(), date!(2025 - 04 - 01));
        assert_eq!(period.end(), date!(2026 - 04 - 01));
    }

    #[test]
    fn test_reference_on_reset_date_starts_new_period() {
        let period: AccrualPeriod = resolve_period(reset(6, 4), 0, date!(2026 - 04 - 06)).unwrap();

        assert_eq!(period.start(), date!(2026 - 04 - 06));
        assert_eq!(period.end(), date!(2027 - 04 - 06));
    }

    #[test]
    fn test_calendar_year_period() {
        let period: AccrualPeriod = resolve_period(reset(1, 1), 0, date!(2026 - 10 - 16)).unwrap();

        assert_eq!(period.start(), date!(2026 - 01 - 01));
        assert_eq!(period.end(), date!(2027 - 01 - 01));
        assert_eq!(period.last_day(), date!(2026 - 12 - 31));
    }

    #[test]
    fn test_next_period_offset() {
        let period: AccrualPeriod = resolve_period(reset(1, 9), 1, date!(2026 - 10 - 16)).unwrap();

        assert_eq!(period.start(), date!(2027 - 09 - 01));
        assert_eq!(period.end(), date!(2028 - 09 - 01));
    }

    #[test]
    fn test_negative_offset() {
        let period: AccrualPeriod = resolve_period(reset(1, 9), -1, date!(2026 - 10 - 16)).unwrap();

        assert_eq!(period.start(), date!(2025 - 09 - 01));
        assert_eq!(period.end(), date!(2026 - 09 - 01));
    }

    #[test]
    fn test_adjacent_periods_are_contiguous() {
        let references: [Date; 5] = [
            date!(2024 - 02 - 29),
            date!(2025 - 01 - 01),
            date!(2025 - 12 - 31),
            date!(2026 - 03 - 01),
            date!(2026 - 10 - 16),
        ];
        let resets: [ResetDate; 5] = [
            reset(1, 1),
            reset(29, 2),
            reset(31, 2),
            reset(31, 4),
            reset(15, 12),
        ];

        for reference in references {
            for r in resets {
                let current: AccrualPeriod = resolve_period(r, 0, reference).unwrap();
                let next: AccrualPeriod = resolve_period(r, 1, reference).unwrap();
                assert_eq!(current.end(), next.start(), "reset {r} reference {reference}");
                assert!(current.contains(reference), "reset {r} reference {reference}");
            }
        }
    }

    #[test]
    fn test_day_31_clamps_to_end_of_february() {
        let leap: AccrualPeriod = resolve_period(reset(31, 2), 0, date!(2024 - 06 - 01)).unwrap();
        assert_eq!(leap.start(), date!(2024 - 02 - 29));
        assert_eq!(leap.end(), date!(2025 - 02 - 28));

        let common: AccrualPeriod =
            resolve_period(reset(31, 2), 0, date!(2025 - 06 - 01)).unwrap();
        assert_eq!(common.start(), date!(2025 - 02 - 28));
        assert_eq!(common.end(), date!(2026 - 02 - 28));
    }

    #[test]
    fn test_day_31_clamps_in_thirty_day_month() {
        let period: AccrualPeriod = resolve_period(reset(31, 4), 0, date!(2026 - 04 - 30)).unwrap();

        assert_eq!(period.start(), date!(2026 - 04 - 30));
        assert_eq!(period.end(), date!(2027 - 04 - 30));
    }

    #[test]
    fn test_contains_is_half_open() {
        let period: AccrualPeriod = resolve_period(reset(1, 1), 0, date!(2026 - 05 - 01)).unwrap();

        assert!(period.contains(date!(2026 - 01 - 01)));
        assert!(period.contains(date!(2026 - 12 - 31)));
        assert!(!period.contains(date!(2027 - 01 - 01)));
        assert!(!period.contains(date!(2025 - 12 - 31)));
    }

    #[test]
    fn test_overflow_is_reported() {
        let result: Result<AccrualPeriod, DomainError> =
            resolve_period(reset(1, 1), 1, date!(9999 - 06 - 01));

        assert!(matches!(
            result,
            Err(DomainError::DateArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_period_serializes_iso_dates() {
        let period: AccrualPeriod = resolve_period(reset(6, 4), 0, date!(2026 - 05 - 01)).unwrap();

        let json: serde_json::Value = serde_json::to_value(period).unwrap();
        assert_eq!(json["start"], "2026-04-06");
        assert_eq!(json["end"], "2027-04-06");
    }

    #[test]
    fn test_current_period_contains_today() {
        let today: Date = OffsetDateTime::now_utc().date();
        let period: AccrualPeriod = resolve_current_period(reset(1, 1), 0).unwrap();

        assert!(period.contains(today));
        assert_eq!(
            period.start(),
            Date::from_calendar_date(today.year(), time::Month::January, 1).unwrap()
        );
    }
}
