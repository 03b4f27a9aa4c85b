// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Business-day costing of leave events.
//!
//! An event costs one day for every weekday in its range that is not a bank
//! holiday. A flagged start or end day costs half. A single-day event costs
//! half if either flag is set; the flags do not add up.

use crate::accrual_period::AccrualPeriod;
use crate::types::{BankHoliday, DayCount, Event};
use std::collections::HashSet;
use time::{Date, Weekday};

/// Returns whether `date` is a Saturday or Sunday.
#[must_use]
pub fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Returns whether `event` is charged at half cost on `date`.
///
/// Only the event's own start and end dates can be half days, whatever
/// range the event is later clipped to.
#[must_use]
pub fn is_half_day_on(event: &Event, date: Date) -> bool {
    if event.is_single_day() {
        return date == event.start_date && (event.start_half_day || event.end_half_day);
    }
    (date == event.start_date && event.start_half_day)
        || (date == event.end_date && event.end_half_day)
}

/// The set of bank-holiday dates used to cost events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: HashSet<Date>,
}

impl HolidayCalendar {
    /// Builds a calendar from supplier records. Duplicate dates collapse.
    #[must_use]
    pub fn from_bank_holidays(bank_holidays: &[BankHoliday]) -> Self {
        Self {
            dates: bank_holidays.iter().map(|h| h.date).collect(),
        }
    }

    /// Returns whether `date` is a bank holiday.
    #[must_use]
    pub fn is_bank_holiday(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }

    /// Returns whether `date` is a working day.
    #[must_use]
    pub fn is_business_day(&self, date: Date) -> bool {
        !is_weekend(date) && !self.is_bank_holiday(date)
    }

    /// Returns the cost of the whole event.
    #[must_use]
    pub fn event_cost(&self, event: &Event) -> DayCount {
        self.cost_between(event, event.start_date, event.end_date)
    }

    /// Returns the cost of the part of the event inside `period`.
    #[must_use]
    pub fn event_cost_within(&self, event: &Event, period: &AccrualPeriod) -> DayCount {
        if period.start() >= period.end() {
            return DayCount::ZERO;
        }
        let first: Date = event.start_date.max(period.start());
        let last: Date = event.end_date.min(period.last_day());
        self.cost_between(event, first, last)
    }

    fn cost_between(&self, event: &Event, first: Date, last: Date) -> DayCount {
        let mut total: DayCount = DayCount::ZERO;
        let mut cursor: Option<Date> = Some(first);

        while let Some(day) = cursor {
            if day > last {
                break;
            }
            total += self.day_cost(event, day);
            cursor = day.next_day();
        }

        total
    }

    fn day_cost(&self, event: &Event, date: Date) -> DayCount {
        if !self.is_business_day(date) {
            DayCount::ZERO
        } else if is_half_day_on(event, date) {
            DayCount::HALF
        } else {
            DayCount::ONE
        }
    }
}

/// Returns the allowance an event consumes, ignoring accrual periods.
///
/// # Arguments
///
/// * `event` - The event to cost
/// * `bank_holidays` - Public holidays that cost nothing
#[must_use]
pub fn business_days_in_event(event: &Event, bank_holidays: &[BankHoliday]) -> DayCount {
    HolidayCalendar::from_bank_holidays(bank_holidays).event_cost(event)
}

/// Returns the allowance an event consumes inside one accrual period.
///
/// The event is clipped to `[period.start, period.end)`. A half-day flag
/// only discounts its own boundary date; when clipping removes that date
/// the discount is gone rather than moved to the new first or last day.
///
/// # Arguments
///
/// * `event` - The event to cost
/// * `period` - The accrual period to clip to
/// * `bank_holidays` - Public holidays that cost nothing
#[must_use]
pub fn business_days_in_event_within_period(
    event: &Event,
    period: &AccrualPeriod,
    bank_holidays: &[BankHoliday],
) -> DayCount {
    HolidayCalendar::from_bank_holidays(bank_holidays).event_cost_within(event, period)
}
