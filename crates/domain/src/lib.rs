// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod accrual_period;
mod balance;
mod business_days;
mod conflict;
mod error;
mod types;
mod user_color;
mod validation;

#[cfg(test)]
mod tests;

pub use accrual_period::{AccrualPeriod, resolve_current_period, resolve_period};
pub use balance::{
    BalanceResult, LeaveBalance, calculate_balance, calculate_current_balance, check_allowance,
};
pub use business_days::{
    HolidayCalendar, business_days_in_event, business_days_in_event_within_period,
    is_half_day_on, is_weekend,
};
pub use conflict::{
    DayPart, OverlapPolicy, day_part, ensure_no_conflicts, events_conflict, find_conflicts,
};

// Re-export public types
pub use error::DomainError;
pub use types::{
    BankHoliday, DayCount, Event, EventId, EventType, Profile, ResetDate, UserId,
    format_iso_date, parse_iso_date,
};
pub use user_color::{USER_COLORS, user_color, user_color_index};
pub use validation::{
    bank_holidays_in_range, validate_event_dates, validate_event_participants,
    validate_profile_fields,
};
