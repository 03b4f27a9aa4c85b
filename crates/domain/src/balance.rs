// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave balance calculation.
//!
//! This module provides read-only aggregation of leave events against a
//! profile's allowances to compute remaining balances for the current and
//! next accrual periods.

use crate::accrual_period::{AccrualPeriod, resolve_period};
use crate::business_days::HolidayCalendar;
use crate::error::DomainError;
use crate::types::{
    BankHoliday, DayCount, Event, EventId, EventType, Profile, ResetDate, UserId,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Balance of a single leave type for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The leave type.
    pub event_type: EventType,
    /// Days granted per period.
    pub allowance: DayCount,
    /// The period containing the reference date.
    pub period: AccrualPeriod,
    /// Days consumed inside `period`.
    pub used: DayCount,
    /// Days left in `period`, floored at zero.
    pub balance: DayCount,
    /// The period after `period`.
    pub next_period: AccrualPeriod,
    /// Days already booked inside `next_period`.
    pub next_period_used: DayCount,
    /// Days left in `next_period`, floored at zero.
    pub next_period_balance: DayCount,
    /// Whether any booking reaches into `next_period`, so a preview of
    /// its balance is worth showing.
    pub show_next_period: bool,
}

/// Result of balance calculation for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResult {
    /// The profile the balances belong to.
    pub user_id: UserId,
    /// Holiday balance.
    pub holiday: LeaveBalance,
    /// Remote-work balance.
    pub remote_work: LeaveBalance,
}

impl BalanceResult {
    /// Returns the balance of the given leave type.
    #[must_use]
    pub const fn for_type(&self, event_type: EventType) -> &LeaveBalance {
        match event_type {
            EventType::Holiday => &self.holiday,
            EventType::RemoteWork => &self.remote_work,
        }
    }
}

/// Calculates a profile's current and next-period balances.
///
/// Only events that include the profile are counted. Each leave type uses
/// its own reset date. Over-booking is not an error: balances floor at zero.
///
/// # Arguments
///
/// * `profile` - The profile to report on
/// * `events` - All known events; others' events are ignored
/// * `bank_holidays` - Public holidays that cost nothing
/// * `today` - The reference date selecting the current period
///
/// # Errors
///
/// Returns an error if a period falls outside the supported calendar range.
pub fn calculate_balance(
    profile: &Profile,
    events: &[Event],
    bank_holidays: &[BankHoliday],
    today: Date,
) -> Result<BalanceResult, DomainError> {
    let calendar: HolidayCalendar = HolidayCalendar::from_bank_holidays(bank_holidays);

    Ok(BalanceResult {
        user_id: profile.id.clone(),
        holiday: leave_balance(profile, events, &calendar, EventType::Holiday, today)?,
        remote_work: leave_balance(profile, events, &calendar, EventType::RemoteWork, today)?,
    })
}

/// Calculates balances relative to today's date (UTC).
///
/// # Errors
///
/// See [`calculate_balance`].
pub fn calculate_current_balance(
    profile: &Profile,
    events: &[Event],
    bank_holidays: &[BankHoliday],
) -> Result<BalanceResult, DomainError> {
    calculate_balance(
        profile,
        events,
        bank_holidays,
        OffsetDateTime::now_utc().date(),
    )
}

/// Checks that booking `candidate` leaves no period overdrawn for `profile`.
///
/// The candidate is costed inside every accrual period of its leave type
/// that it touches, from the one containing its start date to the one
/// containing its end date, and added to what the profile already uses
/// there. An existing event with the candidate's id is ignored, so an edit
/// is not counted twice.
///
/// # Arguments
///
/// * `profile` - The participant whose allowance is checked
/// * `events` - All known events
/// * `candidate` - The event being created or updated
/// * `bank_holidays` - Public holidays that cost nothing
///
/// # Errors
///
/// Returns `DomainError::InsufficientAllowance` if the candidate costs more
/// than remains in any period it touches, or
/// `DomainError::DateArithmeticOverflow` if a period cannot be resolved.
pub fn check_allowance(
    profile: &Profile,
    events: &[Event],
    candidate: &Event,
    bank_holidays: &[BankHoliday],
) -> Result<(), DomainError> {
    let calendar: HolidayCalendar = HolidayCalendar::from_bank_holidays(bank_holidays);
    let event_type: EventType = candidate.event_type;
    let allowance: DayCount = profile.allowance(event_type);

    let reset: ResetDate = profile.reset_date(event_type);
    let mut year_offset: i32 = 0;

    loop {
        let period: AccrualPeriod = resolve_period(reset, year_offset, candidate.start_date)?;
        if period.start() > candidate.end_date {
            break;
        }
        year_offset += 1;

        let requested: DayCount = calendar.event_cost_within(candidate, &period);
        if requested.is_zero() {
            continue;
        }

        let used: DayCount = used_in_period(
            profile,
            events,
            &calendar,
            event_type,
            &period,
            Some(&candidate.id),
        );
        let available: DayCount = allowance.saturating_sub(used);

        if requested > available {
            return Err(DomainError::InsufficientAllowance {
                user_id: profile.id.to_string(),
                event_type,
                requested,
                available,
            });
        }
    }

    Ok(())
}

fn leave_balance(
    profile: &Profile,
    events: &[Event],
    calendar: &HolidayCalendar,
    event_type: EventType,
    today: Date,
) -> Result<LeaveBalance, DomainError> {
    let reset = profile.reset_date(event_type);
    let period: AccrualPeriod = resolve_period(reset, 0, today)?;
    let next_period: AccrualPeriod = resolve_period(reset, 1, today)?;
    let allowance: DayCount = profile.allowance(event_type);

    let used: DayCount = used_in_period(profile, events, calendar, event_type, &period, None);
    let next_period_used: DayCount =
        used_in_period(profile, events, calendar, event_type, &next_period, None);

    Ok(LeaveBalance {
        event_type,
        allowance,
        period,
        used,
        balance: allowance.saturating_sub(used),
        next_period,
        next_period_used,
        next_period_balance: allowance.saturating_sub(next_period_used),
        show_next_period: !next_period_used.is_zero(),
    })
}

fn used_in_period(
    profile: &Profile,
    events: &[Event],
    calendar: &HolidayCalendar,
    event_type: EventType,
    period: &AccrualPeriod,
    exclude: Option<&EventId>,
) -> DayCount {
    events
        .iter()
        .filter(|e| e.event_type == event_type && e.includes_user(&profile.id))
        .filter(|e| exclude != Some(&e.id))
        .map(|e| calendar.event_cost_within(e, period))
        .sum()
}
