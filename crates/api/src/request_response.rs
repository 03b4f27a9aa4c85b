// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use leavelink_domain::{AccrualPeriod, BankHoliday, DayCount, Event};
use serde::{Deserialize, Serialize};

/// API request to create the caller's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    /// The name shown in the calendar.
    pub display_name: String,
}

/// API request to replace the caller's settings.
///
/// Allowances arrive as plain numbers and are validated into day counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    /// The name shown in the calendar.
    pub display_name: String,
    /// Holiday days per period (whole or half days).
    pub holiday_allowance_days: f64,
    /// Remote-work days per period (whole or half days).
    pub remote_work_days: f64,
    /// Day of month the holiday period starts.
    pub holiday_reset_day: u8,
    /// Month the holiday period starts.
    pub holiday_reset_month: u8,
    /// Day of month the remote-work period starts.
    pub remote_work_reset_day: u8,
    /// Month the remote-work period starts.
    pub remote_work_reset_month: u8,
}

/// API request to link the caller with a partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPartnerRequest {
    /// The partner's profile id.
    pub partner_id: String,
}

/// A profile as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    /// The profile id.
    pub id: String,
    /// The name shown in the calendar.
    pub display_name: String,
    /// The linked partner, if any.
    pub partner_id: Option<String>,
    /// Holiday days per period.
    pub holiday_allowance_days: DayCount,
    /// Remote-work days per period.
    pub remote_work_days: DayCount,
    /// Day of month the holiday period starts.
    pub holiday_reset_day: u8,
    /// Month the holiday period starts.
    pub holiday_reset_month: u8,
    /// Day of month the remote-work period starts.
    pub remote_work_reset_day: u8,
    /// Month the remote-work period starts.
    pub remote_work_reset_month: u8,
    /// Legend colour in the calendar.
    pub color: String,
}

/// API response for a profile change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// The profile after the change.
    pub profile: ProfileInfo,
    /// A success message.
    pub message: String,
}

/// One member's balances in the flat shape the calendar consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceInfo {
    /// The member's profile id.
    pub user_id: String,
    /// The member's display name.
    pub display_name: String,
    /// Legend colour in the calendar.
    pub color: String,
    /// Holiday days per period.
    pub holiday_allowance: DayCount,
    /// Holiday days used in the current period.
    pub holiday_used: DayCount,
    /// Holiday days left in the current period.
    pub holiday_balance: DayCount,
    /// The current holiday period.
    pub holiday_period: AccrualPeriod,
    /// Holiday days booked in the next period.
    pub next_period_holiday_used: DayCount,
    /// Holiday days left in the next period.
    pub next_period_holiday_balance: DayCount,
    /// Whether the next holiday period is worth showing.
    pub show_next_period_holiday: bool,
    /// Remote-work days per period.
    pub wfa_allowance: DayCount,
    /// Remote-work days used in the current period.
    pub wfa_used: DayCount,
    /// Remote-work days left in the current period.
    pub wfa_balance: DayCount,
    /// The current remote-work period.
    pub wfa_period: AccrualPeriod,
    /// Remote-work days booked in the next period.
    pub next_period_wfa_used: DayCount,
    /// Remote-work days left in the next period.
    pub next_period_wfa_balance: DayCount,
    /// Whether the next remote-work period is worth showing.
    pub show_next_period_wfa: bool,
}

/// API response listing balances for a household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdBalancesResponse {
    /// One entry per member, ordered by display name.
    pub balances: Vec<BalanceInfo>,
}

/// API request to create or update an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequest {
    /// The people taking this leave.
    pub user_ids: Vec<String>,
    /// `holiday` or `remote_work`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Optional free-text label.
    #[serde(default)]
    pub name: Option<String>,
    /// First day, `yyyy-MM-dd`.
    pub start_date: String,
    /// Last day, `yyyy-MM-dd`.
    pub end_date: String,
    /// Whether only the afternoon of the first day is taken.
    #[serde(default)]
    pub start_half_day: bool,
    /// Whether only the morning of the last day is taken.
    #[serde(default)]
    pub end_half_day: bool,
}

/// API response for a created or updated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    /// The stored event.
    pub event: Event,
    /// Business days the event costs.
    pub business_days: DayCount,
    /// A success message.
    pub message: String,
}

/// API response for a deleted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    /// The removed event's id.
    pub event_id: String,
    /// A success message.
    pub message: String,
}

/// API response listing a household's events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsResponse {
    /// Events ordered by start date.
    pub events: Vec<Event>,
}

/// API request to price a date range before booking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCostRequest {
    /// First day, `yyyy-MM-dd`.
    pub start_date: String,
    /// Last day, `yyyy-MM-dd`.
    pub end_date: String,
    /// Whether only the afternoon of the first day is taken.
    #[serde(default)]
    pub start_half_day: bool,
    /// Whether only the morning of the last day is taken.
    #[serde(default)]
    pub end_half_day: bool,
}

/// API response with the price of a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCostResponse {
    /// Business days the range costs.
    pub business_days: DayCount,
    /// Bank holidays inside the range, which cost nothing.
    pub bank_holidays: Vec<BankHoliday>,
}

/// API request to resolve an accrual period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Reset day of month.
    pub reset_day: u8,
    /// Reset month.
    pub reset_month: u8,
    /// Whole years to shift the containing period by.
    #[serde(default)]
    pub year_offset: i32,
    /// Reference date, `yyyy-MM-dd`; today when absent.
    #[serde(default)]
    pub reference_date: Option<String>,
}

/// API response with a resolved accrual period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResponse {
    /// The period, `[start, end)`.
    pub period: AccrualPeriod,
    /// The last day inside the period, `yyyy-MM-dd`.
    pub last_day: String,
}

/// API request listing bank holidays in a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHolidaysRequest {
    /// First day, `yyyy-MM-dd`.
    pub start: String,
    /// Last day, `yyyy-MM-dd`.
    pub end: String,
}

/// API response listing bank holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHolidaysResponse {
    /// Holidays in the range, ordered by date.
    pub bank_holidays: Vec<BankHoliday>,
}
