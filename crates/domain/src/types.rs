// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use time::{Date, Month, OffsetDateTime};

time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");

/// Format used for every calendar date crossing the domain boundary.
const ISO_DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]");

/// Parses an ISO `yyyy-MM-dd` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, ISO_DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a calendar date as ISO `yyyy-MM-dd`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Opaque identifier of a person using the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new `UserId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a leave event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new `EventId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of leave an event consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Paid holiday.
    Holiday,
    /// Working remotely, away from home. Older records call this
    /// `work_from_abroad`.
    #[serde(alias = "work_from_abroad")]
    RemoteWork,
}

impl EventType {
    /// Both leave types, in display order.
    pub const ALL: [Self; 2] = [Self::Holiday, Self::RemoteWork];

    /// Returns the wire representation of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Holiday => "holiday",
            Self::RemoteWork => "remote_work",
        }
    }

    /// Returns the human-readable label of this type.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Holiday => "Holiday",
            Self::RemoteWork => "Remote work",
        }
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "holiday" => Ok(Self::Holiday),
            "remote_work" | "work_from_abroad" => Ok(Self::RemoteWork),
            _ => Err(DomainError::InvalidEventType(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-negative number of days with half-day resolution.
///
/// Stored as a count of half days so that sums and comparisons are exact.
/// Serialized as a JSON number (`2`, `2.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DayCount {
    halves: u32,
}

impl DayCount {
    /// No days.
    pub const ZERO: Self = Self { halves: 0 };
    /// Half a day.
    pub const HALF: Self = Self { halves: 1 };
    /// One whole day.
    pub const ONE: Self = Self { halves: 2 };

    /// Creates a count of whole days.
    #[must_use]
    pub const fn whole_days(days: u32) -> Self {
        Self {
            halves: days.saturating_mul(2),
        }
    }

    /// Creates a count from a number of half days.
    #[must_use]
    pub const fn from_half_days(halves: u32) -> Self {
        Self { halves }
    }

    /// Converts a fractional day value such as `25` or `2.5`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDayCount` if the value is negative,
    /// non-finite, too large, or not a multiple of one half.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::float_cmp
    )]
    pub fn try_from_days(days: f64) -> Result<Self, DomainError> {
        let halves: f64 = days * 2.0;
        if !halves.is_finite()
            || halves < 0.0
            || halves > f64::from(u32::MAX)
            || halves.fract() != 0.0
        {
            return Err(DomainError::InvalidDayCount(format!(
                "{days} is not a non-negative whole or half number of days"
            )));
        }
        Ok(Self {
            halves: halves as u32,
        })
    }

    /// Returns the number of half days.
    #[must_use]
    pub const fn half_days(self) -> u32 {
        self.halves
    }

    /// Returns the value in days.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.halves) / 2.0
    }

    /// Returns whether this count is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.halves == 0
    }

    /// Subtracts, flooring at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            halves: self.halves.saturating_sub(other.halves),
        }
    }

    /// Adds, capping at the largest representable count.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            halves: self.halves.saturating_add(other.halves),
        }
    }
}

impl std::ops::Add for DayCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }
}

impl std::ops::AddAssign for DayCount {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl std::iter::Sum for DayCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl std::fmt::Display for DayCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole: u32 = self.halves / 2;
        if self.halves % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}

impl Serialize for DayCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.halves % 2 == 0 {
            serializer.serialize_u32(self.halves / 2)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for DayCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days: f64 = f64::deserialize(deserializer)?;
        Self::try_from_days(days).map_err(serde::de::Error::custom)
    }
}

/// The day and month on which an allowance resets each year.
///
/// Days that do not exist in the month (31 February, 31 April) resolve to
/// the last day of that month in each year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ResetDateRecord", into = "ResetDateRecord")]
pub struct ResetDate {
    day: u8,
    month: Month,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ResetDateRecord {
    day: u8,
    month: u8,
}

impl TryFrom<ResetDateRecord> for ResetDate {
    type Error = DomainError;

    fn try_from(record: ResetDateRecord) -> Result<Self, Self::Error> {
        Self::new(record.day, record.month)
    }
}

impl From<ResetDate> for ResetDateRecord {
    fn from(reset: ResetDate) -> Self {
        Self {
            day: reset.day,
            month: reset.month_number(),
        }
    }
}

impl ResetDate {
    /// 1 January, the calendar year.
    pub const JANUARY_FIRST: Self = Self {
        day: 1,
        month: Month::January,
    };

    /// Creates a new `ResetDate`.
    ///
    /// # Arguments
    ///
    /// * `day` - Day of month, 1-31
    /// * `month` - Month number, 1-12
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidResetDate` if either value is out of range.
    pub fn new(day: u8, month: u8) -> Result<Self, DomainError> {
        if !(1..=31).contains(&day) {
            return Err(DomainError::InvalidResetDate { day, month });
        }
        let month_value: Month =
            Month::try_from(month).map_err(|_| DomainError::InvalidResetDate { day, month })?;
        Ok(Self {
            day,
            month: month_value,
        })
    }

    /// Returns the configured day of month.
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the configured month.
    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns the configured month as a number (1-12).
    #[must_use]
    pub fn month_number(&self) -> u8 {
        u8::from(self.month)
    }

    /// Returns the reset date within `year`, clamped to the month's last day.
    ///
    /// # Errors
    ///
    /// Returns an error if `year` is outside the supported calendar range.
    pub fn in_year(&self, year: i32) -> Result<Date, DomainError> {
        (1..=self.day)
            .rev()
            .find_map(|day| Date::from_calendar_date(year, self.month, day).ok())
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("resolving reset date {self} in year {year}"),
            })
    }
}

impl std::fmt::Display for ResetDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day, self.month)
    }
}

/// One person's leave configuration.
///
/// Serialized in the flat record shape used by the surrounding application
/// (`holiday_reset_day`, `holiday_reset_month`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProfileRecord", into = "ProfileRecord")]
pub struct Profile {
    /// The profile identifier.
    pub id: UserId,
    /// The name shown in the calendar.
    pub display_name: String,
    /// The linked partner, if any. Linkage is mutual.
    pub partner_id: Option<UserId>,
    /// Holiday days granted per accrual period.
    pub holiday_allowance: DayCount,
    /// Remote-work days granted per accrual period.
    pub remote_work_allowance: DayCount,
    /// When the holiday allowance resets.
    pub holiday_reset: ResetDate,
    /// When the remote-work allowance resets.
    pub remote_work_reset: ResetDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileRecord {
    id: UserId,
    display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    partner_id: Option<UserId>,
    holiday_allowance_days: DayCount,
    remote_work_days: DayCount,
    holiday_reset_day: u8,
    holiday_reset_month: u8,
    remote_work_reset_day: u8,
    remote_work_reset_month: u8,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = DomainError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            display_name: record.display_name,
            partner_id: record.partner_id,
            holiday_allowance: record.holiday_allowance_days,
            remote_work_allowance: record.remote_work_days,
            holiday_reset: ResetDate::new(record.holiday_reset_day, record.holiday_reset_month)?,
            remote_work_reset: ResetDate::new(
                record.remote_work_reset_day,
                record.remote_work_reset_month,
            )?,
        })
    }
}

impl From<Profile> for ProfileRecord {
    fn from(profile: Profile) -> Self {
        Self {
            holiday_reset_day: profile.holiday_reset.day(),
            holiday_reset_month: profile.holiday_reset.month_number(),
            remote_work_reset_day: profile.remote_work_reset.day(),
            remote_work_reset_month: profile.remote_work_reset.month_number(),
            id: profile.id,
            display_name: profile.display_name,
            partner_id: profile.partner_id,
            holiday_allowance_days: profile.holiday_allowance,
            remote_work_days: profile.remote_work_allowance,
        }
    }
}

impl Profile {
    /// Holiday allowance given to newly created profiles.
    pub const DEFAULT_HOLIDAY_ALLOWANCE: DayCount = DayCount::whole_days(25);
    /// Remote-work allowance given to newly created profiles.
    pub const DEFAULT_REMOTE_WORK_ALLOWANCE: DayCount = DayCount::ZERO;

    /// Creates a new unlinked `Profile` with default allowances resetting on
    /// 1 January.
    ///
    /// # Arguments
    ///
    /// * `id` - The profile identifier
    /// * `display_name` - The name shown in the calendar
    #[must_use]
    pub const fn new(id: UserId, display_name: String) -> Self {
        Self {
            id,
            display_name,
            partner_id: None,
            holiday_allowance: Self::DEFAULT_HOLIDAY_ALLOWANCE,
            remote_work_allowance: Self::DEFAULT_REMOTE_WORK_ALLOWANCE,
            holiday_reset: ResetDate::JANUARY_FIRST,
            remote_work_reset: ResetDate::JANUARY_FIRST,
        }
    }

    /// Returns the allowance configured for a leave type.
    #[must_use]
    pub const fn allowance(&self, event_type: EventType) -> DayCount {
        match event_type {
            EventType::Holiday => self.holiday_allowance,
            EventType::RemoteWork => self.remote_work_allowance,
        }
    }

    /// Returns the reset date configured for a leave type.
    #[must_use]
    pub const fn reset_date(&self, event_type: EventType) -> ResetDate {
        match event_type {
            EventType::Holiday => self.holiday_reset,
            EventType::RemoteWork => self.remote_work_reset,
        }
    }

    /// Returns whether `user_id` is this profile or its linked partner.
    #[must_use]
    pub fn is_household_member(&self, user_id: &UserId) -> bool {
        &self.id == user_id || self.partner_id.as_ref() == Some(user_id)
    }
}

/// A span of holiday or remote work for one or two people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The event identifier.
    pub id: EventId,
    /// The people taking this leave (one, or both partners).
    pub user_ids: Vec<UserId>,
    /// The leave type consumed.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Optional free-text label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// First day of leave (inclusive).
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of leave (inclusive).
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// Leave starts at midday on the first day.
    #[serde(default)]
    pub start_half_day: bool,
    /// Leave ends at midday on the last day.
    #[serde(default)]
    pub end_half_day: bool,
    /// Who created the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    /// When the event was created.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl Event {
    /// Creates a new full-day `Event`.
    ///
    /// # Arguments
    ///
    /// * `id` - The event identifier
    /// * `user_ids` - The participants
    /// * `event_type` - The leave type
    /// * `start_date` - First day (inclusive)
    /// * `end_date` - Last day (inclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` is before `start_date`.
    pub fn new(
        id: EventId,
        user_ids: Vec<UserId>,
        event_type: EventType,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self, DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start_date,
                end_date,
            });
        }
        Ok(Self {
            id,
            user_ids,
            event_type,
            name: None,
            start_date,
            end_date,
            start_half_day: false,
            end_half_day: false,
            created_by: None,
            created_at: None,
        })
    }

    /// Sets the half-day flags.
    #[must_use]
    pub const fn with_half_days(mut self, start_half_day: bool, end_half_day: bool) -> Self {
        self.start_half_day = start_half_day;
        self.end_half_day = end_half_day;
        self
    }

    /// Sets the label. Blank labels are stored as `None`.
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self
    }

    /// Records who created the event and when.
    #[must_use]
    pub fn with_creator(mut self, created_by: UserId, created_at: OffsetDateTime) -> Self {
        self.created_by = Some(created_by);
        self.created_at = Some(created_at);
        self
    }

    /// Returns whether the event starts and ends on the same day.
    #[must_use]
    pub fn is_single_day(&self) -> bool {
        self.start_date == self.end_date
    }

    /// Returns whether `user_id` takes part in this event.
    #[must_use]
    pub fn includes_user(&self, user_id: &UserId) -> bool {
        self.user_ids.contains(user_id)
    }

    /// Returns whether the two events share at least one participant.
    #[must_use]
    pub fn shares_participant(&self, other: &Self) -> bool {
        self.user_ids.iter().any(|u| other.includes_user(u))
    }

    /// Returns whether the inclusive date ranges of the two events intersect.
    #[must_use]
    pub fn dates_overlap(&self, other: &Self) -> bool {
        self.start_date <= other.end_date && self.end_date >= other.start_date
    }
}

/// A public holiday on which no leave is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHoliday {
    /// The holiday's name.
    pub title: String,
    /// The calendar date.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Optional supplier notes (e.g. "Substitute day").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BankHoliday {
    /// Creates a new `BankHoliday` without notes.
    #[must_use]
    pub fn new(title: &str, date: Date) -> Self {
        Self {
            title: title.to_string(),
            date,
            notes: None,
        }
    }
}
