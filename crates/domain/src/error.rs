// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{DayCount, EventType};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A day count is negative, non-finite, or not a whole or half number.
    InvalidDayCount(String),
    /// A reset day or month is out of range.
    InvalidResetDate {
        /// The rejected day of month.
        day: u8,
        /// The rejected month number.
        month: u8,
    },
    /// Display name is empty or invalid.
    InvalidDisplayName(String),
    /// An event ends before it starts.
    InvalidDateRange {
        /// The event start date.
        start_date: time::Date,
        /// The event end date.
        end_date: time::Date,
    },
    /// The participant list of an event is invalid.
    InvalidParticipants(String),
    /// A participant is neither the owner nor the owner's partner.
    ParticipantNotInHousehold {
        /// The offending participant.
        user_id: String,
    },
    /// A profile cannot be linked to itself.
    SelfPartner {
        /// The profile identifier.
        user_id: String,
    },
    /// A profile is already linked to a partner.
    AlreadyLinked {
        /// The profile that already has a partner.
        user_id: String,
    },
    /// A profile has no partner to unlink.
    NotLinked {
        /// The unlinked profile.
        user_id: String,
    },
    /// Profile does not exist.
    ProfileNotFound(String),
    /// Profile already exists.
    DuplicateProfile(String),
    /// Event does not exist.
    EventNotFound(String),
    /// Event identifier is already in use.
    DuplicateEvent(String),
    /// The new event overlaps an existing event of the same type.
    EventConflict {
        /// The leave type of both events.
        event_type: EventType,
        /// The identifier of the existing event.
        conflicting_event_id: String,
    },
    /// The event would consume more allowance than remains.
    InsufficientAllowance {
        /// The participant whose allowance is exceeded.
        user_id: String,
        /// The leave type.
        event_type: EventType,
        /// Days the event costs within the affected period.
        requested: DayCount,
        /// Days left in the affected period before the event.
        available: DayCount,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Leave type is not recognised.
    InvalidEventType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDayCount(msg) => write!(f, "Invalid day count: {msg}"),
            Self::InvalidResetDate { day, month } => {
                write!(
                    f,
                    "Invalid reset date: day {day}, month {month}. Day must be 1-31 and month 1-12"
                )
            }
            Self::InvalidDisplayName(msg) => write!(f, "Invalid display name: {msg}"),
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Event end date {end_date} is before its start date {start_date}"
                )
            }
            Self::InvalidParticipants(msg) => write!(f, "Invalid participants: {msg}"),
            Self::ParticipantNotInHousehold { user_id } => {
                write!(
                    f,
                    "User '{user_id}' is not the owner or the owner's partner"
                )
            }
            Self::SelfPartner { user_id } => {
                write!(f, "Profile '{user_id}' cannot be its own partner")
            }
            Self::AlreadyLinked { user_id } => {
                write!(f, "Profile '{user_id}' is already linked to a partner")
            }
            Self::NotLinked { user_id } => {
                write!(f, "Profile '{user_id}' is not linked to a partner")
            }
            Self::ProfileNotFound(id) => write!(f, "Profile '{id}' not found"),
            Self::DuplicateProfile(id) => write!(f, "Profile '{id}' already exists"),
            Self::EventNotFound(id) => write!(f, "Event '{id}' not found"),
            Self::DuplicateEvent(id) => write!(f, "Event '{id}' already exists"),
            Self::EventConflict {
                event_type,
                conflicting_event_id,
            } => {
                write!(
                    f,
                    "You already have a {} on these dates (event '{conflicting_event_id}')",
                    event_type.display_name().to_lowercase()
                )
            }
            Self::InsufficientAllowance {
                user_id,
                event_type,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Not enough {} allowance for '{user_id}': requested {requested} days, {available} remaining",
                    event_type.display_name().to_lowercase()
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidEventType(value) => {
                write!(
                    f,
                    "Invalid event type: {value}. Must be 'holiday' or 'remote_work'"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
