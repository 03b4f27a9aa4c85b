// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leavelink_domain::{DayCount, EventId, EventType, ResetDate, UserId};
use time::Date;

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes. Profile commands act
/// on the acting user's own profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the actor's profile with default allowances.
    CreateProfile {
        /// The name shown in the calendar.
        display_name: String,
    },
    /// Replace the actor's allowances and reset dates.
    UpdateSettings {
        /// The name shown in the calendar.
        display_name: String,
        /// Holiday days granted per period.
        holiday_allowance: DayCount,
        /// Remote-work days granted per period.
        remote_work_allowance: DayCount,
        /// Start of each holiday period.
        holiday_reset: ResetDate,
        /// Start of each remote-work period.
        remote_work_reset: ResetDate,
    },
    /// Link the actor and another profile as partners.
    LinkPartner {
        /// The profile to link with.
        partner_id: UserId,
    },
    /// Remove the actor's partner link on both sides.
    UnlinkPartner,
    /// Book a new event.
    CreateEvent {
        /// Identifier assigned by the caller.
        event_id: EventId,
        /// What is being booked.
        details: EventDetails,
    },
    /// Replace an existing event's details.
    UpdateEvent {
        /// The event to change.
        event_id: EventId,
        /// The new details.
        details: EventDetails,
    },
    /// Remove an event.
    DeleteEvent {
        /// The event to remove.
        event_id: EventId,
    },
}

/// The editable fields of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    /// The people taking this leave.
    pub user_ids: Vec<UserId>,
    /// The leave type consumed.
    pub event_type: EventType,
    /// Optional free-text label.
    pub name: Option<String>,
    /// First day of leave.
    pub start_date: Date,
    /// Last day of leave.
    pub end_date: Date,
    /// Whether only the afternoon of `start_date` is taken.
    pub start_half_day: bool,
    /// Whether only the morning of `end_date` is taken.
    pub end_half_day: bool,
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateProfile { .. } => "CreateProfile",
            Self::UpdateSettings { .. } => "UpdateSettings",
            Self::LinkPartner { .. } => "LinkPartner",
            Self::UnlinkPartner => "UnlinkPartner",
            Self::CreateEvent { .. } => "CreateEvent",
            Self::UpdateEvent { .. } => "UpdateEvent",
            Self::DeleteEvent { .. } => "DeleteEvent",
        }
    }
}
