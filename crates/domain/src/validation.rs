// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{BankHoliday, Event, Profile, UserId};
use std::collections::HashSet;
use time::Date;

/// Validates that a profile's basic field constraints are met.
///
/// Allowances and reset dates are range-checked by their constructors;
/// this covers the remaining fields.
///
/// # Arguments
///
/// * `profile` - The profile to validate
///
/// # Errors
///
/// Returns an error if:
/// - The display name is empty or whitespace
/// - The profile names itself as its partner
pub fn validate_profile_fields(profile: &Profile) -> Result<(), DomainError> {
    // Rule: display name must not be blank
    if profile.display_name.trim().is_empty() {
        return Err(DomainError::InvalidDisplayName(String::from(
            "Display name cannot be empty",
        )));
    }

    // Rule: partner must be someone else
    if profile.partner_id.as_ref() == Some(&profile.id) {
        return Err(DomainError::SelfPartner {
            user_id: profile.id.to_string(),
        });
    }

    Ok(())
}

/// Validates the participants of an event booked by `owner`.
///
/// # Arguments
///
/// * `owner` - The profile booking the event
/// * `event` - The event to validate
///
/// # Errors
///
/// Returns an error if:
/// - There are no participants, or more than two
/// - A participant is listed twice
/// - A participant is neither `owner` nor `owner`'s partner
pub fn validate_event_participants(owner: &Profile, event: &Event) -> Result<(), DomainError> {
    if event.user_ids.is_empty() || event.user_ids.len() > 2 {
        return Err(DomainError::InvalidParticipants(format!(
            "An event needs one or two participants, got {}",
            event.user_ids.len()
        )));
    }

    let mut seen: HashSet<&UserId> = HashSet::new();
    for user_id in &event.user_ids {
        if !seen.insert(user_id) {
            return Err(DomainError::InvalidParticipants(format!(
                "'{user_id}' is listed more than once"
            )));
        }
        if !owner.is_household_member(user_id) {
            return Err(DomainError::ParticipantNotInHousehold {
                user_id: user_id.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates that an event does not end before it starts.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `end_date` precedes `start_date`.
pub const fn validate_event_dates(event: &Event) -> Result<(), DomainError> {
    if event.end_date.to_julian_day() < event.start_date.to_julian_day() {
        return Err(DomainError::InvalidDateRange {
            start_date: event.start_date,
            end_date: event.end_date,
        });
    }
    Ok(())
}

/// Returns the bank holidays falling between `start` and `end`, inclusive.
#[must_use]
pub fn bank_holidays_in_range(
    bank_holidays: &[BankHoliday],
    start: Date,
    end: Date,
) -> Vec<BankHoliday> {
    bank_holidays
        .iter()
        .filter(|h| start <= h.date && h.date <= end)
        .cloned()
        .collect()
}
