// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Same-type overlap detection between leave events.

use crate::error::DomainError;
use crate::types::Event;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// How overlapping events of the same type are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Any shared date is a conflict, half days included.
    #[default]
    Strict,
    /// A single shared date is allowed when one event holds its morning and
    /// the other its afternoon.
    HalfDayAware,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "half-day-aware" | "half_day_aware" => Ok(Self::HalfDayAware),
            _ => Err(format!(
                "Invalid overlap policy: '{s}'. Must be 'strict' or 'half-day-aware'"
            )),
        }
    }
}

/// The part of a day an event occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    /// The whole day.
    Full,
    /// Until midday. The last day of an event with an end half day.
    Morning,
    /// From midday. The first day of an event with a start half day.
    Afternoon,
}

/// Returns which part of `date` the event occupies.
///
/// A single-day event with both flags set is treated as an afternoon.
#[must_use]
pub fn day_part(event: &Event, date: Date) -> DayPart {
    if date == event.start_date && event.start_half_day {
        DayPart::Afternoon
    } else if date == event.end_date && event.end_half_day {
        DayPart::Morning
    } else {
        DayPart::Full
    }
}

/// Returns whether two events of the same type and participant collide.
#[must_use]
pub fn events_conflict(candidate: &Event, existing: &Event, policy: OverlapPolicy) -> bool {
    if candidate.id == existing.id
        || candidate.event_type != existing.event_type
        || !candidate.shares_participant(existing)
        || !candidate.dates_overlap(existing)
    {
        return false;
    }

    match policy {
        OverlapPolicy::Strict => true,
        OverlapPolicy::HalfDayAware => {
            let first: Date = candidate.start_date.max(existing.start_date);
            let last: Date = candidate.end_date.min(existing.end_date);
            if first != last {
                return true;
            }
            !matches!(
                (day_part(candidate, first), day_part(existing, first)),
                (DayPart::Morning, DayPart::Afternoon) | (DayPart::Afternoon, DayPart::Morning)
            )
        }
    }
}

/// Returns every existing event the candidate collides with.
///
/// The candidate's own id is skipped, so an edited event never conflicts
/// with its previous version.
#[must_use]
pub fn find_conflicts<'a>(
    candidate: &Event,
    existing: &'a [Event],
    policy: OverlapPolicy,
) -> Vec<&'a Event> {
    existing
        .iter()
        .filter(|e| events_conflict(candidate, e, policy))
        .collect()
}

/// Rejects the candidate if it collides with any existing event.
///
/// # Errors
///
/// Returns `DomainError::EventConflict` naming the first colliding event.
pub fn ensure_no_conflicts(
    candidate: &Event,
    existing: &[Event],
    policy: OverlapPolicy,
) -> Result<(), DomainError> {
    match find_conflicts(candidate, existing, policy).first() {
        Some(conflict) => Err(DomainError::EventConflict {
            event_type: candidate.event_type,
            conflicting_event_id: conflict.id.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{EventId, EventType, UserId};
    use time::macros::date;

    fn make_event(id: &str, users: &[&str], start: Date, end: Date) -> Event {
        Event::new(
            EventId::new(id),
            users.iter().map(|u| UserId::new(u)).collect(),
            EventType::Holiday,
            start,
            end,
        )
        .unwrap()
    }

    #[test]
    fn test_disjoint_ranges_do_not_conflict() {
        let a: Event = make_event("a", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 05));
        let b: Event = make_event("b", &["alice"], date!(2026 - 06 - 06), date!(2026 - 06 - 10));

        assert!(find_conflicts(&a, &[b], OverlapPolicy::Strict).is_empty());
    }

    #[test]
    fn test_overlapping_range_conflicts() {
        let a: Event = make_event("a", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 05));
        let b: Event = make_event("b", &["alice"], date!(2026 - 06 - 05), date!(2026 - 06 - 10));

        let existing: Vec<Event> = vec![b];
        let conflicts: Vec<&Event> = find_conflicts(&a, &existing, OverlapPolicy::Strict);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, EventId::new("b"));
    }

    #[test]
    fn test_different_type_does_not_conflict() {
        let a: Event = make_event("a", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 05));
        let mut b: Event = make_event("b", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 05));
        b.event_type = EventType::RemoteWork;

        assert!(!events_conflict(&a, &b, OverlapPolicy::Strict));
    }

    #[test]
    fn test_different_people_do_not_conflict() {
        let a: Event = make_event("a", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 05));
        let b: Event = make_event("b", &["bob"], date!(2026 - 06 - 01), date!(2026 - 06 - 05));

        assert!(!events_conflict(&a, &b, OverlapPolicy::Strict));
    }

    #[test]
    fn test_shared_event_conflicts_with_either_partner() {
        let shared: Event = make_event(
            "a",
            &["alice", "bob"],
            date!(2026 - 06 - 01),
            date!(2026 - 06 - 05),
        );
        let bobs: Event = make_event("b", &["bob"], date!(2026 - 06 - 03), date!(2026 - 06 - 03));

        assert!(events_conflict(&shared, &bobs, OverlapPolicy::Strict));
    }

    #[test]
    fn test_same_id_is_not_a_conflict() {
        let a: Event = make_event("a", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 05));
        let edited: Event =
            make_event("a", &["alice"], date!(2026 - 06 - 02), date!(2026 - 06 - 06));

        assert!(ensure_no_conflicts(&edited, &[a], OverlapPolicy::Strict).is_ok());
    }

    #[test]
    fn test_morning_and_afternoon_policies() {
        let day: Date = date!(2026 - 06 - 03);
        let morning: Event = make_event("a", &["alice"], day, day).with_half_days(false, true);
        let afternoon: Event = make_event("b", &["alice"], day, day).with_half_days(true, false);

        assert!(events_conflict(&morning, &afternoon, OverlapPolicy::Strict));
        assert!(!events_conflict(&morning, &afternoon, OverlapPolicy::HalfDayAware));
    }

    #[test]
    fn test_same_half_conflicts_under_half_day_policy() {
        let day: Date = date!(2026 - 06 - 03);
        let first: Event = make_event("a", &["alice"], day, day).with_half_days(true, false);
        let second: Event = make_event("b", &["alice"], day, day).with_half_days(true, false);

        assert!(events_conflict(&first, &second, OverlapPolicy::HalfDayAware));
    }

    #[test]
    fn test_full_day_conflicts_with_half_day_under_half_day_policy() {
        let day: Date = date!(2026 - 06 - 03);
        let full: Event = make_event("a", &["alice"], day, day);
        let half: Event = make_event("b", &["alice"], day, day).with_half_days(true, false);

        assert!(events_conflict(&full, &half, OverlapPolicy::HalfDayAware));
    }

    #[test]
    fn test_handover_day_between_trips_is_allowed_under_half_day_policy() {
        // First trip ends at midday Wednesday, second starts that afternoon
        let first: Event = make_event("a", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 03))
            .with_half_days(false, true);
        let second: Event =
            make_event("b", &["alice"], date!(2026 - 06 - 03), date!(2026 - 06 - 05))
                .with_half_days(true, false);

        assert!(!events_conflict(&second, &first, OverlapPolicy::HalfDayAware));
        assert!(events_conflict(&second, &first, OverlapPolicy::Strict));
    }

    #[test]
    fn test_multi_day_overlap_conflicts_under_half_day_policy() {
        let first: Event = make_event("a", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 04))
            .with_half_days(false, true);
        let second: Event =
            make_event("b", &["alice"], date!(2026 - 06 - 03), date!(2026 - 06 - 05))
                .with_half_days(true, false);

        assert!(events_conflict(&second, &first, OverlapPolicy::HalfDayAware));
    }

    #[test]
    fn test_ensure_no_conflicts_reports_first_conflict() {
        let candidate: Event =
            make_event("new", &["alice"], date!(2026 - 06 - 01), date!(2026 - 06 - 05));
        let existing: Vec<Event> = vec![
            make_event("x", &["alice"], date!(2026 - 06 - 02), date!(2026 - 06 - 02)),
            make_event("y", &["alice"], date!(2026 - 06 - 04), date!(2026 - 06 - 04)),
        ];

        assert_eq!(
            ensure_no_conflicts(&candidate, &existing, OverlapPolicy::Strict),
            Err(DomainError::EventConflict {
                event_type: EventType::Holiday,
                conflicting_event_id: String::from("x"),
            })
        );
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(OverlapPolicy::from_str("strict"), Ok(OverlapPolicy::Strict));
        assert_eq!(
            OverlapPolicy::from_str("half-day-aware"),
            Ok(OverlapPolicy::HalfDayAware)
        );
        assert!(OverlapPolicy::from_str("lenient").is_err());
        assert_eq!(OverlapPolicy::default(), OverlapPolicy::Strict);
    }
}
