// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApplyContext, Command, EventDetails, State, apply};
use leavelink_domain::{EventId, EventType, OverlapPolicy, UserId};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const TODAY: Date = date!(2026 - 06 - 15);
pub const NOW: OffsetDateTime = datetime!(2026-06-15 09:00 UTC);

pub fn create_test_context(actor: &str) -> ApplyContext<'static> {
    ApplyContext {
        actor: UserId::new(actor),
        now: NOW,
        bank_holidays: &[],
        overlap_policy: OverlapPolicy::Strict,
    }
}

pub fn create_profile(state: &State, actor: &str, display_name: &str) -> State {
    apply(
        state,
        Command::CreateProfile {
            display_name: String::from(display_name),
        },
        &create_test_context(actor),
    )
    .unwrap()
    .new_state
}

/// Alice and Bob, linked, both on default settings.
pub fn create_linked_state() -> State {
    let state: State = create_profile(&State::new(), "alice", "Alice");
    let state: State = create_profile(&state, "bob", "Bob");
    apply(
        &state,
        Command::LinkPartner {
            partner_id: UserId::new("bob"),
        },
        &create_test_context("alice"),
    )
    .unwrap()
    .new_state
}

pub fn create_details(users: &[&str], event_type: EventType, start: Date, end: Date) -> EventDetails {
    EventDetails {
        user_ids: users.iter().map(|u| UserId::new(u)).collect(),
        event_type,
        name: None,
        start_date: start,
        end_date: end,
        start_half_day: false,
        end_half_day: false,
    }
}

pub fn create_event_command(id: &str, details: EventDetails) -> Command {
    Command::CreateEvent {
        event_id: EventId::new(id),
        details,
    }
}
