// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use leavelink::{ApplyContext, State};
use leavelink_domain::{OverlapPolicy, UserId};
use time::macros::{date, datetime};
use time::Date;

use crate::{
    CreateProfileRequest, EventRequest, LinkPartnerRequest, create_profile, link_partner,
};

pub const TODAY: Date = date!(2026 - 06 - 15);

pub fn create_test_context(actor: &str) -> ApplyContext<'static> {
    ApplyContext {
        actor: UserId::new(actor),
        now: datetime!(2026-06-15 09:00 UTC),
        bank_holidays: &[],
        overlap_policy: OverlapPolicy::Strict,
    }
}

/// Alice and Bob with linked profiles.
pub fn create_test_household() -> State {
    let mut state: State = State::new();
    for (id, name) in [("alice", "Alice"), ("bob", "Bob")] {
        state = create_profile(
            &state,
            CreateProfileRequest {
                display_name: String::from(name),
            },
            &create_test_context(id),
        )
        .unwrap()
        .new_state;
    }
    link_partner(
        &state,
        &LinkPartnerRequest {
            partner_id: String::from("bob"),
        },
        &create_test_context("alice"),
    )
    .unwrap()
    .new_state
}

pub fn create_event_request(users: &[&str], event_type: &str, start: &str, end: &str) -> EventRequest {
    EventRequest {
        user_ids: users.iter().map(|u| (*u).to_string()).collect(),
        event_type: event_type.to_string(),
        name: None,
        start_date: start.to_string(),
        end_date: end.to_string(),
        start_half_day: false,
        end_half_day: false,
    }
}
