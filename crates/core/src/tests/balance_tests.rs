// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TODAY, create_details, create_event_command, create_profile, create_test_context,
};
use crate::{Command, MemberBalance, State, apply, household_balances};
use leavelink_domain::{DayCount, DomainError, EventType, UserId};
use time::macros::date;

fn create_household() -> State {
    let state: State = create_profile(&State::new(), "alice", "alice");
    let state: State = create_profile(&state, "bob", "Bob");
    let state: State = apply(
        &state,
        Command::LinkPartner {
            partner_id: UserId::new("alice"),
        },
        &create_test_context("bob"),
    )
    .unwrap()
    .new_state;
    apply(
        &state,
        create_event_command(
            "e1",
            create_details(
                &["alice"],
                EventType::Holiday,
                date!(2026 - 06 - 08),
                date!(2026 - 06 - 12),
            ),
        ),
        &create_test_context("alice"),
    )
    .unwrap()
    .new_state
}

#[test]
fn test_household_balances_sorted_case_insensitively() {
    let state: State = create_household();

    let balances: Vec<MemberBalance> =
        household_balances(&state, &UserId::new("bob"), &[], TODAY).unwrap();

    let names: Vec<&str> = balances
        .iter()
        .map(|m| m.profile.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["alice", "Bob"]);
}

#[test]
fn test_household_balances_per_member() {
    let state: State = create_household();

    let balances: Vec<MemberBalance> =
        household_balances(&state, &UserId::new("alice"), &[], TODAY).unwrap();

    assert_eq!(balances[0].balance.holiday.used, DayCount::whole_days(5));
    assert_eq!(balances[0].balance.holiday.balance, DayCount::whole_days(20));
    assert_eq!(balances[1].balance.holiday.used, DayCount::ZERO);
    assert_eq!(balances[1].balance.holiday.balance, DayCount::whole_days(25));
}

#[test]
fn test_household_balances_for_single_profile() {
    let state: State = create_profile(&State::new(), "carol", "Carol");

    let balances: Vec<MemberBalance> =
        household_balances(&state, &UserId::new("carol"), &[], TODAY).unwrap();

    assert_eq!(balances.len(), 1);
}

#[test]
fn test_household_balances_unknown_profile() {
    let result = household_balances(&State::new(), &UserId::new("ghost"), &[], TODAY);

    assert_eq!(
        result,
        Err(DomainError::ProfileNotFound(String::from("ghost")))
    );
}

#[test]
fn test_household_events_include_partner_bookings() {
    let state: State = create_household();

    assert_eq!(state.household_events(&UserId::new("bob")).len(), 1);
    assert!(state.household_events(&UserId::new("ghost")).is_empty());
}
