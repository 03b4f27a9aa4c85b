// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BankHoliday, DomainError, Event, EventId, EventType, Profile, UserId,
    bank_holidays_in_range, validate_event_dates, validate_event_participants,
    validate_profile_fields,
};
use time::macros::date;

fn create_linked_profile() -> Profile {
    let mut profile: Profile = Profile::new(UserId::new("alice"), String::from("Alice"));
    profile.partner_id = Some(UserId::new("bob"));
    profile
}

fn create_event(users: &[&str]) -> Event {
    Event::new(
        EventId::new("e1"),
        users.iter().map(|u| UserId::new(u)).collect(),
        EventType::Holiday,
        date!(2026 - 06 - 01),
        date!(2026 - 06 - 05),
    )
    .unwrap()
}

#[test]
fn test_validate_profile_fields_accepts_valid_profile() {
    let profile: Profile = create_linked_profile();
    assert!(validate_profile_fields(&profile).is_ok());
}

#[test]
fn test_validate_profile_fields_rejects_blank_name() {
    let mut profile: Profile = create_linked_profile();
    profile.display_name = String::from("  ");

    let result: Result<(), DomainError> = validate_profile_fields(&profile);
    assert!(matches!(result, Err(DomainError::InvalidDisplayName(_))));
}

#[test]
fn test_validate_profile_fields_rejects_self_partner() {
    let mut profile: Profile = create_linked_profile();
    profile.partner_id = Some(UserId::new("alice"));

    let result: Result<(), DomainError> = validate_profile_fields(&profile);
    assert!(matches!(result, Err(DomainError::SelfPartner { .. })));
}

#[test]
fn test_validate_participants_accepts_owner_and_partner() {
    let owner: Profile = create_linked_profile();

    assert!(validate_event_participants(&owner, &create_event(&["alice"])).is_ok());
    assert!(validate_event_participants(&owner, &create_event(&["bob"])).is_ok());
    assert!(validate_event_participants(&owner, &create_event(&["alice", "bob"])).is_ok());
}

#[test]
fn test_validate_participants_rejects_stranger() {
    let owner: Profile = create_linked_profile();

    let result: Result<(), DomainError> =
        validate_event_participants(&owner, &create_event(&["alice", "carol"]));
    assert_eq!(
        result,
        Err(DomainError::ParticipantNotInHousehold {
            user_id: String::from("carol"),
        })
    );
}

#[test]
fn test_validate_participants_rejects_partner_when_unlinked() {
    let owner: Profile = Profile::new(UserId::new("alice"), String::from("Alice"));

    let result: Result<(), DomainError> =
        validate_event_participants(&owner, &create_event(&["bob"]));
    assert!(matches!(
        result,
        Err(DomainError::ParticipantNotInHousehold { .. })
    ));
}

#[test]
fn test_validate_participants_rejects_bad_counts() {
    let owner: Profile = create_linked_profile();

    assert!(matches!(
        validate_event_participants(&owner, &create_event(&[])),
        Err(DomainError::InvalidParticipants(_))
    ));
    assert!(matches!(
        validate_event_participants(&owner, &create_event(&["alice", "alice"])),
        Err(DomainError::InvalidParticipants(_))
    ));
    assert!(matches!(
        validate_event_participants(&owner, &create_event(&["alice", "bob", "alice"])),
        Err(DomainError::InvalidParticipants(_))
    ));
}

#[test]
fn test_validate_event_dates() {
    let mut event: Event = create_event(&["alice"]);
    assert!(validate_event_dates(&event).is_ok());

    event.end_date = date!(2026 - 05 - 31);
    assert!(matches!(
        validate_event_dates(&event),
        Err(DomainError::InvalidDateRange { .. })
    ));
}

#[test]
fn test_bank_holidays_in_range_is_inclusive() {
    let holidays: Vec<BankHoliday> = vec![
        BankHoliday::new("Good Friday", date!(2026 - 04 - 03)),
        BankHoliday::new("Easter Monday", date!(2026 - 04 - 06)),
        BankHoliday::new("Early May bank holiday", date!(2026 - 05 - 04)),
    ];

    let in_range: Vec<BankHoliday> =
        bank_holidays_in_range(&holidays, date!(2026 - 04 - 03), date!(2026 - 04 - 06));

    assert_eq!(in_range.len(), 2);
    assert_eq!(in_range[0].title, "Good Friday");
    assert_eq!(in_range[1].title, "Easter Monday");
}
