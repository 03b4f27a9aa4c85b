// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_context, create_test_household};
use crate::{
    ApiError, ApiResult, CreateProfileRequest, ProfileInfo, ProfileResponse,
    UpdateSettingsRequest, create_profile, get_profile, unlink_partner, update_settings,
};
use leavelink::State;
use leavelink_domain::{DayCount, UserId, user_color};

fn settings_request(holiday: f64) -> UpdateSettingsRequest {
    UpdateSettingsRequest {
        display_name: String::from("Alice"),
        holiday_allowance_days: holiday,
        remote_work_days: 10.0,
        holiday_reset_day: 1,
        holiday_reset_month: 4,
        remote_work_reset_day: 1,
        remote_work_reset_month: 1,
    }
}

#[test]
fn test_create_profile_returns_defaults_and_color() {
    let result: ApiResult<ProfileResponse> = create_profile(
        &State::new(),
        CreateProfileRequest {
            display_name: String::from("Alice"),
        },
        &create_test_context("alice"),
    )
    .unwrap();

    let profile: &ProfileInfo = &result.response.profile;
    assert_eq!(profile.id, "alice");
    assert_eq!(profile.holiday_allowance_days, DayCount::whole_days(25));
    assert_eq!(profile.remote_work_days, DayCount::ZERO);
    assert_eq!((profile.holiday_reset_day, profile.holiday_reset_month), (1, 1));
    assert_eq!(profile.color, user_color(&UserId::new("alice")));
    assert_eq!(result.response.message, "Created profile 'Alice'");
    assert_eq!(result.new_state.profiles.len(), 1);
}

#[test]
fn test_profile_wire_shape() {
    let state: State = create_test_household();
    let profile: ProfileInfo = get_profile(&state, &UserId::new("bob")).unwrap();

    let json: serde_json::Value = serde_json::to_value(&profile).unwrap();
    assert_eq!(json["partner_id"], "alice");
    assert_eq!(json["holiday_allowance_days"], 25);
    assert_eq!(json["remote_work_reset_month"], 1);
}

#[test]
fn test_get_profile_not_found() {
    let result: Result<ProfileInfo, ApiError> = get_profile(&State::new(), &UserId::new("ghost"));
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_settings_accepts_half_days() {
    let state: State = create_test_household();

    let result: ApiResult<ProfileResponse> =
        update_settings(&state, settings_request(27.5), &create_test_context("alice")).unwrap();

    assert_eq!(
        result.response.profile.holiday_allowance_days,
        DayCount::from_half_days(55)
    );
    assert_eq!(result.response.profile.holiday_reset_month, 4);
}

#[test]
fn test_update_settings_rejects_bad_allowance() {
    let state: State = create_test_household();

    let result = update_settings(&state, settings_request(-2.0), &create_test_context("alice"));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "holiday_allowance_days"
    ));

    let result = update_settings(&state, settings_request(1.25), &create_test_context("alice"));
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_update_settings_rejects_bad_reset_month() {
    let state: State = create_test_household();
    let mut request: UpdateSettingsRequest = settings_request(25.0);
    request.remote_work_reset_month = 13;

    let result = update_settings(&state, request, &create_test_context("alice"));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "reset_date"
    ));
}

#[test]
fn test_unlink_partner_twice() {
    let state: State = create_test_household();

    let state: State = unlink_partner(&state, &create_test_context("bob"))
        .unwrap()
        .new_state;
    assert_eq!(get_profile(&state, &UserId::new("alice")).unwrap().partner_id, None);

    let result = unlink_partner(&state, &create_test_context("bob"));
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "partner_required"
    ));
}
