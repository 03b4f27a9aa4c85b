// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TODAY, create_event_request, create_test_context, create_test_household,
};
use crate::{
    ApiError, BankHolidaysRequest, BankHolidaysResponse, EventCostRequest, EventCostResponse,
    HouseholdBalancesResponse, MAX_COST_RANGE_DAYS, PeriodRequest, PeriodResponse,
    calculate_event_cost, create_event, create_profile, get_household_balances, get_period,
    list_bank_holidays,
};
use leavelink::State;
use leavelink_domain::{BankHoliday, DayCount, EventId, UserId};
use time::macros::date;

fn uk_holidays() -> Vec<BankHoliday> {
    vec![
        BankHoliday::new("Early May bank holiday", date!(2026 - 05 - 04)),
        BankHoliday::new("Spring bank holiday", date!(2026 - 05 - 25)),
        BankHoliday::new("Summer bank holiday", date!(2026 - 08 - 31)),
    ]
}

#[test]
fn test_household_balances_flat_shape() {
    let state: State = create_event(
        &create_test_household(),
        &EventId::new("e1"),
        create_event_request(&["bob"], "holiday", "2026-06-08", "2026-06-12"),
        &create_test_context("alice"),
    )
    .unwrap()
    .new_state;

    let response: HouseholdBalancesResponse =
        get_household_balances(&state, &UserId::new("alice"), &[], TODAY).unwrap();

    assert_eq!(response.balances.len(), 2);
    assert_eq!(response.balances[0].display_name, "Alice");
    assert_eq!(response.balances[1].holiday_balance, DayCount::whole_days(20));
    assert!(!response.balances[1].show_next_period_holiday);

    let json: serde_json::Value = serde_json::to_value(&response.balances[1]).unwrap();
    assert_eq!(json["holiday_balance"], 20);
    assert_eq!(json["wfa_balance"], 0);
    assert_eq!(json["next_period_holiday_balance"], 25);
    assert_eq!(json["show_next_period_wfa"], false);
    assert_eq!(json["holiday_period"]["start"], "2026-01-01");
}

#[test]
fn test_household_balances_sorted_ignoring_case() {
    let mut state: State = State::new();
    for (id, name) in [("u1", "zoe"), ("u2", "Adam")] {
        state = create_profile(
            &state,
            crate::CreateProfileRequest {
                display_name: String::from(name),
            },
            &create_test_context(id),
        )
        .unwrap()
        .new_state;
    }
    state = crate::link_partner(
        &state,
        &crate::LinkPartnerRequest {
            partner_id: String::from("u2"),
        },
        &create_test_context("u1"),
    )
    .unwrap()
    .new_state;

    let response: HouseholdBalancesResponse =
        get_household_balances(&state, &UserId::new("u1"), &[], TODAY).unwrap();
    let names: Vec<&str> = response
        .balances
        .iter()
        .map(|b| b.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["Adam", "zoe"]);
}

#[test]
fn test_event_cost_skips_bank_holidays() {
    let request: EventCostRequest = EventCostRequest {
        start_date: String::from("2026-05-25"),
        end_date: String::from("2026-05-29"),
        start_half_day: false,
        end_half_day: false,
    };

    let response: EventCostResponse = calculate_event_cost(&request, &uk_holidays()).unwrap();

    assert_eq!(response.business_days, DayCount::whole_days(4));
    assert_eq!(response.bank_holidays.len(), 1);
    assert_eq!(response.bank_holidays[0].title, "Spring bank holiday");
}

#[test]
fn test_event_cost_single_half_day() {
    let request: EventCostRequest = EventCostRequest {
        start_date: String::from("2026-06-10"),
        end_date: String::from("2026-06-10"),
        start_half_day: true,
        end_half_day: true,
    };

    let response: EventCostResponse = calculate_event_cost(&request, &[]).unwrap();
    assert_eq!(response.business_days, DayCount::HALF);
}

#[test]
fn test_event_cost_rejects_inverted_range() {
    let request: EventCostRequest = EventCostRequest {
        start_date: String::from("2026-06-10"),
        end_date: String::from("2026-06-09"),
        start_half_day: false,
        end_half_day: false,
    };

    assert!(matches!(
        calculate_event_cost(&request, &[]),
        Err(ApiError::InvalidInput { .. })
    ));
}

#[test]
fn test_event_cost_rejects_oversized_range() {
    let request: EventCostRequest = EventCostRequest {
        start_date: String::from("0001-01-01"),
        end_date: String::from("9999-12-31"),
        start_half_day: false,
        end_half_day: false,
    };

    assert_eq!(
        calculate_event_cost(&request, &[]),
        Err(ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!("Range cannot span more than {MAX_COST_RANGE_DAYS} days"),
        })
    );
}

#[test]
fn test_event_cost_accepts_longest_range() {
    let request: EventCostRequest = EventCostRequest {
        start_date: String::from("2026-01-01"),
        end_date: String::from("2031-01-05"),
        start_half_day: false,
        end_half_day: false,
    };

    assert!(calculate_event_cost(&request, &[]).is_ok());
}

#[test]
fn test_get_period_defaults_to_today() {
    let request: PeriodRequest = PeriodRequest {
        reset_day: 6,
        reset_month: 4,
        year_offset: 0,
        reference_date: None,
    };

    let response: PeriodResponse = get_period(&request, TODAY).unwrap();
    assert_eq!(response.period.start(), date!(2026 - 04 - 06));
    assert_eq!(response.period.end(), date!(2027 - 04 - 06));
    assert_eq!(response.last_day, "2027-04-05");
}

#[test]
fn test_get_period_with_reference_and_offset() {
    let request: PeriodRequest = PeriodRequest {
        reset_day: 31,
        reset_month: 2,
        year_offset: 1,
        reference_date: Some(String::from("2027-01-15")),
    };

    let response: PeriodResponse = get_period(&request, TODAY).unwrap();
    assert_eq!(response.period.start(), date!(2027 - 02 - 28));
    assert_eq!(response.period.end(), date!(2028 - 02 - 29));
}

#[test]
fn test_list_bank_holidays_in_range() {
    let request: BankHolidaysRequest = BankHolidaysRequest {
        start: String::from("2026-05-01"),
        end: String::from("2026-05-31"),
    };

    let response: BankHolidaysResponse = list_bank_holidays(&request, &uk_holidays()).unwrap();
    assert_eq!(response.bank_holidays.len(), 2);

    let inverted: BankHolidaysRequest = BankHolidaysRequest {
        start: String::from("2026-06-01"),
        end: String::from("2026-05-01"),
    };
    assert!(matches!(
        list_bank_holidays(&inverted, &uk_holidays()),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "end"
    ));
}
