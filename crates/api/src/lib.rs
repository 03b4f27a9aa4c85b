// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! API boundary for LeaveLink.
//!
//! Handlers translate request DTOs into core commands and queries, and
//! translate core and domain errors into [`ApiError`]. They never hold
//! state: each mutation returns the new state for the caller to commit.

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthorizationService, authenticate_user_id};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiResult, MAX_COST_RANGE_DAYS, calculate_event_cost, create_event, create_profile,
    delete_event, get_household_balances, get_period, get_profile, link_partner,
    list_bank_holidays, list_events, unlink_partner, update_event, update_settings,
};
pub use request_response::{
    BalanceInfo, BankHolidaysRequest, BankHolidaysResponse, CreateProfileRequest,
    DeleteEventResponse, EventCostRequest, EventCostResponse, EventRequest, EventResponse,
    HouseholdBalancesResponse, LinkPartnerRequest, ListEventsResponse, PeriodRequest,
    PeriodResponse, ProfileInfo, ProfileResponse, UpdateSettingsRequest,
};
