// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use leavelink::{
    ApplyContext, Command, EventDetails, MemberBalance, State, TransitionResult, apply,
    household_balances,
};
use leavelink_domain::{
    AccrualPeriod, BankHoliday, DayCount, Event, EventId, EventType, LeaveBalance, Profile,
    ResetDate, UserId, bank_holidays_in_range, business_days_in_event, format_iso_date,
    parse_iso_date, resolve_period, user_color,
};
use std::str::FromStr;
use time::Date;
use tracing::{debug, info};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    BalanceInfo, BankHolidaysRequest, BankHolidaysResponse, CreateProfileRequest,
    DeleteEventResponse, EventCostRequest, EventCostResponse, EventRequest, EventResponse,
    HouseholdBalancesResponse, LinkPartnerRequest, ListEventsResponse, PeriodRequest,
    PeriodResponse, ProfileInfo, ProfileResponse, UpdateSettingsRequest,
};

/// The result of a state-changing API operation.
///
/// The caller commits `new_state` only after the whole operation succeeded.
#[derive(Debug, Clone)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The new state after the operation.
    pub new_state: State,
}

/// Creates the acting user's profile with default settings.
///
/// # Errors
///
/// Returns an error if:
/// - The actor already has a profile
/// - The display name is blank
pub fn create_profile(
    state: &State,
    request: CreateProfileRequest,
    ctx: &ApplyContext<'_>,
) -> Result<ApiResult<ProfileResponse>, ApiError> {
    let command: Command = Command::CreateProfile {
        display_name: request.display_name,
    };
    let transition: TransitionResult = run(state, command, ctx)?;
    let profile: ProfileInfo = profile_info(&transition.new_state, &ctx.actor)?;

    Ok(ApiResult {
        response: ProfileResponse {
            message: format!("Created profile '{}'", profile.display_name),
            profile,
        },
        new_state: transition.new_state,
    })
}

/// Returns a single profile.
///
/// # Errors
///
/// Returns an error if the profile does not exist.
pub fn get_profile(state: &State, user_id: &UserId) -> Result<ProfileInfo, ApiError> {
    profile_info(state, user_id)
}

/// Replaces the acting user's allowances and reset dates.
///
/// # Errors
///
/// Returns an error if:
/// - An allowance is negative or not a whole or half number
/// - A reset day or month is out of range
/// - The display name is blank
/// - The actor has no profile
pub fn update_settings(
    state: &State,
    request: UpdateSettingsRequest,
    ctx: &ApplyContext<'_>,
) -> Result<ApiResult<ProfileResponse>, ApiError> {
    let holiday_allowance: DayCount = parse_allowance(
        "holiday_allowance_days",
        request.holiday_allowance_days,
    )?;
    let remote_work_allowance: DayCount =
        parse_allowance("remote_work_days", request.remote_work_days)?;
    let holiday_reset: ResetDate =
        ResetDate::new(request.holiday_reset_day, request.holiday_reset_month)
            .map_err(translate_domain_error)?;
    let remote_work_reset: ResetDate =
        ResetDate::new(request.remote_work_reset_day, request.remote_work_reset_month)
            .map_err(translate_domain_error)?;

    let command: Command = Command::UpdateSettings {
        display_name: request.display_name,
        holiday_allowance,
        remote_work_allowance,
        holiday_reset,
        remote_work_reset,
    };
    let transition: TransitionResult = run(state, command, ctx)?;
    let profile: ProfileInfo = profile_info(&transition.new_state, &ctx.actor)?;

    Ok(ApiResult {
        response: ProfileResponse {
            profile,
            message: String::from("Settings saved"),
        },
        new_state: transition.new_state,
    })
}

/// Links the acting user with a partner, on both profiles.
///
/// # Errors
///
/// Returns an error if either profile is missing or already linked, or the
/// partner is the actor.
pub fn link_partner(
    state: &State,
    request: &LinkPartnerRequest,
    ctx: &ApplyContext<'_>,
) -> Result<ApiResult<ProfileResponse>, ApiError> {
    let partner_id: UserId = parse_user_id("partner_id", &request.partner_id)?;
    let command: Command = Command::LinkPartner {
        partner_id: partner_id.clone(),
    };
    let transition: TransitionResult = run(state, command, ctx)?;
    let profile: ProfileInfo = profile_info(&transition.new_state, &ctx.actor)?;

    Ok(ApiResult {
        response: ProfileResponse {
            profile,
            message: format!("Linked with '{partner_id}'"),
        },
        new_state: transition.new_state,
    })
}

/// Removes the acting user's partner link on both profiles.
///
/// # Errors
///
/// Returns an error if the actor has no profile or no partner.
pub fn unlink_partner(
    state: &State,
    ctx: &ApplyContext<'_>,
) -> Result<ApiResult<ProfileResponse>, ApiError> {
    let transition: TransitionResult = run(state, Command::UnlinkPartner, ctx)?;
    let profile: ProfileInfo = profile_info(&transition.new_state, &ctx.actor)?;

    Ok(ApiResult {
        response: ProfileResponse {
            profile,
            message: String::from("Partner unlinked"),
        },
        new_state: transition.new_state,
    })
}

/// Returns balances for every member of a household.
///
/// This is a read-only operation.
///
/// # Errors
///
/// Returns an error if the profile does not exist.
pub fn get_household_balances(
    state: &State,
    user_id: &UserId,
    bank_holidays: &[BankHoliday],
    today: Date,
) -> Result<HouseholdBalancesResponse, ApiError> {
    let members: Vec<MemberBalance> =
        household_balances(state, user_id, bank_holidays, today).map_err(translate_domain_error)?;
    debug!(user_id = %user_id, members = members.len(), "Computed household balances");

    Ok(HouseholdBalancesResponse {
        balances: members.iter().map(balance_info).collect(),
    })
}

/// Lists the events of a user's household, ordered by start date.
///
/// # Errors
///
/// Returns an error if the profile does not exist.
pub fn list_events(state: &State, user_id: &UserId) -> Result<ListEventsResponse, ApiError> {
    if state.profile(user_id).is_none() {
        return Err(profile_not_found(user_id));
    }

    let mut events: Vec<Event> = state
        .household_events(user_id)
        .into_iter()
        .cloned()
        .collect();
    events.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.id.as_str().cmp(b.id.as_str()))
    });

    Ok(ListEventsResponse { events })
}

/// Books a new event.
///
/// # Errors
///
/// Returns an error if:
/// - A date or the type cannot be parsed
/// - The event breaks a booking rule (participants, overlap, allowance)
pub fn create_event(
    state: &State,
    event_id: &EventId,
    request: EventRequest,
    ctx: &ApplyContext<'_>,
) -> Result<ApiResult<EventResponse>, ApiError> {
    let details: EventDetails = parse_event_request(request)?;
    let command: Command = Command::CreateEvent {
        event_id: event_id.clone(),
        details,
    };
    let transition: TransitionResult = run(state, command, ctx)?;
    event_result(transition, event_id, ctx.bank_holidays, "Event created")
}

/// Replaces an existing event's details.
///
/// # Errors
///
/// Returns an error if:
/// - A date or the type cannot be parsed
/// - The event does not exist or the actor may not modify it
/// - The new details break a booking rule
pub fn update_event(
    state: &State,
    event_id: &EventId,
    request: EventRequest,
    ctx: &ApplyContext<'_>,
) -> Result<ApiResult<EventResponse>, ApiError> {
    let details: EventDetails = parse_event_request(request)?;
    let command: Command = Command::UpdateEvent {
        event_id: event_id.clone(),
        details,
    };
    let transition: TransitionResult = run(state, command, ctx)?;
    event_result(transition, event_id, ctx.bank_holidays, "Event updated")
}

/// Removes an event.
///
/// # Errors
///
/// Returns an error if the event does not exist or the actor may not
/// modify it.
pub fn delete_event(
    state: &State,
    event_id: &EventId,
    ctx: &ApplyContext<'_>,
) -> Result<ApiResult<DeleteEventResponse>, ApiError> {
    let command: Command = Command::DeleteEvent {
        event_id: event_id.clone(),
    };
    let transition: TransitionResult = run(state, command, ctx)?;

    Ok(ApiResult {
        response: DeleteEventResponse {
            event_id: event_id.to_string(),
            message: String::from("Event deleted"),
        },
        new_state: transition.new_state,
    })
}

/// Longest range, in days after the start date, a cost preview will walk.
pub const MAX_COST_RANGE_DAYS: i64 = 5 * 366;

/// Prices a date range without booking it.
///
/// # Errors
///
/// Returns an error if a date cannot be parsed, the range is inverted, or
/// the range spans more than [`MAX_COST_RANGE_DAYS`].
pub fn calculate_event_cost(
    request: &EventCostRequest,
    bank_holidays: &[BankHoliday],
) -> Result<EventCostResponse, ApiError> {
    let start_date: Date = parse_date("start_date", &request.start_date)?;
    let end_date: Date = parse_date("end_date", &request.end_date)?;
    if (end_date - start_date).whole_days() > MAX_COST_RANGE_DAYS {
        return Err(ApiError::InvalidInput {
            field: String::from("end_date"),
            message: format!("Range cannot span more than {MAX_COST_RANGE_DAYS} days"),
        });
    }
    let event: Event = Event::new(
        EventId::new("preview"),
        Vec::new(),
        EventType::Holiday,
        start_date,
        end_date,
    )
    .map_err(translate_domain_error)?
    .with_half_days(request.start_half_day, request.end_half_day);

    Ok(EventCostResponse {
        business_days: business_days_in_event(&event, bank_holidays),
        bank_holidays: bank_holidays_in_range(bank_holidays, start_date, end_date),
    })
}

/// Resolves an accrual period for a reset date.
///
/// # Errors
///
/// Returns an error if the reset date or reference date is invalid, or the
/// period falls outside the supported calendar range.
pub fn get_period(request: &PeriodRequest, today: Date) -> Result<PeriodResponse, ApiError> {
    let reset: ResetDate =
        ResetDate::new(request.reset_day, request.reset_month).map_err(translate_domain_error)?;
    let reference: Date = match &request.reference_date {
        Some(value) => parse_date("reference_date", value)?,
        None => today,
    };
    let period: AccrualPeriod =
        resolve_period(reset, request.year_offset, reference).map_err(translate_domain_error)?;

    Ok(PeriodResponse {
        last_day: format_iso_date(period.last_day()),
        period,
    })
}

/// Lists the bank holidays between two dates, inclusive.
///
/// # Errors
///
/// Returns an error if a date cannot be parsed or the range is inverted.
pub fn list_bank_holidays(
    request: &BankHolidaysRequest,
    bank_holidays: &[BankHoliday],
) -> Result<BankHolidaysResponse, ApiError> {
    let start: Date = parse_date("start", &request.start)?;
    let end: Date = parse_date("end", &request.end)?;
    if end < start {
        return Err(ApiError::InvalidInput {
            field: String::from("end"),
            message: format!("Range end {end} is before its start {start}"),
        });
    }

    Ok(BankHolidaysResponse {
        bank_holidays: bank_holidays_in_range(bank_holidays, start, end),
    })
}

/// Applies a command and logs the change.
fn run(
    state: &State,
    command: Command,
    ctx: &ApplyContext<'_>,
) -> Result<TransitionResult, ApiError> {
    let name: &'static str = command.name();
    let transition: TransitionResult = apply(state, command, ctx).map_err(|err| {
        debug!(command = name, actor = %ctx.actor, error = %err, "Command rejected");
        translate_core_error(err)
    })?;
    info!(command = name, actor = %ctx.actor, change = %transition.change, "Command applied");
    Ok(transition)
}

fn event_result(
    transition: TransitionResult,
    event_id: &EventId,
    bank_holidays: &[BankHoliday],
    message: &str,
) -> Result<ApiResult<EventResponse>, ApiError> {
    let event: Event = transition
        .new_state
        .event(event_id)
        .cloned()
        .ok_or_else(|| ApiError::Internal {
            message: format!("Event '{event_id}' missing after a successful transition"),
        })?;

    Ok(ApiResult {
        response: EventResponse {
            business_days: business_days_in_event(&event, bank_holidays),
            event,
            message: message.to_string(),
        },
        new_state: transition.new_state,
    })
}

fn profile_info(state: &State, user_id: &UserId) -> Result<ProfileInfo, ApiError> {
    state
        .profile(user_id)
        .map(to_profile_info)
        .ok_or_else(|| profile_not_found(user_id))
}

fn to_profile_info(profile: &Profile) -> ProfileInfo {
    ProfileInfo {
        id: profile.id.to_string(),
        display_name: profile.display_name.clone(),
        partner_id: profile.partner_id.as_ref().map(ToString::to_string),
        holiday_allowance_days: profile.holiday_allowance,
        remote_work_days: profile.remote_work_allowance,
        holiday_reset_day: profile.holiday_reset.day(),
        holiday_reset_month: profile.holiday_reset.month_number(),
        remote_work_reset_day: profile.remote_work_reset.day(),
        remote_work_reset_month: profile.remote_work_reset.month_number(),
        color: user_color(&profile.id).to_string(),
    }
}

fn balance_info(member: &MemberBalance) -> BalanceInfo {
    let holiday: &LeaveBalance = &member.balance.holiday;
    let wfa: &LeaveBalance = &member.balance.remote_work;

    BalanceInfo {
        user_id: member.profile.id.to_string(),
        display_name: member.profile.display_name.clone(),
        color: user_color(&member.profile.id).to_string(),
        holiday_allowance: holiday.allowance,
        holiday_used: holiday.used,
        holiday_balance: holiday.balance,
        holiday_period: holiday.period,
        next_period_holiday_used: holiday.next_period_used,
        next_period_holiday_balance: holiday.next_period_balance,
        show_next_period_holiday: holiday.show_next_period,
        wfa_allowance: wfa.allowance,
        wfa_used: wfa.used,
        wfa_balance: wfa.balance,
        wfa_period: wfa.period,
        next_period_wfa_used: wfa.next_period_used,
        next_period_wfa_balance: wfa.next_period_balance,
        show_next_period_wfa: wfa.show_next_period,
    }
}

fn parse_event_request(request: EventRequest) -> Result<EventDetails, ApiError> {
    let user_ids: Vec<UserId> = request
        .user_ids
        .iter()
        .map(|id| parse_user_id("user_ids", id))
        .collect::<Result<_, _>>()?;

    Ok(EventDetails {
        user_ids,
        event_type: EventType::from_str(&request.event_type).map_err(translate_domain_error)?,
        name: request.name,
        start_date: parse_date("start_date", &request.start_date)?,
        end_date: parse_date("end_date", &request.end_date)?,
        start_half_day: request.start_half_day,
        end_half_day: request.end_half_day,
    })
}

fn parse_allowance(field: &str, days: f64) -> Result<DayCount, ApiError> {
    DayCount::try_from_days(days).map_err(|err| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    })
}

fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(|err| ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    })
}

fn parse_user_id(field: &str, value: &str) -> Result<UserId, ApiError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput {
            field: field.to_string(),
            message: String::from("User id cannot be empty"),
        });
    }
    Ok(UserId::new(trimmed))
}

fn profile_not_found(user_id: &UserId) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Profile"),
        message: format!("Profile '{user_id}' not found"),
    }
}
