// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, EventDetails};
use crate::error::CoreError;
use crate::state::{ApplyContext, Change, State, TransitionResult};
use leavelink_domain::{
    DomainError, Event, EventId, Profile, UserId, check_allowance, ensure_no_conflicts,
    validate_event_dates, validate_event_participants, validate_profile_fields,
};

/// Applies a command to the current state, producing a new state.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `ctx` - The actor, reference date and holiday data for this transition
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and what changed
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - A referenced profile or event does not exist
/// - The actor may not modify the target event
pub fn apply(
    state: &State,
    command: Command,
    ctx: &ApplyContext<'_>,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateProfile { display_name } => create_profile(state, &display_name, ctx),
        Command::UpdateSettings {
            display_name,
            holiday_allowance,
            remote_work_allowance,
            holiday_reset,
            remote_work_reset,
        } => {
            let mut profile: Profile = existing_profile(state, &ctx.actor)?.clone();
            profile.display_name = display_name.trim().to_string();
            profile.holiday_allowance = holiday_allowance;
            profile.remote_work_allowance = remote_work_allowance;
            profile.holiday_reset = holiday_reset;
            profile.remote_work_reset = remote_work_reset;
            validate_profile_fields(&profile)?;

            let mut new_state: State = state.clone();
            if let Some(slot) = new_state.profile_mut(&ctx.actor) {
                *slot = profile;
            }

            Ok(TransitionResult {
                new_state,
                change: Change::SettingsUpdated(ctx.actor.clone()),
            })
        }
        Command::LinkPartner { partner_id } => link_partner(state, partner_id, ctx),
        Command::UnlinkPartner => {
            let profile: &Profile = existing_profile(state, &ctx.actor)?;
            let Some(partner_id) = profile.partner_id.clone() else {
                return Err(DomainError::NotLinked {
                    user_id: ctx.actor.to_string(),
                }
                .into());
            };

            let mut new_state: State = state.clone();
            for id in [&ctx.actor, &partner_id] {
                if let Some(p) = new_state.profile_mut(id) {
                    p.partner_id = None;
                }
            }

            Ok(TransitionResult {
                new_state,
                change: Change::PartnersUnlinked(ctx.actor.clone(), partner_id),
            })
        }
        Command::CreateEvent { event_id, details } => {
            if state.event(&event_id).is_some() {
                return Err(DomainError::DuplicateEvent(event_id.to_string()).into());
            }

            let event: Event = build_event(event_id.clone(), details)?
                .with_creator(ctx.actor.clone(), ctx.now);
            validate_booking(state, &event, ctx)?;

            let mut new_state: State = state.clone();
            new_state.events.push(event);

            Ok(TransitionResult {
                new_state,
                change: Change::EventCreated(event_id),
            })
        }
        Command::UpdateEvent { event_id, details } => {
            let existing: &Event = existing_event(state, &event_id)?;
            ensure_may_modify(state, existing, &ctx.actor)?;

            let mut event: Event = build_event(event_id.clone(), details)?;
            event.created_by.clone_from(&existing.created_by);
            event.created_at = existing.created_at;
            validate_booking(state, &event, ctx)?;

            let mut new_state: State = state.clone();
            if let Some(slot) = new_state.events.iter_mut().find(|e| e.id == event_id) {
                *slot = event;
            }

            Ok(TransitionResult {
                new_state,
                change: Change::EventUpdated(event_id),
            })
        }
        Command::DeleteEvent { event_id } => {
            let existing: &Event = existing_event(state, &event_id)?;
            ensure_may_modify(state, existing, &ctx.actor)?;

            let mut new_state: State = state.clone();
            new_state.events.retain(|e| e.id != event_id);

            Ok(TransitionResult {
                new_state,
                change: Change::EventDeleted(event_id),
            })
        }
    }
}

fn create_profile(
    state: &State,
    display_name: &str,
    ctx: &ApplyContext<'_>,
) -> Result<TransitionResult, CoreError> {
    if state.profile(&ctx.actor).is_some() {
        return Err(DomainError::DuplicateProfile(ctx.actor.to_string()).into());
    }

    let profile: Profile = Profile::new(ctx.actor.clone(), display_name.trim().to_string());
    validate_profile_fields(&profile)?;

    let mut new_state: State = state.clone();
    new_state.profiles.push(profile);

    Ok(TransitionResult {
        new_state,
        change: Change::ProfileCreated(ctx.actor.clone()),
    })
}

fn link_partner(
    state: &State,
    partner_id: UserId,
    ctx: &ApplyContext<'_>,
) -> Result<TransitionResult, CoreError> {
    if partner_id == ctx.actor {
        return Err(DomainError::SelfPartner {
            user_id: partner_id.to_string(),
        }
        .into());
    }

    // Both sides must be free before either is touched
    for id in [&ctx.actor, &partner_id] {
        if existing_profile(state, id)?.partner_id.is_some() {
            return Err(DomainError::AlreadyLinked {
                user_id: id.to_string(),
            }
            .into());
        }
    }

    let mut new_state: State = state.clone();
    if let Some(p) = new_state.profile_mut(&ctx.actor) {
        p.partner_id = Some(partner_id.clone());
    }
    if let Some(p) = new_state.profile_mut(&partner_id) {
        p.partner_id = Some(ctx.actor.clone());
    }

    Ok(TransitionResult {
        new_state,
        change: Change::PartnersLinked(ctx.actor.clone(), partner_id),
    })
}

fn build_event(event_id: EventId, details: EventDetails) -> Result<Event, DomainError> {
    Ok(Event::new(
        event_id,
        details.user_ids,
        details.event_type,
        details.start_date,
        details.end_date,
    )?
    .with_half_days(details.start_half_day, details.end_half_day)
    .with_name(details.name))
}

/// Runs every booking rule for `event` on behalf of the actor.
fn validate_booking(
    state: &State,
    event: &Event,
    ctx: &ApplyContext<'_>,
) -> Result<(), CoreError> {
    let owner: &Profile = existing_profile(state, &ctx.actor)?;
    validate_event_dates(event)?;
    validate_event_participants(owner, event)?;
    ensure_no_conflicts(event, &state.events, ctx.overlap_policy)?;

    for user_id in &event.user_ids {
        let participant: &Profile = existing_profile(state, user_id)?;
        check_allowance(participant, &state.events, event, ctx.bank_holidays)?;
    }

    Ok(())
}

fn ensure_may_modify(state: &State, event: &Event, actor: &UserId) -> Result<(), CoreError> {
    let profile: &Profile = existing_profile(state, actor)?;
    if event.user_ids.iter().any(|u| profile.is_household_member(u)) {
        Ok(())
    } else {
        Err(CoreError::NotPermitted {
            actor: actor.to_string(),
            target: format!("event '{}'", event.id),
        })
    }
}

fn existing_profile<'a>(state: &'a State, user_id: &UserId) -> Result<&'a Profile, DomainError> {
    state
        .profile(user_id)
        .ok_or_else(|| DomainError::ProfileNotFound(user_id.to_string()))
}

fn existing_event<'a>(state: &'a State, event_id: &EventId) -> Result<&'a Event, DomainError> {
    state
        .event(event_id)
        .ok_or_else(|| DomainError::EventNotFound(event_id.to_string()))
}
