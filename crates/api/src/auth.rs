// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identification and authorization of the acting user.
//!
//! Authentication happens upstream: the server receives the acting user's
//! id from a trusted proxy. This module only checks that the id is usable
//! and that the actor may touch what it asks for.

use leavelink::State;
use leavelink_domain::{Profile, UserId};

use crate::error::ApiError;

/// Turns the raw acting-user value into a `UserId`.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the value is missing or blank.
pub fn authenticate_user_id(raw: Option<&str>) -> Result<UserId, ApiError> {
    match raw.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(UserId::new(id)),
        Some(_) => Err(ApiError::AuthenticationFailed {
            reason: String::from("Acting user id is blank"),
        }),
        None => Err(ApiError::AuthenticationFailed {
            reason: String::from("Acting user id is missing"),
        }),
    }
}

/// Authorization rules for household data.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that an actor may change a profile's own settings or links.
    ///
    /// Only the profile's owner may.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is someone else.
    pub fn authorize_profile_change(actor: &UserId, target: &UserId) -> Result<(), ApiError> {
        if actor == target {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("change_profile"),
                message: format!("'{actor}' cannot change the profile of '{target}'"),
            })
        }
    }

    /// Checks that an actor may read a household's balances and events.
    ///
    /// The actor must be the profile named by `user_id` or its partner.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The profile does not exist
    /// - The actor is outside its household
    pub fn authorize_household_read(
        state: &State,
        actor: &UserId,
        user_id: &UserId,
    ) -> Result<(), ApiError> {
        let profile: &Profile = state
            .profile(user_id)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Profile"),
                message: format!("Profile '{user_id}' not found"),
            })?;

        if profile.is_household_member(actor) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: String::from("read_household"),
                message: format!("'{actor}' is not in the household of '{user_id}'"),
            })
        }
    }
}
