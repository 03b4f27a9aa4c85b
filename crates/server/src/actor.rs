// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Acting-user extraction for the server.
//!
//! Authentication is done by the proxy in front of the server, which
//! forwards the signed-in user's id in the `x-user-id` header.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use leavelink_api::authenticate_user_id;
use leavelink_domain::UserId;
use tracing::debug;

/// Header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the acting user.
///
/// # Errors
///
/// Rejects with HTTP 401 Unauthorized if the header is missing, not valid
/// UTF-8, or blank.
pub struct ActingUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = ActorError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw: Option<&str> = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => Some(value.to_str().map_err(|_| {
                debug!("Acting user header is not valid UTF-8");
                ActorError(String::from("Acting user id is not valid UTF-8"))
            })?),
            None => None,
        };

        authenticate_user_id(raw).map(Self).map_err(|e| {
            debug!(error = %e, "Rejected request without an acting user");
            ActorError(e.to_string())
        })
    }
}

/// Rejection returned when no acting user can be identified.
#[derive(Debug)]
pub struct ActorError(String);

impl IntoResponse for ActorError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, self.0).into_response()
    }
}
