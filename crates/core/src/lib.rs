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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use leavelink_domain::{BankHoliday, DomainError, Profile, UserId, calculate_balance};
use time::Date;

// Re-export public types and functions
pub use apply::apply;
pub use command::{Command, EventDetails};
pub use error::CoreError;
pub use state::{ApplyContext, Change, MemberBalance, State, TransitionResult};

/// Computes balances for every member of a user's household.
///
/// This is a read-only query. Members are ordered by display name, ignoring
/// case, so the listing is stable whichever partner asks.
///
/// # Arguments
///
/// * `state` - The current state
/// * `user_id` - Any member of the household
/// * `bank_holidays` - Public holidays that cost nothing
/// * `today` - The reference date selecting the current period
///
/// # Errors
///
/// Returns an error if:
/// - The profile does not exist
/// - A period falls outside the supported calendar range
pub fn household_balances(
    state: &State,
    user_id: &UserId,
    bank_holidays: &[BankHoliday],
    today: Date,
) -> Result<Vec<MemberBalance>, DomainError> {
    let mut members: Vec<&Profile> = state.household(user_id);
    if members.is_empty() {
        return Err(DomainError::ProfileNotFound(user_id.to_string()));
    }
    members.sort_by_key(|p| p.display_name.to_lowercase());

    members
        .into_iter()
        .map(|profile| {
            Ok(MemberBalance {
                profile: profile.clone(),
                balance: calculate_balance(profile, &state.events, bank_holidays, today)?,
            })
        })
        .collect()
}
