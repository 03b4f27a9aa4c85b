// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leavelink_domain::{
    BalanceResult, BankHoliday, Event, EventId, OverlapPolicy, Profile, UserId,
};
use time::OffsetDateTime;

/// The complete household store: every profile and every booked event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// All known profiles.
    pub profiles: Vec<Profile>,
    /// All booked events.
    pub events: Vec<Event>,
}

impl State {
    /// Creates a new empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            profiles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Looks up a profile by id.
    #[must_use]
    pub fn profile(&self, user_id: &UserId) -> Option<&Profile> {
        self.profiles.iter().find(|p| &p.id == user_id)
    }

    /// Looks up an event by id.
    #[must_use]
    pub fn event(&self, event_id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == event_id)
    }

    /// Returns the profile and, when linked, its partner.
    #[must_use]
    pub fn household(&self, user_id: &UserId) -> Vec<&Profile> {
        let Some(profile) = self.profile(user_id) else {
            return Vec::new();
        };
        let mut members: Vec<&Profile> = vec![profile];
        if let Some(partner) = profile.partner_id.as_ref().and_then(|id| self.profile(id)) {
            members.push(partner);
        }
        members
    }

    /// Returns the events that include any member of `user_id`'s household.
    #[must_use]
    pub fn household_events(&self, user_id: &UserId) -> Vec<&Event> {
        let members: Vec<&Profile> = self.household(user_id);
        self.events
            .iter()
            .filter(|e| members.iter().any(|m| e.includes_user(&m.id)))
            .collect()
    }

    pub(crate) fn profile_mut(&mut self, user_id: &UserId) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|p| &p.id == user_id)
    }
}

/// Inputs a transition needs besides the state and the command.
#[derive(Debug, Clone)]
pub struct ApplyContext<'a> {
    /// The user issuing the command.
    pub actor: UserId,
    /// Timestamp recorded on created events.
    pub now: OffsetDateTime,
    /// Public holidays used when costing events.
    pub bank_holidays: &'a [BankHoliday],
    /// How same-type overlaps are judged.
    pub overlap_policy: OverlapPolicy,
}

/// What a successful transition changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A profile was created.
    ProfileCreated(UserId),
    /// A profile's settings were replaced.
    SettingsUpdated(UserId),
    /// Two profiles were linked.
    PartnersLinked(UserId, UserId),
    /// Two profiles were unlinked.
    PartnersUnlinked(UserId, UserId),
    /// An event was booked.
    EventCreated(EventId),
    /// An event was changed.
    EventUpdated(EventId),
    /// An event was removed.
    EventDeleted(EventId),
}

impl std::fmt::Display for Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProfileCreated(id) => write!(f, "Created profile '{id}'"),
            Self::SettingsUpdated(id) => write!(f, "Updated settings of '{id}'"),
            Self::PartnersLinked(a, b) => write!(f, "Linked '{a}' and '{b}'"),
            Self::PartnersUnlinked(a, b) => write!(f, "Unlinked '{a}' and '{b}'"),
            Self::EventCreated(id) => write!(f, "Created event '{id}'"),
            Self::EventUpdated(id) => write!(f, "Updated event '{id}'"),
            Self::EventDeleted(id) => write!(f, "Deleted event '{id}'"),
        }
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// What changed.
    pub change: Change,
}

/// A household member together with their balances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberBalance {
    /// The member's profile.
    pub profile: Profile,
    /// The member's balances.
    pub balance: BalanceResult,
}
