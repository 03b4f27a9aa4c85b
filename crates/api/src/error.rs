// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use leavelink::CoreError;
use leavelink_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request carries no usable acting user.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of why it was refused.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, message } => {
                write!(f, "Unauthorized to {action}: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidDayCount(_) => invalid_input("allowance", message),
        DomainError::InvalidResetDate { .. } => invalid_input("reset_date", message),
        DomainError::InvalidDisplayName(_) => invalid_input("display_name", message),
        DomainError::InvalidDateRange { .. } => invalid_input("end_date", message),
        DomainError::InvalidParticipants(_) | DomainError::ParticipantNotInHousehold { .. } => {
            invalid_input("user_ids", message)
        }
        DomainError::DateArithmeticOverflow { .. } | DomainError::DateParseError { .. } => {
            invalid_input("date", message)
        }
        DomainError::InvalidEventType(_) => invalid_input("type", message),
        DomainError::SelfPartner { .. } => rule_violation("distinct_partner", message),
        DomainError::AlreadyLinked { .. } => rule_violation("single_partner", message),
        DomainError::NotLinked { .. } => rule_violation("partner_required", message),
        DomainError::DuplicateProfile(_) => rule_violation("unique_profile", message),
        DomainError::DuplicateEvent(_) => rule_violation("unique_event", message),
        DomainError::EventConflict { .. } => rule_violation("no_overlap", message),
        DomainError::InsufficientAllowance { .. } => rule_violation("allowance", message),
        DomainError::ProfileNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Profile"),
            message,
        },
        DomainError::EventNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotPermitted { actor, target } => ApiError::Unauthorized {
            action: format!("modify {target}"),
            message: format!("'{actor}' is not in the owning household"),
        },
    }
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule_violation(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}
