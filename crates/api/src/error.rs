// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use servicebay::CoreError;
use servicebay_domain::DomainError;
use servicebay_notify::NotifyError;
use servicebay_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the caller may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The caller is authenticated but does not own or serve the resource.
    Forbidden {
        /// A human-readable description.
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
    /// The write lost to a concurrent one or to a uniqueness rule.
    Conflict {
        /// A human-readable description.
        message: String,
    },
    /// A notification that the caller waits on could not be delivered.
    NotificationFailed {
        /// A human-readable description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::Forbidden { message }
            | Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. }
            | Self::Conflict { message }
            | Self::NotificationFailed { message } => write!(f, "{message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidField { field, .. } => invalid(field, &err),
        DomainError::DateParseError { .. } => invalid("date", &err),
        DomainError::InvalidRegistrationNumber(_) => invalid("registration_number", &err),
        DomainError::InvalidVehicleYear { .. } => invalid("year", &err),
        DomainError::NonPositiveQuantity { field, .. }
        | DomainError::QuantityTooLarge { field, .. }
        | DomainError::NegativeAmount { field, .. } => invalid(field, &err),
        DomainError::QuantityOverflow => invalid("parts_used.quantity", &err),
        DomainError::AmountOverflow => invalid("amount", &err),
        DomainError::MissingSalePrice { .. } => invalid("parts_used", &err),
        DomainError::InvalidRating(_) => invalid("rating", &err),
        DomainError::InvalidPhoneNumber(_) => invalid("phone_number", &err),
        DomainError::InvalidEmail(_) => invalid("email", &err),
        DomainError::InvalidWeekday(_) | DomainError::EmptyOffPeakDays => {
            invalid("off_peak_days", &err)
        }
        DomainError::InvalidRole(_) => invalid("role", &err),
        DomainError::InvalidAppointmentStatus(_) | DomainError::InvalidComplaintStatus(_) => {
            invalid("status", &err)
        }
        DomainError::InvalidComplaintPriority(_) => invalid("priority", &err),
        DomainError::InvalidTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("appointment_lifecycle"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let rule: &str = match &err {
        CoreError::DomainViolation(_) => "",
        CoreError::NotOwner { .. } | CoreError::Forbidden(_) => {
            return ApiError::Forbidden {
                message: err.to_string(),
            };
        }
        CoreError::SlotUnavailable { .. } => {
            return ApiError::Conflict {
                message: err.to_string(),
            };
        }
        CoreError::NotCancellable(_) => "cancellable_status",
        CoreError::AlreadyAssigned => "single_assignment",
        CoreError::NotAssignable(_) => "assignable_status",
        CoreError::AppointmentClosed(_) => "closed_appointment",
        CoreError::NoMechanicAssigned => "mechanic_required",
        CoreError::FeedbackNotAllowed(_) => "feedback_after_completion",
        CoreError::FeedbackAlreadySubmitted => "single_feedback",
    };

    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        other => ApiError::DomainRuleViolation {
            rule: rule.to_string(),
            message: other.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Unique-constraint and optimistic-concurrency failures become conflicts;
/// anything unexpected becomes an internal error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::Conflict(message) => ApiError::Conflict { message },
        PersistenceError::StaleWrite { .. } => ApiError::Conflict {
            message: String::from(
                "The appointment was changed by another request. Reload it and try again.",
            ),
        },
        PersistenceError::InsufficientStock { .. }
        | PersistenceError::StockItemMissing { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// Translates a delivery failure on a path where the caller waits for the
/// outcome.
#[must_use]
pub fn translate_notify_error(err: &NotifyError) -> ApiError {
    ApiError::NotificationFailed {
        message: format!("Failed to send order: {err}"),
    }
}
