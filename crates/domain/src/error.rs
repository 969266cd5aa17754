// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::AppointmentStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty or malformed.
    InvalidField {
        /// The field name as it appears in requests.
        field: &'static str,
        /// A human-readable reason.
        reason: String,
    },
    /// Failed to parse a calendar date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A registration number is empty after normalization.
    InvalidRegistrationNumber(String),
    /// A vehicle model year is outside the accepted range.
    InvalidVehicleYear {
        /// The rejected year.
        year: i32,
        /// The latest accepted year.
        max: i32,
    },
    /// A quantity that must be positive was zero or negative.
    NonPositiveQuantity {
        /// The field name.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A quantity exceeded its upper bound.
    QuantityTooLarge {
        /// The field name.
        field: &'static str,
        /// The rejected value.
        value: i64,
        /// The largest accepted value.
        max: i64,
    },
    /// Summing quantities overflowed.
    QuantityOverflow,
    /// A currency amount that must not be negative was negative.
    NegativeAmount {
        /// The field name.
        field: &'static str,
        /// The rejected amount in cents.
        cents: i64,
    },
    /// Currency arithmetic overflowed.
    AmountOverflow,
    /// A free-name part was supplied without a unit sale price.
    MissingSalePrice {
        /// The part name.
        part: String,
    },
    /// Rating outside 1..=5.
    InvalidRating(i64),
    /// Phone number is not in E.164 form.
    InvalidPhoneNumber(String),
    /// Email address is malformed.
    InvalidEmail(String),
    /// Weekday name is not recognized.
    InvalidWeekday(String),
    /// The off-peak day set must not be empty.
    EmptyOffPeakDays,
    /// Role string is not recognized.
    InvalidRole(String),
    /// Appointment status string is not recognized.
    InvalidAppointmentStatus(String),
    /// Complaint status string is not recognized.
    InvalidComplaintStatus(String),
    /// Complaint priority string is not recognized.
    InvalidComplaintPriority(String),
    /// An appointment status change is not on the lifecycle graph.
    InvalidTransition {
        /// The current status.
        from: AppointmentStatus,
        /// The requested status.
        to: AppointmentStatus,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField { field, reason } => write!(f, "Invalid {field}: {reason}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidRegistrationNumber(msg) => {
                write!(f, "Invalid registration number: {msg}")
            }
            Self::InvalidVehicleYear { year, max } => {
                write!(f, "Vehicle year {year} must be between 1900 and {max}")
            }
            Self::NonPositiveQuantity { field, value } => {
                write!(f, "{field} must be greater than 0, got {value}")
            }
            Self::QuantityTooLarge { field, value, max } => {
                write!(f, "{field} must be at most {max}, got {value}")
            }
            Self::QuantityOverflow => write!(f, "Total part quantity is too large"),
            Self::NegativeAmount { field, cents } => {
                write!(f, "{field} must not be negative, got {cents} cents")
            }
            Self::AmountOverflow => write!(f, "Currency amount is too large"),
            Self::MissingSalePrice { part } => {
                write!(f, "Part '{part}' needs a unit sale price")
            }
            Self::InvalidRating(rating) => {
                write!(f, "Rating must be between 1 and 5, got {rating}")
            }
            Self::InvalidPhoneNumber(number) => write!(
                f,
                "Phone number '{number}' must be in E.164 format (e.g., +94771234567)"
            ),
            Self::InvalidEmail(address) => write!(f, "Invalid email address '{address}'"),
            Self::InvalidWeekday(name) => write!(f, "Unknown weekday '{name}'"),
            Self::EmptyOffPeakDays => write!(f, "At least one off-peak day is required"),
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidAppointmentStatus(status) => {
                write!(f, "Invalid appointment status: {status}")
            }
            Self::InvalidComplaintStatus(status) => {
                write!(f, "Invalid complaint status: {status}")
            }
            Self::InvalidComplaintPriority(priority) => {
                write!(f, "Invalid complaint priority: {priority}")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Cannot move an appointment from '{from}' to '{to}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
