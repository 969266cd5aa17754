// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::macros::format_description;

/// The closed set of roles a caller can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Books appointments, owns vehicles, files feedback and complaints.
    Customer,
    /// Works assigned jobs and fills in job cards.
    Mechanic,
    /// Runs the service center: assignment, inventory, complaints, reports.
    Manager,
}

impl Role {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Mechanic => "Mechanic",
            Self::Manager => "Manager",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" => Ok(Self::Customer),
            "Mechanic" => Ok(Self::Mechanic),
            "Manager" => Ok(Self::Manager),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lifecycle state of an appointment.
///
/// ```text
/// Scheduled ──► In Progress ──► Completed
///     │
///     └──────► Cancelled
/// ```
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AppointmentStatus {
    /// Initial state after booking.
    #[default]
    Scheduled,
    /// A mechanic has started work.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work finished and billed.
    Completed,
    /// Cancelled by the owning customer.
    Cancelled,
}

impl AppointmentStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Checks whether the lifecycle graph has an edge from this state to `target`.
    ///
    /// Valid transitions are:
    /// - Scheduled → In Progress
    /// - In Progress → Completed
    /// - Scheduled → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Scheduled, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::Completed)
        )
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns whether the owning customer may still cancel.
    #[must_use]
    pub const fn is_cancellable(&self) -> bool {
        matches!(self, Self::Scheduled)
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Scheduled" => Ok(Self::Scheduled),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidAppointmentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The state of a complaint ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ComplaintStatus {
    /// Newly filed.
    #[default]
    Open,
    /// A manager is looking at it.
    #[serde(rename = "In Review")]
    InReview,
    /// Resolved by a manager.
    Resolved,
    /// Closed without further action.
    Closed,
}

impl ComplaintStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InReview => "In Review",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    /// Returns whether entering this status stamps the resolver and time.
    #[must_use]
    pub const fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Open, Self::InReview, Self::Resolved, Self::Closed];
}

impl FromStr for ComplaintStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "In Review" => Ok(Self::InReview),
            "Resolved" => Ok(Self::Resolved),
            "Closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidComplaintStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The urgency of a complaint ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ComplaintPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl ComplaintPriority {
    /// Converts this priority to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }

    /// All priorities, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];
}

impl FromStr for ComplaintPriority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            "Urgent" => Ok(Self::Urgent),
            _ => Err(DomainError::InvalidComplaintPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A vehicle registration number.
///
/// Registration numbers are trimmed and normalized to uppercase so that
/// uniqueness is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationNumber {
    value: String,
}

impl RegistrationNumber {
    /// Parses and normalizes a registration number.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty after trimming.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidRegistrationNumber(String::from(
                "Registration number cannot be empty",
            )));
        }
        Ok(Self { value: normalized })
    }

    /// Returns the normalized registration number.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A post-service rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rating(u8);

impl Rating {
    /// Creates a rating.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is outside 1..=5.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        match u8::try_from(value) {
            Ok(v) if (1..=5).contains(&v) => Ok(Self(v)),
            _ => Err(DomainError::InvalidRating(value)),
        }
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

/// A phone number in E.164 form: a leading `+` followed by 8 to 15 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhoneNumber {
    value: String,
}

impl PhoneNumber {
    /// Parses a phone number.
    ///
    /// Whitespace around the number is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the number does not begin with `+` or the
    /// remainder is not 8 to 15 digits with a non-zero country code.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let Some(digits) = trimmed.strip_prefix('+') else {
            return Err(DomainError::InvalidPhoneNumber(value.to_string()));
        };

        let valid: bool = (8..=15).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit())
            && !digits.starts_with('0');
        if !valid {
            return Err(DomainError::InvalidPhoneNumber(value.to_string()));
        }

        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An email address, trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress {
    value: String,
}

impl EmailAddress {
    /// Parses an email address.
    ///
    /// Only the shape is checked: one `@`, a non-empty local part, and a
    /// dotted domain without spaces.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not have that shape.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let normalized: String = value.trim().to_lowercase();
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(DomainError::InvalidEmail(value.to_string()));
        };

        let valid: bool = !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !normalized.contains(char::is_whitespace);
        if !valid {
            return Err(DomainError::InvalidEmail(value.to_string()));
        }

        Ok(Self { value: normalized })
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A bookable unit of capacity: one calendar day and a time label.
///
/// The time is a free-form label such as `10:00`; two slots are the same
/// slot when both the date and the trimmed label match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    date: Date,
    time: String,
}

impl Slot {
    /// Builds a slot from a `YYYY-MM-DD` date and a time label.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be parsed or the time label is empty.
    pub fn parse(date: &str, time: &str) -> Result<Self, DomainError> {
        let date: Date = parse_date(date)?;
        let time: &str = time.trim();
        if time.is_empty() {
            return Err(DomainError::InvalidField {
                field: "time",
                reason: String::from("Time cannot be empty"),
            });
        }
        Ok(Self {
            date,
            time: time.to_string(),
        })
    }

    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the date formatted as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
