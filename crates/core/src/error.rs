// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicebay_domain::{AppointmentStatus, DomainError};

/// Errors that can occur during workflow transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The actor does not own the resource they are acting on.
    NotOwner {
        /// The kind of resource, e.g. `"appointment"`.
        resource: &'static str,
    },
    /// The actor's role or relationship does not permit the action.
    Forbidden(String),
    /// Another live appointment already holds the requested slot.
    SlotUnavailable {
        /// The slot date (`YYYY-MM-DD`).
        date: String,
        /// The slot time label.
        time: String,
    },
    /// The appointment cannot be cancelled from its current status.
    NotCancellable(AppointmentStatus),
    /// A mechanic is already assigned.
    AlreadyAssigned,
    /// Assignment requires a `Scheduled` appointment.
    NotAssignable(AppointmentStatus),
    /// Completed and cancelled appointments are read-only.
    AppointmentClosed(AppointmentStatus),
    /// Work cannot start before a mechanic is assigned.
    NoMechanicAssigned,
    /// Feedback requires a completed appointment.
    FeedbackNotAllowed(AppointmentStatus),
    /// Feedback already exists for the appointment.
    FeedbackAlreadySubmitted,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::NotOwner { resource } => {
                write!(f, "Not authorized to access this {resource}")
            }
            Self::Forbidden(msg) => write!(f, "{msg}"),
            Self::SlotUnavailable { date, time } => write!(
                f,
                "The {time} slot on {date} is already booked. Please choose another time."
            ),
            Self::NotCancellable(status) => match status {
                AppointmentStatus::Completed => {
                    write!(f, "Cannot cancel a completed appointment")
                }
                AppointmentStatus::Cancelled => write!(f, "Appointment is already cancelled"),
                AppointmentStatus::InProgress => {
                    write!(f, "Cannot cancel an appointment that is in progress")
                }
                AppointmentStatus::Scheduled => write!(f, "Appointment cannot be cancelled"),
            },
            Self::AlreadyAssigned => write!(f, "This appointment is already assigned"),
            Self::NotAssignable(status) => write!(
                f,
                "Only scheduled appointments can be assigned (status is '{status}')"
            ),
            Self::AppointmentClosed(status) => {
                write!(f, "Appointment is {status} and can no longer be changed")
            }
            Self::NoMechanicAssigned => {
                write!(f, "A mechanic must be assigned before work can start")
            }
            Self::FeedbackNotAllowed(_) => {
                write!(f, "Can only submit feedback for completed appointments")
            }
            Self::FeedbackAlreadySubmitted => {
                write!(f, "Feedback already submitted for this appointment")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
