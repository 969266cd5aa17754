// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::Actor;
use servicebay_domain::{
    Appointment, Complaint, ComplaintPriority, ComplaintStatus, Role, optional_text,
    require_text,
};
use time::OffsetDateTime;

/// A customer's new complaint ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintRequest {
    pub subject: String,
    pub description: String,
    pub priority: Option<ComplaintPriority>,
}

/// A manager's edit to a complaint. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComplaintUpdate {
    pub status: Option<ComplaintStatus>,
    pub priority: Option<ComplaintPriority>,
    pub manager_response: Option<String>,
}

/// The result of a complaint update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintUpdateResult {
    pub complaint: Complaint,
    /// Whether the customer should be told about the update.
    pub notify_customer: bool,
}

/// Opens a new complaint ticket.
///
/// # Arguments
///
/// * `request` - Subject, description, and optional priority
/// * `linked_appointment` - The appointment the complaint refers to, if any
/// * `actor` - The filing customer
/// * `now` - Creation timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a customer
/// - The subject or description is empty
/// - The linked appointment belongs to someone else
pub fn file_complaint(
    request: &ComplaintRequest,
    linked_appointment: Option<&Appointment>,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<Complaint, CoreError> {
    if actor.role != Role::Customer {
        return Err(CoreError::Forbidden(String::from(
            "Only customers can file complaints",
        )));
    }

    let subject: String = require_text("subject", &request.subject)?;
    let description: String = require_text("description", &request.description)?;

    if let Some(appointment) = linked_appointment
        && !appointment.is_owned_by(actor.user_id)
    {
        return Err(CoreError::NotOwner {
            resource: "appointment",
        });
    }

    Ok(Complaint {
        complaint_id: None,
        customer_id: actor.user_id,
        appointment_id: linked_appointment.and_then(|a| a.appointment_id),
        subject,
        description,
        status: ComplaintStatus::Open,
        priority: request.priority.unwrap_or_default(),
        manager_response: None,
        resolved_by: None,
        resolved_at: None,
        created_at: now,
    })
}

/// Applies a manager's update to a complaint.
///
/// Moving to `Resolved` or `Closed` stamps the acting manager and `now`.
/// The customer is notified when a response is given or the ticket is
/// resolved or closed.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the actor is not a manager.
pub fn update_complaint(
    complaint: &Complaint,
    update: ComplaintUpdate,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<ComplaintUpdateResult, CoreError> {
    if !actor.is_manager() {
        return Err(CoreError::Forbidden(String::from(
            "Only managers can update complaints",
        )));
    }

    let mut next: Complaint = complaint.clone();
    let response: Option<String> = optional_text(update.manager_response.as_deref());

    if let Some(status) = update.status {
        next.status = status;
        if status.is_resolution() {
            next.resolved_by = Some(actor.user_id);
            next.resolved_at = Some(now);
        }
    }
    if let Some(priority) = update.priority {
        next.priority = priority;
    }
    if let Some(response) = &response {
        next.manager_response = Some(response.clone());
    }

    let notify_customer: bool =
        response.is_some() || update.status.is_some_and(|s| s.is_resolution());

    Ok(ComplaintUpdateResult {
        complaint: next,
        notify_customer,
    })
}
