// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers are synchronous and take the persistence layer by mutable
//! reference. Emails they want sent come back in [`ApiResult`] so the
//! caller can dispatch them once the response is decided.

pub mod accounts;
pub mod appointments;
pub mod complaints;
pub mod feedback;
pub mod inventory;
pub mod reports;
pub mod settings;
pub mod vehicles;

use servicebay::{Command, TransitionResult, apply};
use servicebay_domain::{Appointment, Complaint, Feedback, InventoryItem, Vehicle};
use servicebay_notify::OutboundEmail;
use servicebay_persistence::{SqlitePersistence, UserData, format_timestamp};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::AuthenticatedUser;
use crate::capabilities::compute_appointment_capabilities;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AppointmentInfo, ComplaintInfo, FeedbackInfo, InventoryItemInfo, LaborItemInfo,
    PartUsedInfo, PersonSummary, UserInfo, VehicleInfo, VehicleSummary,
};

/// The result of an API operation together with the emails it produced.
///
/// Emails are delivered best-effort after the operation has committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// Emails to dispatch.
    pub notifications: Vec<OutboundEmail>,
}

impl<T> ApiResult<T> {
    /// A result with nothing to send.
    #[must_use]
    pub const fn silent(response: T) -> Self {
        Self {
            response,
            notifications: Vec::new(),
        }
    }

    #[must_use]
    pub const fn with_notifications(response: T, notifications: Vec<OutboundEmail>) -> Self {
        Self {
            response,
            notifications,
        }
    }
}

/// Addresses used for staff-facing mail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSettings {
    /// Where complaint notifications go. No mail is sent when unset.
    pub manager_email: Option<String>,
    /// Reply-to contact printed in SMS orders.
    pub contact_email: Option<String>,
}

// ============================================================================
// Shared helpers
// ============================================================================

pub(crate) fn persisted_id(id: Option<i64>, resource_type: &str) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::Internal {
        message: format!("{resource_type} has no ID"),
    })
}

pub(crate) fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

pub(crate) fn timestamp(value: OffsetDateTime) -> Result<String, ApiError> {
    format_timestamp(value).map_err(translate_persistence_error)
}

pub(crate) fn optional_timestamp(value: Option<OffsetDateTime>) -> Result<Option<String>, ApiError> {
    value.map(timestamp).transpose()
}

pub(crate) fn load_appointment(
    persistence: &mut SqlitePersistence,
    appointment_id: i64,
) -> Result<Appointment, ApiError> {
    persistence
        .get_appointment(appointment_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            not_found(
                "Appointment",
                format!("Appointment with ID {appointment_id} not found"),
            )
        })
}

pub(crate) fn load_user(
    persistence: &mut SqlitePersistence,
    user_id: i64,
) -> Result<UserData, ApiError> {
    persistence
        .get_user_by_id(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("User", format!("User with ID {user_id} not found")))
}

/// Applies a workflow command to a stored appointment and persists it.
///
/// The write is guarded by the version the appointment was read at, so a
/// concurrent change surfaces as a conflict instead of being overwritten.
///
/// # Errors
///
/// Returns an error if the appointment does not exist, the command is
/// rejected, or the guarded write fails.
pub(crate) fn run_command(
    persistence: &mut SqlitePersistence,
    appointment_id: i64,
    command: Command,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<Appointment, ApiError> {
    let current: Appointment = load_appointment(persistence, appointment_id)?;

    let result: TransitionResult =
        apply(&current, command, &user.to_actor(), now).map_err(translate_core_error)?;

    let stored: Appointment = persistence
        .persist_transition(&result, current.version)
        .map_err(translate_persistence_error)?;

    info!(
        appointment_id,
        status = %stored.status,
        version = stored.version,
        "Appointment updated"
    );
    Ok(stored)
}

// ============================================================================
// Conversions
// ============================================================================

#[must_use]
pub fn user_info(user: &UserData) -> UserInfo {
    UserInfo {
        user_id: user.user_id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        phone: user.phone.clone(),
        created_at: user.created_at.clone(),
    }
}

pub(crate) fn person_summary(user: &UserData) -> PersonSummary {
    PersonSummary {
        user_id: user.user_id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

pub(crate) fn vehicle_summary(vehicle: &Vehicle) -> VehicleSummary {
    VehicleSummary {
        make: vehicle.make.clone(),
        model: vehicle.model.clone(),
        registration_number: vehicle.registration_number.value().to_string(),
    }
}

pub(crate) fn lookup_person(
    persistence: &mut SqlitePersistence,
    user_id: Option<i64>,
) -> Result<Option<PersonSummary>, ApiError> {
    let Some(user_id) = user_id else {
        return Ok(None);
    };
    Ok(persistence
        .get_user_by_id(user_id)
        .map_err(translate_persistence_error)?
        .as_ref()
        .map(person_summary))
}

/// Converts a stored vehicle.
///
/// # Errors
///
/// Returns an error if the vehicle has not been persisted.
pub fn vehicle_info(vehicle: &Vehicle) -> Result<VehicleInfo, ApiError> {
    Ok(VehicleInfo {
        vehicle_id: persisted_id(vehicle.vehicle_id, "Vehicle")?,
        customer_id: vehicle.customer_id,
        make: vehicle.make.clone(),
        model: vehicle.model.clone(),
        year: vehicle.year,
        registration_number: vehicle.registration_number.value().to_string(),
    })
}

/// Converts a stored inventory item.
///
/// # Errors
///
/// Returns an error if the item has not been persisted.
pub fn inventory_item_info(item: &InventoryItem) -> Result<InventoryItemInfo, ApiError> {
    Ok(InventoryItemInfo {
        item_id: persisted_id(item.item_id, "Inventory item")?,
        name: item.name.clone(),
        part_number: item.part_number.clone(),
        supplier: item.supplier.clone(),
        quantity: item.quantity,
        unit: item.unit.clone(),
        cost_price_cents: item.cost_price.cents(),
        sale_price_cents: item.sale_price.cents(),
        low_stock_threshold: item.low_stock_threshold,
        is_low_stock: item.is_low_stock(),
    })
}

/// Converts stored feedback.
///
/// # Errors
///
/// Returns an error if the feedback has not been persisted.
pub fn feedback_info(feedback: &Feedback) -> Result<FeedbackInfo, ApiError> {
    Ok(FeedbackInfo {
        feedback_id: persisted_id(feedback.feedback_id, "Feedback")?,
        appointment_id: feedback.appointment_id,
        customer_id: feedback.customer_id,
        mechanic_id: feedback.mechanic_id,
        rating: feedback.rating.value(),
        comment: feedback.comment.clone(),
        created_at: timestamp(feedback.created_at)?,
    })
}

/// Converts a stored complaint, embedding the customer's name and email.
///
/// # Errors
///
/// Returns an error if the complaint has not been persisted or the
/// customer lookup fails.
pub fn complaint_info(
    persistence: &mut SqlitePersistence,
    complaint: &Complaint,
) -> Result<ComplaintInfo, ApiError> {
    Ok(ComplaintInfo {
        complaint_id: persisted_id(complaint.complaint_id, "Complaint")?,
        customer_id: complaint.customer_id,
        appointment_id: complaint.appointment_id,
        subject: complaint.subject.clone(),
        description: complaint.description.clone(),
        status: complaint.status.as_str().to_string(),
        priority: complaint.priority.as_str().to_string(),
        manager_response: complaint.manager_response.clone(),
        resolved_by: complaint.resolved_by,
        resolved_at: optional_timestamp(complaint.resolved_at)?,
        created_at: timestamp(complaint.created_at)?,
        customer: lookup_person(persistence, Some(complaint.customer_id))?,
    })
}

/// Converts a stored appointment as seen by `user`.
///
/// Vehicle, customer and mechanic summaries are embedded when they can be
/// resolved. Capabilities are computed for the viewer.
///
/// # Errors
///
/// Returns an error if the appointment has not been persisted, a line
/// total overflows, or a lookup fails.
pub fn appointment_info(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
    appointment: &Appointment,
) -> Result<AppointmentInfo, ApiError> {
    let vehicle: Option<VehicleSummary> = persistence
        .get_vehicle(appointment.vehicle_id)
        .map_err(translate_persistence_error)?
        .as_ref()
        .map(vehicle_summary);

    let people: AppointmentPeople = AppointmentPeople {
        customer: lookup_person(persistence, Some(appointment.customer_id))?,
        mechanic: lookup_person(persistence, appointment.assigned_mechanic_id)?,
    };
    build_appointment_info(user, appointment, vehicle, people)
}

/// Resolved customer and mechanic summaries for an appointment.
pub(crate) struct AppointmentPeople {
    pub customer: Option<PersonSummary>,
    pub mechanic: Option<PersonSummary>,
}

/// Assembles an [`AppointmentInfo`] from summaries that were already looked up.
///
/// # Errors
///
/// Returns an error if the appointment has not been persisted or a line
/// total overflows.
pub(crate) fn build_appointment_info(
    user: &AuthenticatedUser,
    appointment: &Appointment,
    vehicle: Option<VehicleSummary>,
    people: AppointmentPeople,
) -> Result<AppointmentInfo, ApiError> {
    let parts_used: Vec<PartUsedInfo> = appointment
        .job_card
        .parts_used
        .iter()
        .map(|part| {
            Ok(PartUsedInfo {
                inventory_item_id: part.inventory_item_id,
                name: part.name.clone(),
                quantity: part.quantity,
                unit_price_cents: part.unit_price.cents(),
                line_total_cents: part
                    .line_total()
                    .map_err(translate_domain_error)?
                    .cents(),
            })
        })
        .collect::<Result<Vec<PartUsedInfo>, ApiError>>()?;

    let labor_items: Vec<LaborItemInfo> = appointment
        .job_card
        .labor_items
        .iter()
        .map(|item| LaborItemInfo {
            description: item.description.clone(),
            cost_cents: item.cost.cents(),
        })
        .collect();

    Ok(AppointmentInfo {
        appointment_id: persisted_id(appointment.appointment_id, "Appointment")?,
        customer_id: appointment.customer_id,
        vehicle_id: appointment.vehicle_id,
        service_type: appointment.service_type.clone(),
        date: appointment.slot.date_string(),
        time: appointment.slot.time().to_string(),
        status: appointment.status.as_str().to_string(),
        assigned_mechanic_id: appointment.assigned_mechanic_id,
        notes: appointment.notes.clone(),
        description: appointment.description.clone(),
        parts_used,
        labor_items,
        subtotal_cents: appointment.subtotal.cents(),
        final_cost_cents: appointment.final_cost.cents(),
        discount_eligible: appointment.discount_eligible,
        started_at: optional_timestamp(appointment.started_at)?,
        finished_at: optional_timestamp(appointment.finished_at)?,
        feedback_submitted: appointment.feedback_submitted,
        version: appointment.version,
        created_at: timestamp(appointment.created_at)?,
        vehicle,
        customer: people.customer,
        mechanic: people.mechanic,
        capabilities: compute_appointment_capabilities(user, appointment),
    })
}

pub(crate) fn appointment_infos(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
    appointments: &[Appointment],
) -> Result<Vec<AppointmentInfo>, ApiError> {
    appointments
        .iter()
        .map(|a| appointment_info(persistence, user, a))
        .collect()
}
