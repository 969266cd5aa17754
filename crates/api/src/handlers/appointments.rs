// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking, the manager job desk, and the mechanic job card.

use servicebay::{BookingRequest, Command, JobCardUpdate, book_appointment, requested_slot};
use servicebay_domain::{
    Appointment, AppointmentStatus, DomainError, InventoryItem, LaborItem, OffPeakDays, PartUsed,
    Role, Slot, Vehicle,
};
use servicebay_notify::{OutboundEmail, Recipient, booking_confirmation_email};
use servicebay_persistence::{SqlitePersistence, UserData};
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::info;

use super::{
    ApiResult, AppointmentPeople, appointment_info, appointment_infos, build_appointment_info,
    load_appointment, load_user, not_found, person_summary, run_command, vehicle_summary,
};
use crate::auth::{Action, AuthenticatedUser, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AppointmentInfo, AssignMechanicRequest, BookAppointmentRequest, JobCardRequest,
    LaborLineRequest, PartLineRequest,
};

/// Books a service appointment for one of the caller's vehicles.
///
/// Off-peak eligibility is fixed here from the settings in force now.
/// A confirmation email with a PDF is returned for delivery.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The booking request
/// * `user` - The booking customer
/// * `now` - Creation timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a customer or does not own the vehicle
/// - The vehicle does not exist
/// - The service type, date or time is invalid
/// - The slot is already held by a live appointment
pub fn create_appointment(
    persistence: &mut SqlitePersistence,
    request: &BookAppointmentRequest,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<ApiResult<AppointmentInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::BookAppointment)?;

    let vehicle: Vehicle = persistence
        .get_vehicle(request.vehicle_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            not_found(
                "Vehicle",
                format!("Vehicle with ID {} not found", request.vehicle_id),
            )
        })?;

    let booking: BookingRequest = BookingRequest {
        service_type: request.service_type.clone(),
        date: request.date.clone(),
        time: request.time.clone(),
        notes: request.notes.clone(),
        description: request.description.clone(),
    };
    let slot: Slot = requested_slot(&booking).map_err(translate_core_error)?;
    let slot_taken: bool = persistence
        .is_slot_taken(&slot)
        .map_err(translate_persistence_error)?;
    let off_peak: OffPeakDays = persistence
        .load_off_peak_days()
        .map_err(translate_persistence_error)?;

    let appointment: Appointment = book_appointment(
        &booking,
        &user.to_actor(),
        &vehicle,
        slot_taken,
        &off_peak,
        now,
    )
    .map_err(translate_core_error)?;

    // Everything that can fail is read before the insert commits.
    let customer: UserData = load_user(persistence, user.user_id)?;

    let appointment_id: i64 = persistence
        .insert_appointment(&appointment)
        .map_err(translate_persistence_error)?;
    let stored: Appointment = Appointment {
        appointment_id: Some(appointment_id),
        ..appointment
    };

    info!(
        appointment_id,
        customer_id = user.user_id,
        date = %stored.slot.date_string(),
        time = %stored.slot.time(),
        discount_eligible = stored.discount_eligible,
        "Appointment booked"
    );

    let confirmation: OutboundEmail = booking_confirmation_email(
        &stored,
        Recipient {
            name: &customer.name,
            email: &customer.email,
        },
        &vehicle,
    );

    let info: AppointmentInfo = build_appointment_info(
        user,
        &stored,
        Some(vehicle_summary(&vehicle)),
        AppointmentPeople {
            customer: Some(person_summary(&customer)),
            mechanic: None,
        },
    )?;
    Ok(ApiResult::with_notifications(info, vec![confirmation]))
}

/// Lists the caller's appointments, latest slot first.
///
/// # Errors
///
/// Returns an error if the caller is not a customer or the query fails.
pub fn list_my_appointments(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<AppointmentInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ListOwnAppointments)?;

    let appointments: Vec<Appointment> = persistence
        .list_appointments_for_customer(user.user_id)
        .map_err(translate_persistence_error)?;
    appointment_infos(persistence, user, &appointments)
}

/// Lists appointments for staff.
///
/// Managers see every appointment; mechanics see only their assigned work.
///
/// # Errors
///
/// Returns an error if the caller is a customer or the query fails.
pub fn list_appointments(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<AppointmentInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ListAppointments)?;

    let appointments: Vec<Appointment> = if user.role == Role::Manager {
        persistence.list_all_appointments()
    } else {
        persistence.list_appointments_for_mechanic(user.user_id)
    }
    .map_err(translate_persistence_error)?;
    appointment_infos(persistence, user, &appointments)
}

/// Fetches one appointment.
///
/// Visible to the owning customer, the assigned mechanic, and managers.
///
/// # Errors
///
/// Returns an error if the appointment does not exist or the caller may
/// not see it.
pub fn get_appointment(
    persistence: &mut SqlitePersistence,
    appointment_id: i64,
    user: &AuthenticatedUser,
) -> Result<AppointmentInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ViewAppointment)?;

    let appointment: Appointment = load_appointment(persistence, appointment_id)?;
    let visible: bool = match user.role {
        Role::Manager => true,
        Role::Customer => appointment.is_owned_by(user.user_id),
        Role::Mechanic => appointment.is_assigned_to(user.user_id),
    };
    if !visible {
        return Err(ApiError::Forbidden {
            message: String::from("You do not have access to this appointment"),
        });
    }

    appointment_info(persistence, user, &appointment)
}

/// Cancels one of the caller's scheduled appointments.
///
/// # Errors
///
/// Returns an error if the caller does not own the appointment, it is no
/// longer scheduled, or it changed concurrently.
pub fn cancel_appointment(
    persistence: &mut SqlitePersistence,
    appointment_id: i64,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<AppointmentInfo, ApiError> {
    AuthorizationService::authorize(user, Action::CancelAppointment)?;

    let stored: Appointment =
        run_command(persistence, appointment_id, Command::Cancel, user, now)?;
    appointment_info(persistence, user, &stored)
}

/// Lists scheduled appointments with no mechanic, earliest first.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn list_unassigned_jobs(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<AppointmentInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ViewUnassignedJobs)?;

    let appointments: Vec<Appointment> = persistence
        .list_unassigned_appointments()
        .map_err(translate_persistence_error)?;
    appointment_infos(persistence, user, &appointments)
}

/// Assigns a mechanic to a scheduled, unassigned appointment.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a manager
/// - No mechanic has the given ID
/// - The appointment is already assigned or not scheduled
pub fn assign_mechanic(
    persistence: &mut SqlitePersistence,
    appointment_id: i64,
    request: &AssignMechanicRequest,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<AppointmentInfo, ApiError> {
    AuthorizationService::authorize(user, Action::AssignMechanic)?;

    let mechanic: Option<UserData> = persistence
        .get_user_by_id(request.mechanic_id)
        .map_err(translate_persistence_error)?;
    if !mechanic.is_some_and(|m| m.role == Role::Mechanic) {
        return Err(not_found(
            "Mechanic",
            format!("Mechanic with ID {} not found", request.mechanic_id),
        ));
    }

    let stored: Appointment = run_command(
        persistence,
        appointment_id,
        Command::AssignMechanic {
            mechanic_id: request.mechanic_id,
        },
        user,
        now,
    )?;
    appointment_info(persistence, user, &stored)
}

/// Lists the calling mechanic's assigned appointments.
///
/// # Errors
///
/// Returns an error if the caller is not a mechanic or the query fails.
pub fn list_mechanic_jobs(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<AppointmentInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ViewAssignedJobs)?;

    let appointments: Vec<Appointment> = persistence
        .list_appointments_for_mechanic(user.user_id)
        .map_err(translate_persistence_error)?;
    appointment_infos(persistence, user, &appointments)
}

fn resolve_part(
    persistence: &mut SqlitePersistence,
    line: &PartLineRequest,
) -> Result<PartUsed, ApiError> {
    if let Some(item_id) = line.inventory_item_id {
        let item: InventoryItem = persistence
            .get_inventory_item(item_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| {
                not_found(
                    "Inventory item",
                    format!("Inventory item with ID {item_id} not found"),
                )
            })?;
        return PartUsed::new(
            Some(item_id),
            &item.name,
            line.quantity,
            item.sale_price.cents(),
        )
        .map_err(translate_domain_error);
    }

    let name: &str = line.name.as_deref().unwrap_or_default();
    let Some(unit_price_cents) = line.unit_price_cents else {
        return Err(translate_domain_error(DomainError::MissingSalePrice {
            part: name.trim().to_string(),
        }));
    };
    PartUsed::new(None, name, line.quantity, unit_price_cents).map_err(translate_domain_error)
}

fn resolve_labor(line: &LaborLineRequest) -> Result<LaborItem, ApiError> {
    LaborItem::new(&line.description, line.cost_cents).map_err(translate_domain_error)
}

/// Edits a job card and optionally advances the appointment's status.
///
/// Part lines that reference stock are priced from the item as it is now.
/// Stock is debited only when the appointment is completed.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is neither the assigned mechanic nor a manager
/// - A line fails validation or references unknown stock
/// - The status change is not allowed
/// - Completion would take stock below zero
pub fn update_job_card(
    persistence: &mut SqlitePersistence,
    appointment_id: i64,
    request: &JobCardRequest,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<AppointmentInfo, ApiError> {
    AuthorizationService::authorize(user, Action::UpdateJobCard)?;

    let status: Option<AppointmentStatus> = request
        .status
        .as_deref()
        .map(AppointmentStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)?;

    let parts_used: Option<Vec<PartUsed>> = request
        .parts_used
        .as_ref()
        .map(|lines| {
            lines
                .iter()
                .map(|line| resolve_part(persistence, line))
                .collect::<Result<Vec<PartUsed>, ApiError>>()
        })
        .transpose()?;

    let labor_items: Option<Vec<LaborItem>> = request
        .labor_items
        .as_ref()
        .map(|lines| {
            lines
                .iter()
                .map(resolve_labor)
                .collect::<Result<Vec<LaborItem>, ApiError>>()
        })
        .transpose()?;

    let update: JobCardUpdate = JobCardUpdate {
        status,
        parts_used,
        labor_items,
        notes: request.notes.clone(),
        description: request.description.clone(),
    };

    let stored: Appointment = run_command(
        persistence,
        appointment_id,
        Command::UpdateJobCard(update),
        user,
        now,
    )?;
    appointment_info(persistence, user, &stored)
}
