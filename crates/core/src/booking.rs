// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::Actor;
use servicebay_domain::{
    Appointment, AppointmentStatus, JobCard, Money, OffPeakDays, Role, Slot, Vehicle,
    optional_text, require_text,
};
use time::OffsetDateTime;

/// A customer's request to book a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub service_type: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
    pub description: Option<String>,
}

/// Parses the slot of a booking request without building the appointment.
///
/// Callers use this to look up slot occupancy before calling
/// [`book_appointment`].
///
/// # Errors
///
/// Returns an error if the date or time is malformed.
pub fn requested_slot(request: &BookingRequest) -> Result<Slot, CoreError> {
    Ok(Slot::parse(&request.date, &request.time)?)
}

/// Builds a new `Scheduled` appointment.
///
/// Discount eligibility is decided here, once, from the off-peak set in
/// force at booking time and is never recomputed.
///
/// The `slot_taken` flag is an early rejection only. Storage must still
/// refuse a second live appointment for the same slot.
///
/// # Arguments
///
/// * `request` - The booking request
/// * `actor` - The booking customer
/// * `vehicle` - The vehicle being booked, already loaded
/// * `slot_taken` - Whether a non-cancelled appointment already holds the slot
/// * `off_peak` - The off-peak weekdays currently configured
/// * `now` - Creation timestamp
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a customer or does not own the vehicle
/// - The service type, date, or time is invalid
/// - The slot is taken
pub fn book_appointment(
    request: &BookingRequest,
    actor: &Actor,
    vehicle: &Vehicle,
    slot_taken: bool,
    off_peak: &OffPeakDays,
    now: OffsetDateTime,
) -> Result<Appointment, CoreError> {
    if actor.role != Role::Customer {
        return Err(CoreError::Forbidden(String::from(
            "Only customers can book appointments",
        )));
    }
    if vehicle.customer_id != actor.user_id {
        return Err(CoreError::NotOwner {
            resource: "vehicle",
        });
    }
    let Some(vehicle_id) = vehicle.vehicle_id else {
        return Err(CoreError::NotOwner {
            resource: "vehicle",
        });
    };

    let service_type: String = require_text("service_type", &request.service_type)?;
    let slot: Slot = requested_slot(request)?;

    if slot_taken {
        return Err(CoreError::SlotUnavailable {
            date: slot.date_string(),
            time: slot.time().to_string(),
        });
    }

    let discount_eligible: bool = off_peak.contains(slot.date());

    Ok(Appointment {
        appointment_id: None,
        customer_id: actor.user_id,
        vehicle_id,
        service_type,
        slot,
        status: AppointmentStatus::Scheduled,
        assigned_mechanic_id: None,
        notes: optional_text(request.notes.as_deref()),
        description: optional_text(request.description.as_deref()),
        job_card: JobCard::default(),
        subtotal: Money::ZERO,
        final_cost: Money::ZERO,
        discount_eligible,
        started_at: None,
        finished_at: None,
        feedback_submitted: false,
        version: 1,
        created_at: now,
    })
}
