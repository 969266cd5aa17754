// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment mutations.
//!
//! Writes are guarded two ways:
//! - the partial unique index on `(slot_date, slot_time)` admits one live
//!   appointment per slot
//! - every update is a compare-and-swap on `(appointment_id, version)`

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay::{StockDebit, TransitionResult};
use servicebay_domain::{Appointment, Feedback, JobCard};
use tracing::{info, warn};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{appointment_labor, appointment_parts, appointments, feedback};
use crate::error::{PersistenceError, conflict_as};
use crate::mutations::inventory::debit_stock;
use crate::queries::appointments::get_appointment;
use crate::timestamps::{format_optional_timestamp, format_timestamp, now_timestamp};

/// Message returned when a slot is already held by a live appointment.
pub const SLOT_TAKEN: &str = "This time slot is already booked. Please choose another time.";

/// Inserts a newly booked appointment and its job card.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if a live appointment already holds
/// the slot.
pub fn insert_appointment(
    conn: &mut SqliteConnection,
    appointment: &Appointment,
) -> Result<i64, PersistenceError> {
    info!(
        customer_id = appointment.customer_id,
        vehicle_id = appointment.vehicle_id,
        date = %appointment.slot.date_string(),
        time = appointment.slot.time(),
        "Booking appointment"
    );

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let now: String = now_timestamp()?;
        diesel::insert_into(appointments::table)
            .values((
                appointments::customer_id.eq(appointment.customer_id),
                appointments::vehicle_id.eq(appointment.vehicle_id),
                appointments::service_type.eq(&appointment.service_type),
                appointments::slot_date.eq(appointment.slot.date_string()),
                appointments::slot_time.eq(appointment.slot.time()),
                appointments::status.eq(appointment.status.as_str()),
                appointments::assigned_mechanic_id.eq(appointment.assigned_mechanic_id),
                appointments::notes.eq(appointment.notes.as_deref()),
                appointments::description.eq(appointment.description.as_deref()),
                appointments::subtotal_cents.eq(appointment.subtotal.cents()),
                appointments::final_cost_cents.eq(appointment.final_cost.cents()),
                appointments::discount_eligible.eq(appointment.discount_eligible),
                appointments::started_at.eq(format_optional_timestamp(appointment.started_at)?),
                appointments::finished_at.eq(format_optional_timestamp(appointment.finished_at)?),
                appointments::feedback_submitted.eq(appointment.feedback_submitted),
                appointments::version.eq(1_i64),
                appointments::created_at.eq(format_timestamp(appointment.created_at)?),
                appointments::updated_at.eq(&now),
            ))
            .execute(conn)
            .map_err(|e| conflict_as(e, SLOT_TAKEN))?;

        let appointment_id: i64 = get_last_insert_rowid(conn)?;
        write_job_card(conn, appointment_id, &appointment.job_card)?;

        info!(appointment_id, "Appointment booked");
        Ok(appointment_id)
    })
}

/// Persists the outcome of a workflow command in one transaction.
///
/// The appointment row is written only if its stored version still equals
/// `expected_version`; the version is then incremented. Job-card lines are
/// replaced, stock debits are applied conditionally, and any feedback is
/// inserted. If any step fails nothing is written.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `result` - The transition produced by the workflow
/// * `expected_version` - The version the appointment was read at
///
/// # Errors
///
/// Returns:
/// - `PersistenceError::StaleWrite` if the appointment changed concurrently
/// - `PersistenceError::InsufficientStock` if a debit exceeds on-hand stock
/// - `PersistenceError::Conflict` if feedback already exists
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
    expected_version: i64,
) -> Result<Appointment, PersistenceError> {
    let appointment: &Appointment = &result.appointment;
    let Some(appointment_id) = appointment.appointment_id else {
        return Err(PersistenceError::Other(String::from(
            "Cannot update an appointment that has not been stored",
        )));
    };

    conn.transaction::<Appointment, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::update(appointments::table)
            .filter(appointments::appointment_id.eq(appointment_id))
            .filter(appointments::version.eq(expected_version))
            .set((
                appointments::status.eq(appointment.status.as_str()),
                appointments::assigned_mechanic_id.eq(appointment.assigned_mechanic_id),
                appointments::notes.eq(appointment.notes.as_deref()),
                appointments::description.eq(appointment.description.as_deref()),
                appointments::subtotal_cents.eq(appointment.subtotal.cents()),
                appointments::final_cost_cents.eq(appointment.final_cost.cents()),
                appointments::started_at.eq(format_optional_timestamp(appointment.started_at)?),
                appointments::finished_at.eq(format_optional_timestamp(appointment.finished_at)?),
                appointments::feedback_submitted.eq(appointment.feedback_submitted),
                appointments::version.eq(expected_version + 1),
                appointments::updated_at.eq(now_timestamp()?),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            warn!(appointment_id, expected_version, "Appointment write lost a race");
            return Err(PersistenceError::StaleWrite {
                appointment_id,
                expected_version,
            });
        }

        replace_job_card(conn, appointment_id, &appointment.job_card)?;

        for debit in &result.stock_debits {
            apply_debit(conn, debit)?;
        }

        if let Some(entry) = &result.feedback {
            insert_feedback(conn, entry)?;
        }

        get_appointment(conn, appointment_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Appointment with ID {appointment_id} not found"))
        })
    })
}

fn apply_debit(conn: &mut SqliteConnection, debit: &StockDebit) -> Result<(), PersistenceError> {
    info!(
        inventory_item_id = debit.inventory_item_id,
        quantity = debit.quantity,
        "Consuming stock"
    );
    debit_stock(conn, debit.inventory_item_id, debit.quantity)
}

fn insert_feedback(conn: &mut SqliteConnection, entry: &Feedback) -> Result<(), PersistenceError> {
    diesel::insert_into(feedback::table)
        .values((
            feedback::appointment_id.eq(entry.appointment_id),
            feedback::customer_id.eq(entry.customer_id),
            feedback::mechanic_id.eq(entry.mechanic_id),
            feedback::rating.eq(i32::from(entry.rating.value())),
            feedback::comment.eq(entry.comment.as_deref()),
            feedback::created_at.eq(format_timestamp(entry.created_at)?),
        ))
        .execute(conn)
        .map_err(|e| conflict_as(e, "Feedback already submitted for this appointment"))?;

    info!(appointment_id = entry.appointment_id, "Feedback recorded");
    Ok(())
}

fn replace_job_card(
    conn: &mut SqliteConnection,
    appointment_id: i64,
    job_card: &JobCard,
) -> Result<(), PersistenceError> {
    diesel::delete(appointment_parts::table)
        .filter(appointment_parts::appointment_id.eq(appointment_id))
        .execute(conn)?;
    diesel::delete(appointment_labor::table)
        .filter(appointment_labor::appointment_id.eq(appointment_id))
        .execute(conn)?;
    write_job_card(conn, appointment_id, job_card)
}

fn write_job_card(
    conn: &mut SqliteConnection,
    appointment_id: i64,
    job_card: &JobCard,
) -> Result<(), PersistenceError> {
    for (position, part) in (0_i32..).zip(&job_card.parts_used) {
        diesel::insert_into(appointment_parts::table)
            .values((
                appointment_parts::appointment_id.eq(appointment_id),
                appointment_parts::position.eq(position),
                appointment_parts::inventory_item_id.eq(part.inventory_item_id),
                appointment_parts::name.eq(&part.name),
                appointment_parts::quantity.eq(part.quantity),
                appointment_parts::unit_price_cents.eq(part.unit_price.cents()),
            ))
            .execute(conn)?;
    }

    for (position, item) in (0_i32..).zip(&job_card.labor_items) {
        diesel::insert_into(appointment_labor::table)
            .values((
                appointment_labor::appointment_id.eq(appointment_id),
                appointment_labor::position.eq(position),
                appointment_labor::description.eq(&item.description),
                appointment_labor::cost_cents.eq(item.cost.cents()),
            ))
            .execute(conn)?;
    }
    Ok(())
}
