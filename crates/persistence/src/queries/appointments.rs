// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment queries.
//!
//! An appointment is stored as one `appointments` row plus its ordered
//! `appointment_parts` and `appointment_labor` lines. Every read assembles
//! the full aggregate.

use std::collections::HashMap;
use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::{
    Appointment, AppointmentStatus, JobCard, LaborItem, Money, PartUsed, Slot,
};
use tracing::debug;

use crate::diesel_schema::{appointment_labor, appointment_parts, appointments};
use crate::error::PersistenceError;
use crate::timestamps::{parse_optional_timestamp, parse_timestamp};

/// Diesel Queryable struct for appointment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = appointments)]
struct AppointmentRow {
    appointment_id: i64,
    customer_id: i64,
    vehicle_id: i64,
    service_type: String,
    slot_date: String,
    slot_time: String,
    status: String,
    assigned_mechanic_id: Option<i64>,
    notes: Option<String>,
    description: Option<String>,
    subtotal_cents: i64,
    final_cost_cents: i64,
    discount_eligible: bool,
    started_at: Option<String>,
    finished_at: Option<String>,
    feedback_submitted: bool,
    version: i64,
    created_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = appointment_parts)]
struct PartRow {
    appointment_id: i64,
    inventory_item_id: Option<i64>,
    name: String,
    quantity: i64,
    unit_price_cents: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = appointment_labor)]
struct LaborRow {
    appointment_id: i64,
    description: String,
    cost_cents: i64,
}

impl AppointmentRow {
    fn into_appointment(self, job_card: JobCard) -> Result<Appointment, PersistenceError> {
        Ok(Appointment {
            appointment_id: Some(self.appointment_id),
            customer_id: self.customer_id,
            vehicle_id: self.vehicle_id,
            service_type: self.service_type,
            slot: Slot::parse(&self.slot_date, &self.slot_time)?,
            status: AppointmentStatus::from_str(&self.status)?,
            assigned_mechanic_id: self.assigned_mechanic_id,
            notes: self.notes,
            description: self.description,
            job_card,
            subtotal: Money::from_cents(self.subtotal_cents),
            final_cost: Money::from_cents(self.final_cost_cents),
            discount_eligible: self.discount_eligible,
            started_at: parse_optional_timestamp(self.started_at.as_deref())?,
            finished_at: parse_optional_timestamp(self.finished_at.as_deref())?,
            feedback_submitted: self.feedback_submitted,
            version: self.version,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Loads the job cards of the given appointments, keyed by appointment id.
///
/// Appointments without lines get no entry.
fn load_job_cards(
    conn: &mut SqliteConnection,
    appointment_ids: &[i64],
) -> Result<HashMap<i64, JobCard>, PersistenceError> {
    let mut cards: HashMap<i64, JobCard> = HashMap::new();
    if appointment_ids.is_empty() {
        return Ok(cards);
    }

    let parts: Vec<PartRow> = appointment_parts::table
        .filter(appointment_parts::appointment_id.eq_any(appointment_ids))
        .order((
            appointment_parts::appointment_id.asc(),
            appointment_parts::position.asc(),
        ))
        .select(PartRow::as_select())
        .load(conn)?;

    for part in parts {
        cards
            .entry(part.appointment_id)
            .or_default()
            .parts_used
            .push(PartUsed {
                inventory_item_id: part.inventory_item_id,
                name: part.name,
                quantity: part.quantity,
                unit_price: Money::from_cents(part.unit_price_cents),
            });
    }

    let labor: Vec<LaborRow> = appointment_labor::table
        .filter(appointment_labor::appointment_id.eq_any(appointment_ids))
        .order((
            appointment_labor::appointment_id.asc(),
            appointment_labor::position.asc(),
        ))
        .select(LaborRow::as_select())
        .load(conn)?;

    for line in labor {
        cards
            .entry(line.appointment_id)
            .or_default()
            .labor_items
            .push(LaborItem {
                description: line.description,
                cost: Money::from_cents(line.cost_cents),
            });
    }

    Ok(cards)
}

fn assemble(
    conn: &mut SqliteConnection,
    rows: Vec<AppointmentRow>,
) -> Result<Vec<Appointment>, PersistenceError> {
    let ids: Vec<i64> = rows.iter().map(|row| row.appointment_id).collect();
    let mut cards: HashMap<i64, JobCard> = load_job_cards(conn, &ids)?;

    rows.into_iter()
        .map(|row| {
            let card: JobCard = cards.remove(&row.appointment_id).unwrap_or_default();
            row.into_appointment(card)
        })
        .collect()
}

/// Retrieves an appointment with its job card.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored value is corrupt.
/// Returns `Ok(None)` if the appointment is not found.
pub fn get_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<Option<Appointment>, PersistenceError> {
    debug!(appointment_id, "Loading appointment");

    let result: Result<AppointmentRow, diesel::result::Error> = appointments::table
        .filter(appointments::appointment_id.eq(appointment_id))
        .select(AppointmentRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(assemble(conn, vec![row])?.pop()),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Checks whether a live (non-cancelled) appointment holds the slot.
///
/// This is advisory; the partial unique index is what rejects a racing insert.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_slot_taken(conn: &mut SqliteConnection, slot: &Slot) -> Result<bool, PersistenceError> {
    let count: i64 = appointments::table
        .filter(appointments::slot_date.eq(slot.date_string()))
        .filter(appointments::slot_time.eq(slot.time()))
        .filter(appointments::status.ne(AppointmentStatus::Cancelled.as_str()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists a customer's appointments, latest slot first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_appointments_for_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Vec<Appointment>, PersistenceError> {
    let rows: Vec<AppointmentRow> = appointments::table
        .filter(appointments::customer_id.eq(customer_id))
        .order((appointments::slot_date.desc(), appointments::slot_time.desc()))
        .select(AppointmentRow::as_select())
        .load(conn)?;
    assemble(conn, rows)
}

/// Lists every appointment, latest slot first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_all_appointments(
    conn: &mut SqliteConnection,
) -> Result<Vec<Appointment>, PersistenceError> {
    let rows: Vec<AppointmentRow> = appointments::table
        .order((appointments::slot_date.desc(), appointments::slot_time.desc()))
        .select(AppointmentRow::as_select())
        .load(conn)?;
    assemble(conn, rows)
}

/// Lists the appointments assigned to a mechanic, earliest slot first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_appointments_for_mechanic(
    conn: &mut SqliteConnection,
    mechanic_id: i64,
) -> Result<Vec<Appointment>, PersistenceError> {
    let rows: Vec<AppointmentRow> = appointments::table
        .filter(appointments::assigned_mechanic_id.eq(mechanic_id))
        .order((appointments::slot_date.asc(), appointments::slot_time.asc()))
        .select(AppointmentRow::as_select())
        .load(conn)?;
    assemble(conn, rows)
}

/// Lists scheduled appointments that have no mechanic, earliest slot first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_unassigned_appointments(
    conn: &mut SqliteConnection,
) -> Result<Vec<Appointment>, PersistenceError> {
    let rows: Vec<AppointmentRow> = appointments::table
        .filter(appointments::status.eq(AppointmentStatus::Scheduled.as_str()))
        .filter(appointments::assigned_mechanic_id.is_null())
        .order((appointments::slot_date.asc(), appointments::slot_time.asc()))
        .select(AppointmentRow::as_select())
        .load(conn)?;
    assemble(conn, rows)
}

/// Lists appointments created in `[start, end)`.
///
/// Bounds are stored-format timestamps.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_appointments_created_between(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<Vec<Appointment>, PersistenceError> {
    let rows: Vec<AppointmentRow> = appointments::table
        .filter(appointments::created_at.ge(start))
        .filter(appointments::created_at.lt(end))
        .order(appointments::created_at.asc())
        .select(AppointmentRow::as_select())
        .load(conn)?;
    assemble(conn, rows)
}

/// Lists completed appointments whose work finished in `[start, end)`.
///
/// Bounds are stored-format timestamps.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_completed_between(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<Vec<Appointment>, PersistenceError> {
    let rows: Vec<AppointmentRow> = appointments::table
        .filter(appointments::status.eq(AppointmentStatus::Completed.as_str()))
        .filter(appointments::finished_at.ge(start))
        .filter(appointments::finished_at.lt(end))
        .order(appointments::finished_at.asc())
        .select(AppointmentRow::as_select())
        .load(conn)?;
    assemble(conn, rows)
}
