// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint queries.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use servicebay_domain::{Complaint, ComplaintPriority, ComplaintStatus};

use crate::diesel_schema::complaints;
use crate::error::PersistenceError;
use crate::timestamps::{parse_optional_timestamp, parse_timestamp};

#[derive(Queryable, Selectable)]
#[diesel(table_name = complaints)]
struct ComplaintRow {
    complaint_id: i64,
    customer_id: i64,
    appointment_id: Option<i64>,
    subject: String,
    description: String,
    status: String,
    priority: String,
    manager_response: Option<String>,
    resolved_by: Option<i64>,
    resolved_at: Option<String>,
    created_at: String,
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = PersistenceError;

    fn try_from(row: ComplaintRow) -> Result<Self, Self::Error> {
        Ok(Self {
            complaint_id: Some(row.complaint_id),
            customer_id: row.customer_id,
            appointment_id: row.appointment_id,
            subject: row.subject,
            description: row.description,
            status: ComplaintStatus::from_str(&row.status)?,
            priority: ComplaintPriority::from_str(&row.priority)?,
            manager_response: row.manager_response,
            resolved_by: row.resolved_by,
            resolved_at: parse_optional_timestamp(row.resolved_at.as_deref())?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Retrieves a complaint by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the complaint is not found.
pub fn get_complaint(
    conn: &mut SqliteConnection,
    complaint_id: i64,
) -> Result<Option<Complaint>, PersistenceError> {
    let result: Result<ComplaintRow, diesel::result::Error> = complaints::table
        .filter(complaints::complaint_id.eq(complaint_id))
        .select(ComplaintRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Complaint::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists complaints newest first, optionally restricted to one status.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_complaints(
    conn: &mut SqliteConnection,
    status: Option<ComplaintStatus>,
) -> Result<Vec<Complaint>, PersistenceError> {
    let mut query = complaints::table
        .select(ComplaintRow::as_select())
        .order((complaints::created_at.desc(), complaints::complaint_id.desc()))
        .into_boxed::<Sqlite>();
    if let Some(status) = status {
        query = query.filter(complaints::status.eq(status.as_str()));
    }

    let rows: Vec<ComplaintRow> = query.load(conn)?;
    rows.into_iter().map(Complaint::try_from).collect()
}

/// Lists a customer's complaints, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_complaints_for_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Vec<Complaint>, PersistenceError> {
    let rows: Vec<ComplaintRow> = complaints::table
        .filter(complaints::customer_id.eq(customer_id))
        .order((complaints::created_at.desc(), complaints::complaint_id.desc()))
        .select(ComplaintRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Complaint::try_from).collect()
}

/// Lists complaints filed in `[start, end)`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_complaints_created_between(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<Vec<Complaint>, PersistenceError> {
    let rows: Vec<ComplaintRow> = complaints::table
        .filter(complaints::created_at.ge(start))
        .filter(complaints::created_at.lt(end))
        .order(complaints::created_at.asc())
        .select(ComplaintRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Complaint::try_from).collect()
}
