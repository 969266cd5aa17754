// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::Complaint;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::complaints;
use crate::error::PersistenceError;
use crate::timestamps::{format_optional_timestamp, format_timestamp, now_timestamp};

/// Inserts a new complaint.
///
/// # Errors
///
/// Returns an error if the database insert fails.
pub fn insert_complaint(
    conn: &mut SqliteConnection,
    complaint: &Complaint,
) -> Result<i64, PersistenceError> {
    info!(
        customer_id = complaint.customer_id,
        priority = %complaint.priority,
        "Filing complaint"
    );

    diesel::insert_into(complaints::table)
        .values((
            complaints::customer_id.eq(complaint.customer_id),
            complaints::appointment_id.eq(complaint.appointment_id),
            complaints::subject.eq(&complaint.subject),
            complaints::description.eq(&complaint.description),
            complaints::status.eq(complaint.status.as_str()),
            complaints::priority.eq(complaint.priority.as_str()),
            complaints::manager_response.eq(complaint.manager_response.as_deref()),
            complaints::resolved_by.eq(complaint.resolved_by),
            complaints::resolved_at.eq(format_optional_timestamp(complaint.resolved_at)?),
            complaints::created_at.eq(format_timestamp(complaint.created_at)?),
            complaints::updated_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    get_last_insert_rowid(conn)
}

/// Writes a manager's edits to a complaint.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the complaint does not exist.
pub fn update_complaint(
    conn: &mut SqliteConnection,
    complaint_id: i64,
    complaint: &Complaint,
) -> Result<(), PersistenceError> {
    info!(complaint_id, status = %complaint.status, "Updating complaint");

    let rows_affected: usize = diesel::update(complaints::table)
        .filter(complaints::complaint_id.eq(complaint_id))
        .set((
            complaints::status.eq(complaint.status.as_str()),
            complaints::priority.eq(complaint.priority.as_str()),
            complaints::manager_response.eq(complaint.manager_response.as_deref()),
            complaints::resolved_by.eq(complaint.resolved_by),
            complaints::resolved_at.eq(format_optional_timestamp(complaint.resolved_at)?),
            complaints::updated_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Complaint with ID {complaint_id} not found"
        )));
    }
    Ok(())
}

/// Deletes a complaint.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the complaint does not exist.
pub fn delete_complaint(
    conn: &mut SqliteConnection,
    complaint_id: i64,
) -> Result<(), PersistenceError> {
    info!(complaint_id, "Deleting complaint");

    let rows_affected: usize = diesel::delete(complaints::table)
        .filter(complaints::complaint_id.eq(complaint_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Complaint with ID {complaint_id} not found"
        )));
    }
    Ok(())
}
