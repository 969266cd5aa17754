// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Feedback queries. Feedback is only ever written alongside its
//! appointment, see `mutations::appointments::persist_transition`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::{Feedback, Rating};

use crate::diesel_schema::feedback;
use crate::error::PersistenceError;
use crate::timestamps::parse_timestamp;

#[derive(Queryable, Selectable)]
#[diesel(table_name = feedback)]
struct FeedbackRow {
    feedback_id: i64,
    appointment_id: i64,
    customer_id: i64,
    mechanic_id: Option<i64>,
    rating: i32,
    comment: Option<String>,
    created_at: String,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = PersistenceError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        Ok(Self {
            feedback_id: Some(row.feedback_id),
            appointment_id: row.appointment_id,
            customer_id: row.customer_id,
            mechanic_id: row.mechanic_id,
            rating: Rating::new(i64::from(row.rating))?,
            comment: row.comment,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Lists all feedback, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_feedback(conn: &mut SqliteConnection) -> Result<Vec<Feedback>, PersistenceError> {
    let rows: Vec<FeedbackRow> = feedback::table
        .order((feedback::created_at.desc(), feedback::feedback_id.desc()))
        .select(FeedbackRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Feedback::try_from).collect()
}

/// Lists a customer's feedback, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_feedback_for_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Vec<Feedback>, PersistenceError> {
    let rows: Vec<FeedbackRow> = feedback::table
        .filter(feedback::customer_id.eq(customer_id))
        .order((feedback::created_at.desc(), feedback::feedback_id.desc()))
        .select(FeedbackRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Feedback::try_from).collect()
}

/// Lists feedback submitted in `[start, end)`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_feedback_created_between(
    conn: &mut SqliteConnection,
    start: &str,
    end: &str,
) -> Result<Vec<Feedback>, PersistenceError> {
    let rows: Vec<FeedbackRow> = feedback::table
        .filter(feedback::created_at.ge(start))
        .filter(feedback::created_at.lt(end))
        .order(feedback::created_at.asc())
        .select(FeedbackRow::as_select())
        .load(conn)?;
    rows.into_iter().map(Feedback::try_from).collect()
}
