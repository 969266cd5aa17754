// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking routes and the mechanic job card.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    routing::{get, put},
};
use servicebay_api::handlers::appointments::{
    cancel_appointment, create_appointment, get_appointment, list_appointments,
    list_mechanic_jobs, list_my_appointments, update_job_card,
};
use servicebay_api::{ApiResult, AppointmentInfo, BookAppointmentRequest, JobCardRequest};
use time::OffsetDateTime;

use super::{Envelope, deliver};
use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/appointments",
            get(handle_list_appointments).post(handle_create_appointment),
        )
        .route("/appointments/my-appointments", get(handle_my_appointments))
        .route("/appointments/{id}", get(handle_get_appointment))
        .route("/appointments/{id}/cancel", put(handle_cancel_appointment))
        .route("/mechanic/jobs", get(handle_mechanic_jobs))
        .route("/mechanic/jobs/{id}/job-card", put(handle_update_job_card))
}

/// Handler for POST `/appointments`.
///
/// The confirmation email is sent in the background once the booking is
/// stored.
async fn handle_create_appointment(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<BookAppointmentRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<AppointmentInfo> =
        create_appointment(&mut persistence, &req, &user, OffsetDateTime::now_utc())?;
    drop(persistence);

    let appointment: AppointmentInfo = deliver(&app_state, result);
    Envelope::created()
        .message("Appointment booked successfully")
        .with("appointment", &appointment)
}

async fn handle_my_appointments(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let appointments: Vec<AppointmentInfo> = list_my_appointments(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("appointments", &appointments)
}

/// Handler for GET `/appointments`.
///
/// Managers receive every appointment; mechanics only their own.
async fn handle_list_appointments(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let appointments: Vec<AppointmentInfo> = list_appointments(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("appointments", &appointments)
}

async fn handle_get_appointment(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(appointment_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let appointment: AppointmentInfo = get_appointment(&mut persistence, appointment_id, &user)?;
    drop(persistence);

    Envelope::ok().with("appointment", &appointment)
}

async fn handle_cancel_appointment(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(appointment_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let appointment: AppointmentInfo = cancel_appointment(
        &mut persistence,
        appointment_id,
        &user,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Envelope::ok()
        .message("Appointment cancelled successfully")
        .with("appointment", &appointment)
}

async fn handle_mechanic_jobs(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let jobs: Vec<AppointmentInfo> = list_mechanic_jobs(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("jobs", &jobs)
}

/// Handler for PUT `/mechanic/jobs/{id}/job-card`.
async fn handle_update_job_card(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(appointment_id): Path<i64>,
    Json(req): Json<JobCardRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let appointment: AppointmentInfo = update_job_card(
        &mut persistence,
        appointment_id,
        &req,
        &user,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Envelope::ok()
        .message("Job card updated successfully")
        .with("appointment", &appointment)
}
