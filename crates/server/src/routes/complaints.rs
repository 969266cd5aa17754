// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Complaint routes.
//!
//! Filing a complaint emails the manager; resolving or closing one emails
//! the customer.

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    routing::get,
};
use servicebay_api::handlers::complaints::{
    complaint_stats, delete_complaint, file_complaint, get_complaint, list_complaints,
    list_my_complaints, update_complaint,
};
use servicebay_api::{
    ApiResult, ComplaintInfo, ComplaintListQuery, ComplaintStatsResponse, CreateComplaintRequest,
    UpdateComplaintRequest,
};
use time::OffsetDateTime;

use super::{Envelope, deliver};
use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/complaints",
            get(handle_list_complaints).post(handle_file_complaint),
        )
        .route("/complaints/my-complaints", get(handle_my_complaints))
        .route("/complaints/stats", get(handle_complaint_stats))
        .route(
            "/complaints/{id}",
            get(handle_get_complaint)
                .put(handle_update_complaint)
                .delete(handle_delete_complaint),
        )
}

async fn handle_file_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<CreateComplaintRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintInfo> = file_complaint(
        &mut persistence,
        &req,
        &user,
        &app_state.contacts,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    let complaint: ComplaintInfo = deliver(&app_state, result);
    Envelope::created()
        .message("Complaint submitted successfully")
        .with("complaint", &complaint)
}

/// Handler for GET `/complaints`, optionally filtered by `?status=`.
async fn handle_list_complaints(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(query): Query<ComplaintListQuery>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let complaints: Vec<ComplaintInfo> =
        list_complaints(&mut persistence, query.status.as_deref(), &user)?;
    drop(persistence);

    Envelope::ok().list("complaints", &complaints)
}

async fn handle_my_complaints(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let complaints: Vec<ComplaintInfo> = list_my_complaints(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("complaints", &complaints)
}

async fn handle_complaint_stats(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let stats: ComplaintStatsResponse = complaint_stats(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().with("stats", &stats)
}

async fn handle_get_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(complaint_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let complaint: ComplaintInfo = get_complaint(&mut persistence, complaint_id, &user)?;
    drop(persistence);

    Envelope::ok().with("complaint", &complaint)
}

async fn handle_update_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(complaint_id): Path<i64>,
    Json(req): Json<UpdateComplaintRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ComplaintInfo> = update_complaint(
        &mut persistence,
        complaint_id,
        &req,
        &user,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    let complaint: ComplaintInfo = deliver(&app_state, result);
    Envelope::ok()
        .message("Complaint updated successfully")
        .with("complaint", &complaint)
}

async fn handle_delete_complaint(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(complaint_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    delete_complaint(&mut persistence, complaint_id, &user)?;
    drop(persistence);

    Ok(Envelope::ok().message("Complaint deleted"))
}
