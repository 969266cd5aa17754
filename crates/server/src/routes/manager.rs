// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The manager desk: mechanic accounts, job assignment and stock handling.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    routing::{delete, get, post, put},
};
use servicebay_api::handlers::accounts::{create_mechanic, delete_mechanic, list_mechanics};
use servicebay_api::handlers::appointments::{assign_mechanic, list_unassigned_jobs};
use servicebay_api::handlers::inventory::{email_order, receive_stock};
use servicebay_api::{
    ApiResult, AppointmentInfo, AssignMechanicRequest, CreateMechanicRequest, EmailOrderRequest,
    InventoryItemInfo, ReceiveStockRequest, UserInfo,
};
use time::OffsetDateTime;

use super::{Envelope, deliver};
use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/manager/mechanics",
            get(handle_list_mechanics).post(handle_create_mechanic),
        )
        .route("/manager/mechanics/{id}", delete(handle_delete_mechanic))
        .route("/manager/jobs/unassigned", get(handle_unassigned_jobs))
        .route("/manager/jobs/assign/{id}", put(handle_assign_mechanic))
        .route("/manager/inventory/order/{id}", post(handle_email_order))
        .route("/manager/inventory/receive/{id}", put(handle_receive_stock))
}

async fn handle_list_mechanics(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mechanics: Vec<UserInfo> = list_mechanics(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("mechanics", &mechanics)
}

async fn handle_create_mechanic(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<CreateMechanicRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let mechanic: UserInfo = create_mechanic(&mut persistence, &req, &user)?;
    drop(persistence);

    Envelope::created()
        .message("Mechanic account created")
        .with("mechanic", &mechanic)
}

async fn handle_delete_mechanic(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(mechanic_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    delete_mechanic(&mut persistence, mechanic_id, &user)?;
    drop(persistence);

    Ok(Envelope::ok().message("Mechanic account deleted"))
}

async fn handle_unassigned_jobs(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let jobs: Vec<AppointmentInfo> = list_unassigned_jobs(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("jobs", &jobs)
}

async fn handle_assign_mechanic(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(appointment_id): Path<i64>,
    Json(req): Json<AssignMechanicRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let appointment: AppointmentInfo = assign_mechanic(
        &mut persistence,
        appointment_id,
        &req,
        &user,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Envelope::ok()
        .message("Mechanic assigned successfully")
        .with("appointment", &appointment)
}

/// Handler for POST `/manager/inventory/order/{id}`.
///
/// Succeeds once the email is queued; delivery is best-effort.
async fn handle_email_order(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(item_id): Path<i64>,
    Json(req): Json<EmailOrderRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<()> = email_order(&mut persistence, item_id, &req, &user)?;
    drop(persistence);

    deliver(&app_state, result);
    Ok(Envelope::ok().message(format!(
        "Order email sent to {}",
        req.supplier_email.trim()
    )))
}

async fn handle_receive_stock(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(item_id): Path<i64>,
    Json(req): Json<ReceiveStockRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let item: InventoryItemInfo = receive_stock(&mut persistence, item_id, &req, &user)?;
    drop(persistence);

    Envelope::ok()
        .message(format!("Received {} {}", req.quantity_received, item.unit))
        .with("item", &item)
}
