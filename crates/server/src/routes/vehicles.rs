// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Customer vehicle routes.

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    routing::get,
};
use servicebay_api::handlers::vehicles::{
    create_vehicle, delete_vehicle, get_vehicle, list_vehicles, update_vehicle,
};
use servicebay_api::{CreateVehicleRequest, UpdateVehicleRequest, VehicleInfo};
use time::OffsetDateTime;

use super::Envelope;
use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(handle_list_vehicles).post(handle_create_vehicle))
        .route(
            "/vehicles/{id}",
            get(handle_get_vehicle)
                .put(handle_update_vehicle)
                .delete(handle_delete_vehicle),
        )
}

fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

async fn handle_create_vehicle(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<CreateVehicleRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let vehicle: VehicleInfo = create_vehicle(&mut persistence, &req, &user, current_year())?;
    drop(persistence);

    Envelope::created()
        .message("Vehicle added successfully")
        .with("vehicle", &vehicle)
}

async fn handle_list_vehicles(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let vehicles: Vec<VehicleInfo> = list_vehicles(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("vehicles", &vehicles)
}

async fn handle_get_vehicle(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(vehicle_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let vehicle: VehicleInfo = get_vehicle(&mut persistence, vehicle_id, &user)?;
    drop(persistence);

    Envelope::ok().with("vehicle", &vehicle)
}

async fn handle_update_vehicle(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(vehicle_id): Path<i64>,
    Json(req): Json<UpdateVehicleRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let vehicle: VehicleInfo =
        update_vehicle(&mut persistence, vehicle_id, &req, &user, current_year())?;
    drop(persistence);

    Envelope::ok()
        .message("Vehicle updated successfully")
        .with("vehicle", &vehicle)
}

async fn handle_delete_vehicle(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Path(vehicle_id): Path<i64>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    delete_vehicle(&mut persistence, vehicle_id, &user)?;
    drop(persistence);

    Ok(Envelope::ok().message("Vehicle deleted successfully"))
}
