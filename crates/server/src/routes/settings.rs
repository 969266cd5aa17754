// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Json, Router, extract::State as AxumState, routing::get};
use servicebay_api::handlers::settings::{get_settings, update_settings};
use servicebay_api::{SettingsInfo, UpdateSettingsRequest};

use super::Envelope;
use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(handle_get_settings).put(handle_update_settings),
    )
}

async fn handle_get_settings(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let settings: SettingsInfo = get_settings(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().with("settings", &settings)
}

async fn handle_update_settings(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let settings: SettingsInfo = update_settings(&mut persistence, &req, &user)?;
    drop(persistence);

    Envelope::ok()
        .message("Settings updated")
        .with("settings", &settings)
}
