// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Registration, login and session routes.

use axum::{
    Json, Router,
    extract::State as AxumState,
    routing::{get, post},
};
use servicebay_api::handlers::accounts::{
    bootstrap_manager, login, logout, register_customer, whoami,
};
use servicebay_api::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use tracing::info;

use super::Envelope;
use crate::AppState;
use crate::error::HttpError;
use crate::session::{SessionToken, SessionUser};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handle_register))
        .route("/auth/bootstrap-manager", post(handle_bootstrap_manager))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/me", get(handle_me))
}

/// Handler for POST `/auth/register`.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = register_customer(&mut persistence, &req)?;
    drop(persistence);

    Envelope::created()
        .message("Registration successful")
        .with("user", &user)
}

/// Handler for POST `/auth/bootstrap-manager`.
///
/// Only succeeds while no manager account exists.
async fn handle_bootstrap_manager(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = bootstrap_manager(&mut persistence, &req)?;
    drop(persistence);

    Envelope::created()
        .message("Manager account created")
        .with("user", &user)
}

/// Handler for POST `/auth/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = login(&mut persistence, &req, app_state.session_ttl)?;
    drop(persistence);

    Envelope::ok()
        .message("Login successful")
        .with("session_token", &response.session_token)?
        .with("expires_at", &response.expires_at)?
        .with("user", &response.user)
}

/// Handler for POST `/auth/logout`.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionToken(token): SessionToken,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, &token)?;
    drop(persistence);

    info!("Session ended");
    Ok(Envelope::ok().message("Logged out"))
}

/// Handler for GET `/auth/me`.
async fn handle_me(SessionUser(_user, record): SessionUser) -> Result<Envelope, HttpError> {
    Envelope::ok().with("user", &whoami(&record))
}
