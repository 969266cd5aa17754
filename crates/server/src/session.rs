// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! This module provides Axum extractors for validating session tokens
//! and enforcing authentication at the server boundary.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use servicebay_api::{AuthenticatedUser, AuthenticationService};
use servicebay_persistence::UserData;
use tracing::{debug, warn};

use crate::AppState;
use crate::error::ErrorResponse;

/// Extractor for the raw bearer token, without validating it.
pub struct SessionToken(pub String);

/// Extractor for authenticated users.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionUser(user, record): SessionUser,
/// ) -> Result<Envelope, HttpError> {
///     // user: AuthenticatedUser
///     // record: UserData
/// }
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Look the token up via `AuthenticationService::validate_session`
/// 3. Reject expired sessions and sessions whose user was deleted
///
/// # Errors
///
/// Returns HTTP 401 if the header is missing or malformed, or the session
/// is unknown or expired.
pub struct SessionUser(pub AuthenticatedUser, pub UserData);

fn bearer_token(parts: &Parts) -> Result<&str, SessionError> {
    let header: &str = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            SessionError::InvalidAuthorizationHeader
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        SessionError::InvalidAuthorizationHeader
    })
}

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(bearer_token(parts)?.to_string()))
    }
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: &str = bearer_token(parts)?;

        let mut persistence = state.persistence.lock().await;
        let (user, record): (AuthenticatedUser, UserData) =
            AuthenticationService::validate_session(&mut persistence, token).map_err(|e| {
                warn!(error = %e, "Session validation failed");
                SessionError::InvalidSession(e.to_string())
            })?;
        drop(persistence);

        debug!(user_id = user.user_id, role = %user.role, "Session validated");
        Ok(Self(user, record))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Not authorized, no token"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Not authorized: {reason}"),
        };

        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            message,
            error: None,
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
