// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP error mapping.
//!
//! Every failure leaves the server as `{success: false, message}`. Internal
//! failures carry their detail in a response extension so that
//! [`reveal_internal_detail`] can add it to the body in development mode.

use axum::{
    Json,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use servicebay_api::ApiError;
use tracing::error;

use crate::AppState;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Internal detail, development mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Detail withheld from a 500 response.
#[derive(Debug, Clone)]
struct InternalDetail(String);

const INTERNAL_MESSAGE: &str = "Internal server error";

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error message.
    pub message: String,
    detail: Option<String>,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail: None,
        }
    }

    /// A 500 whose detail is only shown in development mode.
    pub fn internal(detail: impl Into<String>) -> Self {
        let detail: String = detail.into();
        error!(error = %detail, "Internal error");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::from(INTERNAL_MESSAGE),
            detail: Some(detail),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            message: self.message,
            error: None,
        });
        let mut response: Response = (self.status, body).into_response();
        if let Some(detail) = self.detail {
            response.extensions_mut().insert(InternalDetail(detail));
        }
        response
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. }
            | ApiError::DomainRuleViolation { .. }
            | ApiError::PasswordPolicyViolation { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::NotificationFailed { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { message } => return Self::internal(message.clone()),
        };
        Self::new(status, err.to_string())
    }
}

/// Adds the withheld detail to 500 responses when running in development
/// mode. Installed as the outermost response mapper.
pub async fn reveal_internal_detail(
    AxumState(app_state): AxumState<AppState>,
    response: Response,
) -> Response {
    if !app_state.dev_mode {
        return response;
    }
    let Some(InternalDetail(detail)) = response.extensions().get::<InternalDetail>().cloned()
    else {
        return response;
    };

    let body: Json<ErrorResponse> = Json(ErrorResponse {
        success: false,
        message: String::from(INTERNAL_MESSAGE),
        error: Some(detail),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
