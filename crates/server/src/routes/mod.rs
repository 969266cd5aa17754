// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP routes, grouped by resource.
//!
//! Handlers lock the persistence layer, call into `servicebay-api`, release
//! the lock, hand any outbound email to the notifier, and wrap the result in
//! an [`Envelope`].

pub mod accounts;
pub mod appointments;
pub mod complaints;
pub mod feedback;
pub mod inventory;
pub mod manager;
pub mod reports;
pub mod settings;
pub mod vehicles;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use servicebay_api::ApiResult;

use crate::AppState;
use crate::error::HttpError;

/// Success body: `{success: true, message?, <key>: <value>, count?}`.
#[derive(Debug)]
pub struct Envelope {
    status: StatusCode,
    body: Map<String, Value>,
}

impl Envelope {
    fn with_status(status: StatusCode) -> Self {
        let mut body: Map<String, Value> = Map::new();
        body.insert(String::from("success"), Value::Bool(true));
        Self { status, body }
    }

    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK)
    }

    pub fn created() -> Self {
        Self::with_status(StatusCode::CREATED)
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.body
            .insert(String::from("message"), Value::String(message.into()));
        self
    }

    /// Adds one named resource.
    ///
    /// # Errors
    ///
    /// Returns a 500 if the value cannot be serialized.
    pub fn with<T: Serialize>(mut self, key: &str, value: &T) -> Result<Self, HttpError> {
        let value: Value = serde_json::to_value(value)
            .map_err(|e| HttpError::internal(format!("Failed to serialize {key}: {e}")))?;
        self.body.insert(key.to_string(), value);
        Ok(self)
    }

    /// Adds a named list and its `count`.
    ///
    /// # Errors
    ///
    /// Returns a 500 if the list cannot be serialized.
    pub fn list<T: Serialize>(mut self, key: &str, items: &[T]) -> Result<Self, HttpError> {
        self.body
            .insert(String::from("count"), Value::from(items.len()));
        self.with(key, &items)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status, Json(Value::Object(self.body))).into_response()
    }
}

/// Hands a result's emails to the notifier and returns the response.
pub fn deliver<T>(app_state: &AppState, result: ApiResult<T>) -> T {
    app_state.notifier.dispatch_all(result.notifications);
    result.response
}
