// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Json, Router,
    extract::State as AxumState,
    routing::get,
};
use servicebay_api::handlers::feedback::{
    list_feedback, list_my_feedback, mechanic_ratings, submit_feedback,
};
use servicebay_api::{FeedbackInfo, MechanicRatingInfo, SubmitFeedbackRequest};
use time::OffsetDateTime;

use super::Envelope;
use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/feedback",
            get(handle_list_feedback).post(handle_submit_feedback),
        )
        .route("/feedback/my-feedback", get(handle_my_feedback))
        .route("/feedback/mechanic-ratings", get(handle_mechanic_ratings))
}

async fn handle_submit_feedback(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<SubmitFeedbackRequest>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let feedback: FeedbackInfo =
        submit_feedback(&mut persistence, &req, &user, OffsetDateTime::now_utc())?;
    drop(persistence);

    Envelope::created()
        .message("Thank you for your feedback")
        .with("feedback", &feedback)
}

async fn handle_list_feedback(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let feedback: Vec<FeedbackInfo> = list_feedback(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("feedback", &feedback)
}

async fn handle_my_feedback(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let feedback: Vec<FeedbackInfo> = list_my_feedback(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("feedback", &feedback)
}

async fn handle_mechanic_ratings(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let ratings: Vec<MechanicRatingInfo> = mechanic_ratings(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().list("ratings", &ratings)
}
