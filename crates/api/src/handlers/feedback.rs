// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Post-service feedback and mechanic ratings.

use servicebay::{Command, MechanicRating, mechanic_ratings as rollup_mechanic_ratings};
use servicebay_domain::Feedback;
use servicebay_persistence::SqlitePersistence;
use time::OffsetDateTime;
use tracing::info;

use super::{feedback_info, lookup_person, run_command};
use crate::auth::{Action, AuthenticatedUser, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{FeedbackInfo, MechanicRatingInfo, SubmitFeedbackRequest};

/// Records feedback for one of the caller's completed appointments.
///
/// The feedback row and the appointment's submitted flag are written
/// together.
///
/// # Errors
///
/// Returns an error if:
/// - The rating is outside 1..=5
/// - The caller does not own the appointment
/// - The appointment is not completed or already has feedback
pub fn submit_feedback(
    persistence: &mut SqlitePersistence,
    request: &SubmitFeedbackRequest,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<FeedbackInfo, ApiError> {
    AuthorizationService::authorize(user, Action::SubmitFeedback)?;

    run_command(
        persistence,
        request.appointment_id,
        Command::SubmitFeedback {
            rating: request.rating,
            comment: request.comment.clone(),
        },
        user,
        now,
    )?;

    let stored: Feedback = persistence
        .list_feedback_for_customer(user.user_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .find(|f| f.appointment_id == request.appointment_id)
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Feedback not found after submission"),
        })?;

    info!(
        appointment_id = request.appointment_id,
        rating = stored.rating.value(),
        "Feedback submitted"
    );
    feedback_info(&stored)
}

/// Lists all feedback, newest first.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn list_feedback(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<FeedbackInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ViewAllFeedback)?;

    persistence
        .list_feedback()
        .map_err(translate_persistence_error)?
        .iter()
        .map(feedback_info)
        .collect()
}

/// Lists the caller's own feedback.
///
/// # Errors
///
/// Returns an error if the caller is not a customer or the query fails.
pub fn list_my_feedback(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<FeedbackInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ViewOwnFeedback)?;

    persistence
        .list_feedback_for_customer(user.user_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(feedback_info)
        .collect()
}

/// Average rating per mechanic, best first, with the mechanic's name.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or a query fails.
pub fn mechanic_ratings(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<MechanicRatingInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ViewAllFeedback)?;

    let feedback: Vec<Feedback> = persistence
        .list_feedback()
        .map_err(translate_persistence_error)?;
    let ratings: Vec<MechanicRating> = rollup_mechanic_ratings(&feedback);

    ratings
        .into_iter()
        .map(|rating| {
            Ok(MechanicRatingInfo {
                mechanic_id: rating.mechanic_id,
                mechanic_name: lookup_person(persistence, Some(rating.mechanic_id))?
                    .map(|p| p.name),
                average_rating: rating.average_rating,
                review_count: rating.review_count,
            })
        })
        .collect()
}
