// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Off-peak day settings.

use servicebay_domain::OffPeakDays;
use servicebay_persistence::SqlitePersistence;
use tracing::info;

use crate::auth::{Action, AuthenticatedUser, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{SettingsInfo, UpdateSettingsRequest};

/// Returns the configured off-peak days.
///
/// # Errors
///
/// Returns an error if the stored setting cannot be read.
pub fn get_settings(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<SettingsInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ViewSettings)?;

    let days: OffPeakDays = persistence
        .load_off_peak_days()
        .map_err(translate_persistence_error)?;
    Ok(SettingsInfo {
        off_peak_days: days.names(),
    })
}

/// Replaces the off-peak day set.
///
/// Existing appointments keep the discount decision made when they were
/// booked.
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the set is empty, or a
/// weekday name is unknown.
pub fn update_settings(
    persistence: &mut SqlitePersistence,
    request: &UpdateSettingsRequest,
    user: &AuthenticatedUser,
) -> Result<SettingsInfo, ApiError> {
    AuthorizationService::authorize(user, Action::UpdateSettings)?;

    let days: OffPeakDays =
        OffPeakDays::from_names(&request.off_peak_days).map_err(translate_domain_error)?;
    persistence
        .save_off_peak_days(&days)
        .map_err(translate_persistence_error)?;

    info!(off_peak_days = ?days.names(), updated_by = user.user_id, "Off-peak days updated");
    Ok(SettingsInfo {
        off_peak_days: days.names(),
    })
}
