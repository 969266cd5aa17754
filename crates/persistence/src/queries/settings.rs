// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::OffPeakDays;
use tracing::debug;

use crate::diesel_schema::settings;
use crate::error::PersistenceError;

/// The settings table holds at most this one row.
pub(crate) const SETTINGS_ID: i32 = 1;

/// Loads the configured off-peak days, or the default pair if none are saved.
///
/// # Errors
///
/// Returns an error if the query fails or the stored list is unreadable.
pub fn load_off_peak_days(conn: &mut SqliteConnection) -> Result<OffPeakDays, PersistenceError> {
    let stored: Option<String> = settings::table
        .filter(settings::settings_id.eq(SETTINGS_ID))
        .select(settings::off_peak_days)
        .first(conn)
        .optional()?;

    let Some(json) = stored else {
        debug!("No settings saved; using default off-peak days");
        return Ok(OffPeakDays::default());
    };

    let names: Vec<String> = serde_json::from_str(&json)?;
    Ok(OffPeakDays::from_names(&names)?)
}
