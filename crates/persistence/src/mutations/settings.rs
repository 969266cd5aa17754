// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::OffPeakDays;
use tracing::info;

use crate::diesel_schema::settings;
use crate::error::PersistenceError;
use crate::queries::settings::SETTINGS_ID;
use crate::timestamps::now_timestamp;

/// Replaces the off-peak day set.
///
/// Days are stored as a JSON array of weekday names.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_off_peak_days(
    conn: &mut SqliteConnection,
    days: &OffPeakDays,
) -> Result<(), PersistenceError> {
    let names: Vec<String> = days.names();
    info!(days = ?names, "Saving off-peak days");

    diesel::replace_into(settings::table)
        .values((
            settings::settings_id.eq(SETTINGS_ID),
            settings::off_peak_days.eq(serde_json::to_string(&names)?),
            settings::updated_at.eq(now_timestamp()?),
        ))
        .execute(conn)?;
    Ok(())
}
