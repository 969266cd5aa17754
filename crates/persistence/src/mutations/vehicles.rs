// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vehicle mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::Vehicle;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::vehicles;
use crate::error::{PersistenceError, conflict_as};
use crate::timestamps::now_timestamp;

const DUPLICATE_REGISTRATION: &str = "A vehicle with this registration number already exists";

/// Registers a vehicle.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the registration number is taken.
pub fn insert_vehicle(
    conn: &mut SqliteConnection,
    vehicle: &Vehicle,
) -> Result<i64, PersistenceError> {
    info!(
        customer_id = vehicle.customer_id,
        registration = %vehicle.registration_number,
        "Registering vehicle"
    );

    diesel::insert_into(vehicles::table)
        .values((
            vehicles::customer_id.eq(vehicle.customer_id),
            vehicles::make.eq(&vehicle.make),
            vehicles::model.eq(&vehicle.model),
            vehicles::year.eq(vehicle.year),
            vehicles::registration_number.eq(vehicle.registration_number.value()),
            vehicles::created_at.eq(now_timestamp()?),
        ))
        .execute(conn)
        .map_err(|e| conflict_as(e, DUPLICATE_REGISTRATION))?;

    get_last_insert_rowid(conn)
}

/// Overwrites a vehicle's details. Ownership never changes.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the vehicle does not exist, or
/// `PersistenceError::Conflict` if the new registration number is taken.
pub fn update_vehicle(
    conn: &mut SqliteConnection,
    vehicle_id: i64,
    vehicle: &Vehicle,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(vehicles::table)
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .set((
            vehicles::make.eq(&vehicle.make),
            vehicles::model.eq(&vehicle.model),
            vehicles::year.eq(vehicle.year),
            vehicles::registration_number.eq(vehicle.registration_number.value()),
        ))
        .execute(conn)
        .map_err(|e| conflict_as(e, DUPLICATE_REGISTRATION))?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Vehicle with ID {vehicle_id} not found"
        )));
    }
    Ok(())
}

/// Deletes a vehicle.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the vehicle does not exist.
pub fn delete_vehicle(conn: &mut SqliteConnection, vehicle_id: i64) -> Result<(), PersistenceError> {
    info!(vehicle_id, "Deleting vehicle");

    let rows_affected: usize = diesel::delete(vehicles::table)
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Vehicle with ID {vehicle_id} not found"
        )));
    }
    Ok(())
}
