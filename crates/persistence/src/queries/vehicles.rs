// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vehicle queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicebay_domain::{RegistrationNumber, Vehicle};

use crate::diesel_schema::vehicles;
use crate::error::PersistenceError;

/// Diesel Queryable struct for vehicle rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = vehicles)]
struct VehicleRow {
    vehicle_id: i64,
    customer_id: i64,
    make: String,
    model: String,
    year: i32,
    registration_number: String,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = PersistenceError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_id: Some(row.vehicle_id),
            customer_id: row.customer_id,
            make: row.make,
            model: row.model,
            year: row.year,
            registration_number: RegistrationNumber::parse(&row.registration_number)?,
        })
    }
}

/// Retrieves a vehicle by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the vehicle is not found.
pub fn get_vehicle(
    conn: &mut SqliteConnection,
    vehicle_id: i64,
) -> Result<Option<Vehicle>, PersistenceError> {
    let result: Result<VehicleRow, diesel::result::Error> = vehicles::table
        .filter(vehicles::vehicle_id.eq(vehicle_id))
        .select(VehicleRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Vehicle::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists a customer's vehicles, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_vehicles_for_customer(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Vec<Vehicle>, PersistenceError> {
    let rows: Vec<VehicleRow> = vehicles::table
        .filter(vehicles::customer_id.eq(customer_id))
        .order(vehicles::vehicle_id.desc())
        .select(VehicleRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Vehicle::try_from).collect()
}
