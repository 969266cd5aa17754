// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Owner-scoped vehicle management.

use servicebay_domain::{RegistrationNumber, Vehicle, validate_vehicle};
use servicebay_persistence::SqlitePersistence;
use tracing::info;

use super::{not_found, vehicle_info};
use crate::auth::{Action, AuthenticatedUser, AuthorizationService};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{CreateVehicleRequest, UpdateVehicleRequest, VehicleInfo};

/// Loads a vehicle and checks that `user` owns it.
fn load_owned_vehicle(
    persistence: &mut SqlitePersistence,
    vehicle_id: i64,
    user: &AuthenticatedUser,
) -> Result<Vehicle, ApiError> {
    let vehicle: Vehicle = persistence
        .get_vehicle(vehicle_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Vehicle", format!("Vehicle with ID {vehicle_id} not found")))?;

    if vehicle.customer_id != user.user_id {
        return Err(ApiError::Forbidden {
            message: String::from("You do not own this vehicle"),
        });
    }
    Ok(vehicle)
}

/// Registers a vehicle to the calling customer.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The vehicle details
/// * `user` - The calling customer
/// * `current_year` - The current calendar year, bounding the model year
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not a customer
/// - A field fails validation
/// - The registration number is already registered
pub fn create_vehicle(
    persistence: &mut SqlitePersistence,
    request: &CreateVehicleRequest,
    user: &AuthenticatedUser,
    current_year: i32,
) -> Result<VehicleInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ManageVehicles)?;

    let mut vehicle: Vehicle = Vehicle {
        vehicle_id: None,
        customer_id: user.user_id,
        make: request.make.trim().to_string(),
        model: request.model.trim().to_string(),
        year: request.year,
        registration_number: RegistrationNumber::parse(&request.registration_number)
            .map_err(translate_domain_error)?,
    };
    validate_vehicle(&vehicle, current_year).map_err(translate_domain_error)?;

    let vehicle_id: i64 = persistence
        .insert_vehicle(&vehicle)
        .map_err(translate_persistence_error)?;
    vehicle.vehicle_id = Some(vehicle_id);

    info!(
        vehicle_id,
        customer_id = user.user_id,
        registration = %vehicle.registration_number,
        "Vehicle registered"
    );
    vehicle_info(&vehicle)
}

/// Lists the caller's vehicles, newest first.
///
/// # Errors
///
/// Returns an error if the caller is not a customer or the query fails.
pub fn list_vehicles(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<Vec<VehicleInfo>, ApiError> {
    AuthorizationService::authorize(user, Action::ManageVehicles)?;

    persistence
        .list_vehicles_for_customer(user.user_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(vehicle_info)
        .collect()
}

/// Fetches one of the caller's vehicles.
///
/// # Errors
///
/// Returns an error if the vehicle does not exist or belongs to someone else.
pub fn get_vehicle(
    persistence: &mut SqlitePersistence,
    vehicle_id: i64,
    user: &AuthenticatedUser,
) -> Result<VehicleInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ManageVehicles)?;
    vehicle_info(&load_owned_vehicle(persistence, vehicle_id, user)?)
}

/// Applies a partial update to one of the caller's vehicles.
///
/// # Errors
///
/// Returns an error if the vehicle is not the caller's, a field fails
/// validation, or the new registration number is taken.
pub fn update_vehicle(
    persistence: &mut SqlitePersistence,
    vehicle_id: i64,
    request: &UpdateVehicleRequest,
    user: &AuthenticatedUser,
    current_year: i32,
) -> Result<VehicleInfo, ApiError> {
    AuthorizationService::authorize(user, Action::ManageVehicles)?;

    let mut vehicle: Vehicle = load_owned_vehicle(persistence, vehicle_id, user)?;
    if let Some(make) = &request.make {
        vehicle.make = make.trim().to_string();
    }
    if let Some(model) = &request.model {
        vehicle.model = model.trim().to_string();
    }
    if let Some(year) = request.year {
        vehicle.year = year;
    }
    if let Some(registration) = &request.registration_number {
        vehicle.registration_number =
            RegistrationNumber::parse(registration).map_err(translate_domain_error)?;
    }
    validate_vehicle(&vehicle, current_year).map_err(translate_domain_error)?;

    persistence
        .update_vehicle(vehicle_id, &vehicle)
        .map_err(translate_persistence_error)?;

    info!(vehicle_id, "Vehicle updated");
    vehicle_info(&vehicle)
}

/// Deletes one of the caller's vehicles.
///
/// # Errors
///
/// Returns an error if the vehicle is not the caller's or the delete fails.
pub fn delete_vehicle(
    persistence: &mut SqlitePersistence,
    vehicle_id: i64,
    user: &AuthenticatedUser,
) -> Result<(), ApiError> {
    AuthorizationService::authorize(user, Action::ManageVehicles)?;
    load_owned_vehicle(persistence, vehicle_id, user)?;

    persistence
        .delete_vehicle(vehicle_id)
        .map_err(translate_persistence_error)?;

    info!(vehicle_id, "Vehicle deleted");
    Ok(())
}
