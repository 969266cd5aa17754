// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use servicebay_domain::Role;
use servicebay_persistence::SqlitePersistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::handlers::appointments::{assign_mechanic, create_appointment, update_job_card};
use crate::handlers::inventory::create_inventory_item;
use crate::handlers::vehicles::create_vehicle;
use crate::{
    AppointmentInfo, AssignMechanicRequest, AuthenticatedUser, BookAppointmentRequest,
    CreateInventoryItemRequest, CreateVehicleRequest, JobCardRequest, LaborLineRequest,
};

pub const TEST_PASSWORD: &str = "Garage2026!";

/// A Monday, which is off-peak under the default settings.
pub const OFF_PEAK_DATE: &str = "2026-06-01";

/// A Wednesday.
pub const PEAK_DATE: &str = "2026-06-03";

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-05-20 09:00 UTC)
}

pub fn setup_test_persistence() -> SqlitePersistence {
    SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_user(
    persistence: &mut SqlitePersistence,
    name: &str,
    email: &str,
    role: Role,
) -> AuthenticatedUser {
    let user_id = persistence
        .create_user(name, email, TEST_PASSWORD, role, None)
        .expect("Failed to create user");
    AuthenticatedUser::new(user_id, role)
}

pub fn create_test_customer(persistence: &mut SqlitePersistence) -> AuthenticatedUser {
    create_test_user(persistence, "Nimal Perera", "nimal@example.com", Role::Customer)
}

pub fn create_test_manager(persistence: &mut SqlitePersistence) -> AuthenticatedUser {
    create_test_user(persistence, "Maya Silva", "maya@example.com", Role::Manager)
}

pub fn create_test_mechanic(persistence: &mut SqlitePersistence) -> AuthenticatedUser {
    create_test_user(persistence, "Kasun Fernando", "kasun@example.com", Role::Mechanic)
}

pub fn create_test_vehicle(
    persistence: &mut SqlitePersistence,
    customer: &AuthenticatedUser,
    registration: &str,
) -> i64 {
    create_vehicle(
        persistence,
        &CreateVehicleRequest {
            make: String::from("Toyota"),
            model: String::from("Corolla"),
            year: 2018,
            registration_number: registration.to_string(),
        },
        customer,
        2026,
    )
    .expect("Failed to create vehicle")
    .vehicle_id
}

pub fn create_test_item(
    persistence: &mut SqlitePersistence,
    manager: &AuthenticatedUser,
    name: &str,
    quantity: i64,
    sale_price_cents: i64,
) -> i64 {
    create_inventory_item(
        persistence,
        &CreateInventoryItemRequest {
            name: name.to_string(),
            part_number: Some(String::from("OF-100")),
            supplier: Some(String::from("Acme Parts")),
            quantity: Some(quantity),
            unit: None,
            cost_price_cents: sale_price_cents / 2,
            sale_price_cents,
            low_stock_threshold: None,
        },
        manager,
    )
    .expect("Failed to create inventory item")
    .item_id
}

pub fn booking_request(vehicle_id: i64, date: &str, time: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        vehicle_id,
        service_type: String::from("Oil Change"),
        date: date.to_string(),
        time: time.to_string(),
        notes: None,
        description: None,
    }
}

pub fn book_test_appointment(
    persistence: &mut SqlitePersistence,
    customer: &AuthenticatedUser,
    vehicle_id: i64,
    date: &str,
    time: &str,
) -> AppointmentInfo {
    create_appointment(
        persistence,
        &booking_request(vehicle_id, date, time),
        customer,
        test_now(),
    )
    .expect("Failed to book appointment")
    .response
}

/// Books, assigns and completes an appointment with one labor line.
pub fn complete_test_appointment(
    persistence: &mut SqlitePersistence,
    customer: &AuthenticatedUser,
    manager: &AuthenticatedUser,
    mechanic: &AuthenticatedUser,
    vehicle_id: i64,
    date: &str,
) -> AppointmentInfo {
    let booked = book_test_appointment(persistence, customer, vehicle_id, date, "10:00");
    let id = booked.appointment_id;

    assign_mechanic(
        persistence,
        id,
        &AssignMechanicRequest {
            mechanic_id: mechanic.user_id,
        },
        manager,
        test_now(),
    )
    .expect("Failed to assign mechanic");

    update_job_card(
        persistence,
        id,
        &JobCardRequest {
            status: Some(String::from("In Progress")),
            labor_items: Some(vec![LaborLineRequest {
                description: String::from("Oil change labor"),
                cost_cents: 10_000,
            }]),
            ..JobCardRequest::default()
        },
        mechanic,
        test_now(),
    )
    .expect("Failed to start job");

    update_job_card(
        persistence,
        id,
        &JobCardRequest {
            status: Some(String::from("Completed")),
            ..JobCardRequest::default()
        },
        mechanic,
        test_now(),
    )
    .expect("Failed to complete job")
}
