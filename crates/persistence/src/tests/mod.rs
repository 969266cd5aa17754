// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod complaint_tests;
mod settings_tests;
mod user_tests;

use crate::SqlitePersistence;
use servicebay::{Actor, BookingRequest, book_appointment};
use servicebay_domain::{
    Appointment, InventoryItem, Money, OffPeakDays, RegistrationNumber, Role, Vehicle,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const CUSTOMER_ID: i64 = 10;
pub const OTHER_CUSTOMER_ID: i64 = 11;
pub const MECHANIC_ID: i64 = 20;
pub const MANAGER_ID: i64 = 30;

pub fn now() -> OffsetDateTime {
    datetime!(2024-06-01 09:00 UTC)
}

pub fn customer() -> Actor {
    Actor::new(CUSTOMER_ID, Role::Customer)
}

pub fn mechanic() -> Actor {
    Actor::new(MECHANIC_ID, Role::Mechanic)
}

pub fn manager() -> Actor {
    Actor::new(MANAGER_ID, Role::Manager)
}

pub fn create_test_vehicle(customer_id: i64, registration: &str) -> Vehicle {
    Vehicle {
        vehicle_id: None,
        customer_id,
        make: String::from("Toyota"),
        model: String::from("Corolla"),
        year: 2018,
        registration_number: RegistrationNumber::parse(registration).unwrap(),
    }
}

pub fn create_test_item(name: &str, quantity: i64, threshold: i64) -> InventoryItem {
    InventoryItem {
        item_id: None,
        name: name.to_string(),
        part_number: Some(format!("PN-{name}")),
        supplier: Some(String::from("Parts Co")),
        quantity,
        unit: String::from(InventoryItem::DEFAULT_UNIT),
        cost_price: Money::from_cents(800),
        sale_price: Money::from_cents(1250),
        low_stock_threshold: threshold,
    }
}

/// Registers a vehicle for `customer_id` and returns it with its id.
pub fn register_vehicle(
    persistence: &mut SqlitePersistence,
    customer_id: i64,
    registration: &str,
) -> Vehicle {
    let mut vehicle: Vehicle = create_test_vehicle(customer_id, registration);
    let vehicle_id: i64 = persistence.insert_vehicle(&vehicle).unwrap();
    vehicle.vehicle_id = Some(vehicle_id);
    vehicle
}

/// Books and stores an appointment, returning it as reloaded from storage.
pub fn book(
    persistence: &mut SqlitePersistence,
    vehicle: &Vehicle,
    date: &str,
    time: &str,
) -> Appointment {
    let request: BookingRequest = BookingRequest {
        service_type: String::from("Oil Change"),
        date: date.to_string(),
        time: time.to_string(),
        notes: None,
        description: None,
    };
    let actor: Actor = Actor::new(vehicle.customer_id, Role::Customer);
    let appointment: Appointment = book_appointment(
        &request,
        &actor,
        vehicle,
        false,
        &OffPeakDays::default(),
        now(),
    )
    .unwrap();
    let appointment_id: i64 = persistence.insert_appointment(&appointment).unwrap();
    persistence.get_appointment(appointment_id).unwrap().unwrap()
}
