// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, BookingRequest};
use servicebay_domain::{
    Appointment, AppointmentStatus, JobCard, Money, RegistrationNumber, Role, Slot, Vehicle,
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

pub fn other_customer() -> Actor {
    Actor::new(OTHER_CUSTOMER_ID, Role::Customer)
}

pub fn mechanic() -> Actor {
    Actor::new(MECHANIC_ID, Role::Mechanic)
}

pub fn manager() -> Actor {
    Actor::new(MANAGER_ID, Role::Manager)
}

pub fn create_test_vehicle() -> Vehicle {
    Vehicle {
        vehicle_id: Some(5),
        customer_id: CUSTOMER_ID,
        make: String::from("Toyota"),
        model: String::from("Corolla"),
        year: 2018,
        registration_number: RegistrationNumber::parse("CAB-1234").unwrap(),
    }
}

pub fn booking_request(date: &str, time: &str) -> BookingRequest {
    BookingRequest {
        service_type: String::from("Oil Change"),
        date: date.to_string(),
        time: time.to_string(),
        notes: None,
        description: None,
    }
}

pub fn create_test_appointment(status: AppointmentStatus) -> Appointment {
    Appointment {
        appointment_id: Some(100),
        customer_id: CUSTOMER_ID,
        vehicle_id: 5,
        service_type: String::from("Oil Change"),
        slot: Slot::parse("2024-06-03", "10:00").unwrap(),
        status,
        assigned_mechanic_id: None,
        notes: None,
        description: None,
        job_card: JobCard::default(),
        subtotal: Money::ZERO,
        final_cost: Money::ZERO,
        discount_eligible: true,
        started_at: None,
        finished_at: None,
        feedback_submitted: false,
        version: 1,
        created_at: now(),
    }
}

pub fn assigned_appointment(status: AppointmentStatus) -> Appointment {
    let mut appointment: Appointment = create_test_appointment(status);
    appointment.assigned_mechanic_id = Some(MECHANIC_ID);
    appointment
}
