// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    booking_request, create_test_vehicle, customer, manager, now, other_customer,
};
use crate::{BookingRequest, CoreError, book_appointment};
use servicebay_domain::{Appointment, AppointmentStatus, DomainError, Money, OffPeakDays};

#[test]
fn test_monday_booking_is_discount_eligible() {
    let appointment: Appointment = book_appointment(
        &booking_request("2024-06-03", "10:00"),
        &customer(),
        &create_test_vehicle(),
        false,
        &OffPeakDays::default(),
        now(),
    )
    .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert!(appointment.discount_eligible);
    assert_eq!(appointment.assigned_mechanic_id, None);
    assert_eq!(appointment.final_cost, Money::ZERO);
    assert_eq!(appointment.version, 1);
    assert_eq!(appointment.vehicle_id, 5);
}

#[test]
fn test_weekend_booking_is_not_discount_eligible() {
    let appointment: Appointment = book_appointment(
        &booking_request("2024-06-08", "10:00"),
        &customer(),
        &create_test_vehicle(),
        false,
        &OffPeakDays::default(),
        now(),
    )
    .unwrap();

    assert!(!appointment.discount_eligible);
}

#[test]
fn test_configured_off_peak_days_are_used() {
    let wednesday_only: OffPeakDays = OffPeakDays::from_names(&["Wednesday"]).unwrap();

    let monday: Appointment = book_appointment(
        &booking_request("2024-06-03", "10:00"),
        &customer(),
        &create_test_vehicle(),
        false,
        &wednesday_only,
        now(),
    )
    .unwrap();
    let wednesday: Appointment = book_appointment(
        &booking_request("2024-06-05", "10:00"),
        &customer(),
        &create_test_vehicle(),
        false,
        &wednesday_only,
        now(),
    )
    .unwrap();

    assert!(!monday.discount_eligible);
    assert!(wednesday.discount_eligible);
}

#[test]
fn test_taken_slot_is_rejected() {
    let result = book_appointment(
        &booking_request("2024-06-03", "10:00"),
        &customer(),
        &create_test_vehicle(),
        true,
        &OffPeakDays::default(),
        now(),
    );

    assert_eq!(
        result,
        Err(CoreError::SlotUnavailable {
            date: String::from("2024-06-03"),
            time: String::from("10:00"),
        })
    );
}

#[test]
fn test_vehicle_must_belong_to_customer() {
    let result = book_appointment(
        &booking_request("2024-06-03", "10:00"),
        &other_customer(),
        &create_test_vehicle(),
        false,
        &OffPeakDays::default(),
        now(),
    );

    assert!(matches!(
        result,
        Err(CoreError::NotOwner {
            resource: "vehicle"
        })
    ));
}

#[test]
fn test_only_customers_book() {
    let result = book_appointment(
        &booking_request("2024-06-03", "10:00"),
        &manager(),
        &create_test_vehicle(),
        false,
        &OffPeakDays::default(),
        now(),
    );

    assert!(matches!(result, Err(CoreError::Forbidden(_))));
}

#[test]
fn test_missing_fields_are_rejected() {
    let mut request: BookingRequest = booking_request("2024-06-03", "10:00");
    request.service_type = String::from("  ");
    assert!(matches!(
        book_appointment(
            &request,
            &customer(),
            &create_test_vehicle(),
            false,
            &OffPeakDays::default(),
            now(),
        ),
        Err(CoreError::DomainViolation(DomainError::InvalidField {
            field: "service_type",
            ..
        }))
    ));

    let bad_date: BookingRequest = booking_request("June 3rd", "10:00");
    assert!(matches!(
        book_appointment(
            &bad_date,
            &customer(),
            &create_test_vehicle(),
            false,
            &OffPeakDays::default(),
            now(),
        ),
        Err(CoreError::DomainViolation(DomainError::DateParseError { .. }))
    ));
}
