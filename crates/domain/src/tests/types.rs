// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AppointmentStatus, ComplaintStatus, DomainError, EmailAddress, PhoneNumber, Rating,
    RegistrationNumber, Role, Slot,
};
use std::str::FromStr;
use time::macros::date;

#[test]
fn test_appointment_lifecycle_edges() {
    use AppointmentStatus::{Cancelled, Completed, InProgress, Scheduled};

    assert!(Scheduled.can_transition_to(InProgress));
    assert!(Scheduled.can_transition_to(Cancelled));
    assert!(InProgress.can_transition_to(Completed));

    assert!(!Scheduled.can_transition_to(Completed));
    assert!(!InProgress.can_transition_to(Cancelled));
    assert!(!InProgress.can_transition_to(Scheduled));
    for target in [Scheduled, InProgress, Completed, Cancelled] {
        assert!(!Completed.can_transition_to(target));
        assert!(!Cancelled.can_transition_to(target));
    }
}

#[test]
fn test_only_scheduled_is_cancellable() {
    assert!(AppointmentStatus::Scheduled.is_cancellable());
    assert!(!AppointmentStatus::InProgress.is_cancellable());
    assert!(!AppointmentStatus::Completed.is_cancellable());
    assert!(!AppointmentStatus::Cancelled.is_cancellable());
}

#[test]
fn test_in_progress_uses_spaced_label() {
    assert_eq!(AppointmentStatus::InProgress.as_str(), "In Progress");
    assert_eq!(
        AppointmentStatus::from_str("In Progress").unwrap(),
        AppointmentStatus::InProgress
    );
    assert_eq!(
        serde_json::to_string(&AppointmentStatus::InProgress).unwrap(),
        "\"In Progress\""
    );
    assert!(AppointmentStatus::from_str("InProgress").is_err());
}

#[test]
fn test_role_parse_rejects_unknown() {
    assert_eq!(Role::from_str("Mechanic").unwrap(), Role::Mechanic);
    assert!(matches!(
        Role::from_str("admin"),
        Err(DomainError::InvalidRole(_))
    ));
}

#[test]
fn test_complaint_resolution_statuses() {
    assert!(ComplaintStatus::Resolved.is_resolution());
    assert!(ComplaintStatus::Closed.is_resolution());
    assert!(!ComplaintStatus::Open.is_resolution());
    assert!(!ComplaintStatus::InReview.is_resolution());
}

#[test]
fn test_registration_number_normalized() {
    let reg: RegistrationNumber = RegistrationNumber::parse("  wp-cab 1234 ").unwrap();
    assert_eq!(reg.value(), "WP-CAB 1234");
    assert_eq!(reg, RegistrationNumber::parse("WP-cab 1234").unwrap());
    assert!(RegistrationNumber::parse("   ").is_err());
}

#[test]
fn test_rating_bounds() {
    assert_eq!(Rating::new(1).unwrap().value(), 1);
    assert_eq!(Rating::new(5).unwrap().value(), 5);
    assert_eq!(Rating::new(0), Err(DomainError::InvalidRating(0)));
    assert_eq!(Rating::new(6), Err(DomainError::InvalidRating(6)));
    assert_eq!(Rating::new(-3), Err(DomainError::InvalidRating(-3)));
}

#[test]
fn test_phone_number_requires_plus() {
    assert!(PhoneNumber::parse("+94771234567").is_ok());
    assert!(PhoneNumber::parse(" +14155550123 ").is_ok());

    assert!(PhoneNumber::parse("0771234567").is_err());
    assert!(PhoneNumber::parse("94771234567").is_err());
    assert!(PhoneNumber::parse("+0771234567").is_err());
    assert!(PhoneNumber::parse("+94 77 123").is_err());
    assert!(PhoneNumber::parse("+").is_err());
}

#[test]
fn test_email_address_lowercased() {
    let email: EmailAddress = EmailAddress::parse(" Jane.Doe@Example.COM ").unwrap();
    assert_eq!(email.value(), "jane.doe@example.com");

    assert!(EmailAddress::parse("no-at-sign").is_err());
    assert!(EmailAddress::parse("@example.com").is_err());
    assert!(EmailAddress::parse("a@localhost").is_err());
    assert!(EmailAddress::parse("a@b@example.com").is_err());
}

#[test]
fn test_slot_parsing() {
    let slot: Slot = Slot::parse("2024-06-03", " 10:00 ").unwrap();
    assert_eq!(slot.date(), date!(2024 - 06 - 03));
    assert_eq!(slot.time(), "10:00");
    assert_eq!(slot.date_string(), "2024-06-03");

    assert!(matches!(
        Slot::parse("03/06/2024", "10:00"),
        Err(DomainError::DateParseError { .. })
    ));
    assert!(matches!(
        Slot::parse("2024-02-30", "10:00"),
        Err(DomainError::DateParseError { .. })
    ));
    assert!(matches!(
        Slot::parse("2024-06-03", ""),
        Err(DomainError::InvalidField { field: "time", .. })
    ));
}
