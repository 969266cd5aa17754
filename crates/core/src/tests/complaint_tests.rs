// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    MANAGER_ID, create_test_appointment, customer, manager, now, other_customer,
};
use crate::{
    ComplaintRequest, ComplaintUpdate, ComplaintUpdateResult, CoreError, file_complaint,
    update_complaint,
};
use servicebay_domain::{AppointmentStatus, Complaint, ComplaintPriority, ComplaintStatus};

fn request() -> ComplaintRequest {
    ComplaintRequest {
        subject: String::from("Scratched door"),
        description: String::from("Left rear door was scratched during service"),
        priority: None,
    }
}

fn open_complaint() -> Complaint {
    file_complaint(&request(), None, &customer(), now()).unwrap()
}

#[test]
fn test_new_complaint_defaults() {
    let complaint: Complaint = open_complaint();
    assert_eq!(complaint.status, ComplaintStatus::Open);
    assert_eq!(complaint.priority, ComplaintPriority::Medium);
    assert_eq!(complaint.appointment_id, None);
    assert_eq!(complaint.resolved_by, None);
}

#[test]
fn test_linked_appointment_must_be_owned() {
    let appointment = create_test_appointment(AppointmentStatus::Completed);

    let linked: Complaint =
        file_complaint(&request(), Some(&appointment), &customer(), now()).unwrap();
    assert_eq!(linked.appointment_id, Some(100));

    assert!(matches!(
        file_complaint(&request(), Some(&appointment), &other_customer(), now()),
        Err(CoreError::NotOwner { .. })
    ));
}

#[test]
fn test_subject_required() {
    let mut req: ComplaintRequest = request();
    req.subject = String::new();
    assert!(matches!(
        file_complaint(&req, None, &customer(), now()),
        Err(CoreError::DomainViolation(_))
    ));
}

#[test]
fn test_resolving_stamps_manager_and_notifies() {
    let result: ComplaintUpdateResult = update_complaint(
        &open_complaint(),
        ComplaintUpdate {
            status: Some(ComplaintStatus::Resolved),
            ..ComplaintUpdate::default()
        },
        &manager(),
        now(),
    )
    .unwrap();

    assert_eq!(result.complaint.status, ComplaintStatus::Resolved);
    assert_eq!(result.complaint.resolved_by, Some(MANAGER_ID));
    assert_eq!(result.complaint.resolved_at, Some(now()));
    assert!(result.notify_customer);
}

#[test]
fn test_review_without_response_is_silent() {
    let result: ComplaintUpdateResult = update_complaint(
        &open_complaint(),
        ComplaintUpdate {
            status: Some(ComplaintStatus::InReview),
            priority: Some(ComplaintPriority::High),
            manager_response: Some(String::from("   ")),
        },
        &manager(),
        now(),
    )
    .unwrap();

    assert_eq!(result.complaint.status, ComplaintStatus::InReview);
    assert_eq!(result.complaint.priority, ComplaintPriority::High);
    assert_eq!(result.complaint.resolved_by, None);
    assert_eq!(result.complaint.manager_response, None);
    assert!(!result.notify_customer);
}

#[test]
fn test_response_notifies() {
    let result: ComplaintUpdateResult = update_complaint(
        &open_complaint(),
        ComplaintUpdate {
            manager_response: Some(String::from("We will repaint it free of charge.")),
            ..ComplaintUpdate::default()
        },
        &manager(),
        now(),
    )
    .unwrap();

    assert!(result.notify_customer);
    assert_eq!(result.complaint.status, ComplaintStatus::Open);
}

#[test]
fn test_customer_cannot_update() {
    assert!(matches!(
        update_complaint(
            &open_complaint(),
            ComplaintUpdate::default(),
            &customer(),
            now()
        ),
        Err(CoreError::Forbidden(_))
    ));
}
