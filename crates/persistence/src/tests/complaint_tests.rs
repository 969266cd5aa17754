// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{CUSTOMER_ID, MANAGER_ID, OTHER_CUSTOMER_ID, now};
use crate::{PersistenceError, SqlitePersistence};
use servicebay_domain::{Complaint, ComplaintPriority, ComplaintStatus};
use time::macros::datetime;

fn create_test_complaint(customer_id: i64, subject: &str) -> Complaint {
    Complaint {
        complaint_id: None,
        customer_id,
        appointment_id: None,
        subject: subject.to_string(),
        description: String::from("The car still makes a noise"),
        status: ComplaintStatus::Open,
        priority: ComplaintPriority::Medium,
        manager_response: None,
        resolved_by: None,
        resolved_at: None,
        created_at: now(),
    }
}

#[test]
fn test_complaint_roundtrip_and_resolution() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let complaint_id = persistence
        .insert_complaint(&create_test_complaint(CUSTOMER_ID, "Noise"))
        .unwrap();

    let mut complaint = persistence.get_complaint(complaint_id).unwrap().unwrap();
    assert_eq!(complaint.status, ComplaintStatus::Open);
    assert_eq!(complaint.created_at, now());

    complaint.status = ComplaintStatus::Resolved;
    complaint.manager_response = Some(String::from("Tightened the heat shield"));
    complaint.resolved_by = Some(MANAGER_ID);
    complaint.resolved_at = Some(datetime!(2024-06-02 12:00 UTC));
    persistence.update_complaint(complaint_id, &complaint).unwrap();

    let stored = persistence.get_complaint(complaint_id).unwrap().unwrap();
    assert_eq!(stored, complaint);
}

#[test]
fn test_list_complaints_filters_by_status_and_customer() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let first = persistence
        .insert_complaint(&create_test_complaint(CUSTOMER_ID, "First"))
        .unwrap();
    persistence
        .insert_complaint(&create_test_complaint(OTHER_CUSTOMER_ID, "Second"))
        .unwrap();

    let mut closed = persistence.get_complaint(first).unwrap().unwrap();
    closed.status = ComplaintStatus::Closed;
    persistence.update_complaint(first, &closed).unwrap();

    assert_eq!(persistence.list_complaints(None).unwrap().len(), 2);
    let open = persistence
        .list_complaints(Some(ComplaintStatus::Open))
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].subject, "Second");

    let mine = persistence
        .list_complaints_for_customer(CUSTOMER_ID)
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].complaint_id, Some(first));
}

#[test]
fn test_complaints_created_between() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    persistence
        .insert_complaint(&create_test_complaint(CUSTOMER_ID, "In range"))
        .unwrap();

    assert_eq!(
        persistence
            .list_complaints_created_between("2024-06-01T00:00:00Z", "2024-06-02T00:00:00Z")
            .unwrap()
            .len(),
        1
    );
    assert!(
        persistence
            .list_complaints_created_between("2024-07-01T00:00:00Z", "2024-08-01T00:00:00Z")
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_delete_complaint() {
    let mut persistence = SqlitePersistence::new_in_memory().unwrap();
    let complaint_id = persistence
        .insert_complaint(&create_test_complaint(CUSTOMER_ID, "Gone"))
        .unwrap();

    persistence.delete_complaint(complaint_id).unwrap();
    assert!(persistence.get_complaint(complaint_id).unwrap().is_none());
    assert!(matches!(
        persistence.delete_complaint(complaint_id),
        Err(PersistenceError::NotFound(_))
    ));
}
