// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicebay_domain::Role;

use super::helpers::{
    PEAK_DATE, book_test_appointment, complete_test_appointment, create_test_customer,
    create_test_manager, create_test_mechanic, create_test_user, create_test_vehicle,
    setup_test_persistence, test_now,
};
use crate::SubmitFeedbackRequest;
use crate::error::ApiError;
use crate::handlers::appointments::get_appointment;
use crate::handlers::feedback::{list_feedback, list_my_feedback, mechanic_ratings, submit_feedback};

fn feedback_request(appointment_id: i64, rating: i64) -> SubmitFeedbackRequest {
    SubmitFeedbackRequest {
        appointment_id,
        rating,
        comment: Some(String::from("Quick and tidy")),
    }
}

#[test]
fn test_feedback_on_completed_appointment() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let manager = create_test_manager(&mut persistence);
    let mechanic = create_test_mechanic(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    let completed = complete_test_appointment(
        &mut persistence,
        &customer,
        &manager,
        &mechanic,
        vehicle_id,
        PEAK_DATE,
    );

    let info = submit_feedback(
        &mut persistence,
        &feedback_request(completed.appointment_id, 4),
        &customer,
        test_now(),
    )
    .unwrap();

    assert_eq!(info.rating, 4);
    assert_eq!(info.mechanic_id, Some(mechanic.user_id));
    assert_eq!(list_my_feedback(&mut persistence, &customer).unwrap().len(), 1);
    assert_eq!(list_feedback(&mut persistence, &manager).unwrap().len(), 1);

    let appointment =
        get_appointment(&mut persistence, completed.appointment_id, &customer).unwrap();
    assert!(appointment.feedback_submitted);
    assert!(!appointment.capabilities.can_submit_feedback.is_allowed());
}

#[test]
fn test_feedback_only_once() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let manager = create_test_manager(&mut persistence);
    let mechanic = create_test_mechanic(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    let completed = complete_test_appointment(
        &mut persistence,
        &customer,
        &manager,
        &mechanic,
        vehicle_id,
        PEAK_DATE,
    );
    let request = feedback_request(completed.appointment_id, 5);
    submit_feedback(&mut persistence, &request, &customer, test_now()).unwrap();

    match submit_feedback(&mut persistence, &request, &customer, test_now()).unwrap_err() {
        ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, "single_feedback"),
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_feedback_requires_completion() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    let booked = book_test_appointment(&mut persistence, &customer, vehicle_id, PEAK_DATE, "10:00");

    let result = submit_feedback(
        &mut persistence,
        &feedback_request(booked.appointment_id, 5),
        &customer,
        test_now(),
    );

    match result.unwrap_err() {
        ApiError::DomainRuleViolation { rule, .. } => {
            assert_eq!(rule, "feedback_after_completion");
        }
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_feedback_rating_out_of_range() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    let booked = book_test_appointment(&mut persistence, &customer, vehicle_id, PEAK_DATE, "10:00");

    let result = submit_feedback(
        &mut persistence,
        &feedback_request(booked.appointment_id, 6),
        &customer,
        test_now(),
    );

    match result.unwrap_err() {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "rating"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_feedback_by_other_customer_forbidden() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let other = create_test_user(&mut persistence, "Sunil", "sunil@example.com", Role::Customer);
    let manager = create_test_manager(&mut persistence);
    let mechanic = create_test_mechanic(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    let completed = complete_test_appointment(
        &mut persistence,
        &customer,
        &manager,
        &mechanic,
        vehicle_id,
        PEAK_DATE,
    );

    let result = submit_feedback(
        &mut persistence,
        &feedback_request(completed.appointment_id, 5),
        &other,
        test_now(),
    );

    match result.unwrap_err() {
        ApiError::Forbidden { .. } => (),
        other => panic!("Expected Forbidden, got {other:?}"),
    }
}

#[test]
fn test_mechanic_ratings_include_names() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let manager = create_test_manager(&mut persistence);
    let mechanic = create_test_mechanic(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");

    for (date, rating) in [("2026-06-02", 5), ("2026-06-04", 3)] {
        let completed = complete_test_appointment(
            &mut persistence,
            &customer,
            &manager,
            &mechanic,
            vehicle_id,
            date,
        );
        submit_feedback(
            &mut persistence,
            &feedback_request(completed.appointment_id, rating),
            &customer,
            test_now(),
        )
        .unwrap();
    }

    let ratings = mechanic_ratings(&mut persistence, &manager).unwrap();

    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].mechanic_name.as_deref(), Some("Kasun Fernando"));
    assert_eq!(ratings[0].review_count, 2);
    assert!((ratings[0].average_rating - 4.0).abs() < f64::EPSILON);
}
