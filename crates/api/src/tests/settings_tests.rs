// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    PEAK_DATE, book_test_appointment, create_test_customer, create_test_manager,
    create_test_vehicle, setup_test_persistence,
};
use crate::UpdateSettingsRequest;
use crate::error::ApiError;
use crate::handlers::settings::{get_settings, update_settings};

#[test]
fn test_default_off_peak_days() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);

    let settings = get_settings(&mut persistence, &customer).unwrap();

    assert_eq!(settings.off_peak_days, vec!["Monday", "Tuesday"]);
}

#[test]
fn test_updated_days_apply_to_new_bookings() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let manager = create_test_manager(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    let before = book_test_appointment(&mut persistence, &customer, vehicle_id, PEAK_DATE, "09:00");

    update_settings(
        &mut persistence,
        &UpdateSettingsRequest {
            off_peak_days: vec![String::from("Wednesday")],
        },
        &manager,
    )
    .unwrap();
    let after = book_test_appointment(&mut persistence, &customer, vehicle_id, PEAK_DATE, "11:00");

    assert!(!before.discount_eligible);
    assert!(after.discount_eligible);
}

#[test]
fn test_update_rejects_empty_and_unknown_days() {
    let mut persistence = setup_test_persistence();
    let manager = create_test_manager(&mut persistence);

    for days in [vec![], vec![String::from("Funday")]] {
        let result = update_settings(
            &mut persistence,
            &UpdateSettingsRequest {
                off_peak_days: days,
            },
            &manager,
        );
        match result.unwrap_err() {
            ApiError::InvalidInput { field, .. } => assert_eq!(field, "off_peak_days"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}

#[test]
fn test_customer_cannot_update_settings() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);

    let result = update_settings(
        &mut persistence,
        &UpdateSettingsRequest {
            off_peak_days: vec![String::from("Friday")],
        },
        &customer,
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
