// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    OFF_PEAK_DATE, PEAK_DATE, book_test_appointment, complete_test_appointment,
    create_test_customer, create_test_item, create_test_manager, create_test_mechanic,
    create_test_vehicle, setup_test_persistence, test_now,
};
use crate::DateRangeQuery;
use crate::error::ApiError;
use crate::handlers::reports::{
    booking_stats_report, business_report, inventory_report, revenue_report,
};

fn range(start: &str, end: &str) -> DateRangeQuery {
    DateRangeQuery {
        start_date: Some(start.to_string()),
        end_date: Some(end.to_string()),
    }
}

#[test]
fn test_booking_stats_counts_by_status() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let manager = create_test_manager(&mut persistence);
    let mechanic = create_test_mechanic(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    book_test_appointment(&mut persistence, &customer, vehicle_id, PEAK_DATE, "14:00");
    complete_test_appointment(
        &mut persistence,
        &customer,
        &manager,
        &mechanic,
        vehicle_id,
        OFF_PEAK_DATE,
    );

    let stats = booking_stats_report(&mut persistence, None, &manager, test_now()).unwrap();

    assert_eq!(stats.period, "week");
    assert_eq!(stats.total, 2);
    assert_eq!(stats.scheduled, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.revenue_cents, 9_500);
}

#[test]
fn test_booking_stats_rejects_unknown_period() {
    let mut persistence = setup_test_persistence();
    let manager = create_test_manager(&mut persistence);

    let result = booking_stats_report(&mut persistence, Some("decade"), &manager, test_now());

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_reports_are_manager_only() {
    let mut persistence = setup_test_persistence();
    let mechanic = create_test_mechanic(&mut persistence);

    match inventory_report(&mut persistence, &mechanic).unwrap_err() {
        ApiError::Unauthorized { .. } => (),
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn test_revenue_report_respects_range() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let manager = create_test_manager(&mut persistence);
    let mechanic = create_test_mechanic(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    complete_test_appointment(
        &mut persistence,
        &customer,
        &manager,
        &mechanic,
        vehicle_id,
        PEAK_DATE,
    );

    let inside = revenue_report(&mut persistence, &range("2026-05-20", "2026-05-20"), &manager)
        .unwrap();
    assert_eq!(inside.total_revenue_cents, 10_000);
    assert_eq!(inside.appointment_count, 1);
    assert_eq!(inside.daily_revenue_cents["2026-05-20"], 10_000);
    assert_eq!(inside.start_date.as_deref(), Some("2026-05-20"));

    let outside = revenue_report(&mut persistence, &range("2026-05-21", "2026-05-31"), &manager)
        .unwrap();
    assert_eq!(outside.total_revenue_cents, 0);

    let everything = revenue_report(&mut persistence, &DateRangeQuery::default(), &manager)
        .unwrap();
    assert_eq!(everything.appointment_count, 1);
    assert!(everything.start_date.is_none());
}

#[test]
fn test_revenue_report_range_validation() {
    let mut persistence = setup_test_persistence();
    let manager = create_test_manager(&mut persistence);

    let half = DateRangeQuery {
        start_date: Some(String::from("2026-05-01")),
        end_date: None,
    };
    match revenue_report(&mut persistence, &half, &manager).unwrap_err() {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "start_date"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }

    match revenue_report(&mut persistence, &range("2026-05-10", "2026-05-01"), &manager)
        .unwrap_err()
    {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, "end_date"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_inventory_report_values_stock() {
    let mut persistence = setup_test_persistence();
    let manager = create_test_manager(&mut persistence);
    create_test_item(&mut persistence, &manager, "Oil Filter", 10, 1_500);
    create_test_item(&mut persistence, &manager, "Brake Pad", 2, 4_000);

    let report = inventory_report(&mut persistence, &manager).unwrap();

    assert_eq!(report.total_items, 2);
    assert_eq!(report.total_sale_value_cents, 23_000);
    assert_eq!(report.total_cost_value_cents, 11_500);
    assert_eq!(report.potential_profit_cents, 11_500);
    assert_eq!(report.low_stock_items.len(), 1);
    assert_eq!(report.low_stock_items[0].name, "Brake Pad");
}

#[test]
fn test_business_report_is_pdf() {
    let mut persistence = setup_test_persistence();
    let customer = create_test_customer(&mut persistence);
    let manager = create_test_manager(&mut persistence);
    let mechanic = create_test_mechanic(&mut persistence);
    let vehicle_id = create_test_vehicle(&mut persistence, &customer, "CAB-1234");
    complete_test_appointment(
        &mut persistence,
        &customer,
        &manager,
        &mechanic,
        vehicle_id,
        PEAK_DATE,
    );

    let ranged = business_report(
        &mut persistence,
        &range("2026-05-01", "2026-05-31"),
        &manager,
        test_now(),
    )
    .unwrap();
    assert_eq!(ranged.filename, "business-report-2026-05-01-to-2026-05-31.pdf");
    assert_eq!(ranged.content_type, "application/pdf");
    assert!(ranged.content.starts_with(b"%PDF"));

    let unranged =
        business_report(&mut persistence, &DateRangeQuery::default(), &manager, test_now())
            .unwrap();
    assert_eq!(unranged.filename, "business-report-2026-05-20.pdf");
}
