// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Billing, DomainError, JobCard, LaborItem, MAX_PART_QUANTITY, Money, PartUsed, compute_billing,
};

fn sample_job_card() -> JobCard {
    JobCard {
        parts_used: vec![
            PartUsed::new(Some(1), "Oil Filter", 2, 1_250).unwrap(),
            PartUsed::new(None, "Wiper Blade", 1, 899).unwrap(),
        ],
        labor_items: vec![
            LaborItem::new("Oil change", 3_000).unwrap(),
            LaborItem::new("Inspection", 1_500).unwrap(),
        ],
    }
}

#[test]
fn test_subtotal_sums_parts_and_labor() {
    let card: JobCard = sample_job_card();
    assert_eq!(card.parts_total().unwrap(), Money::from_cents(3_399));
    assert_eq!(card.labor_total().unwrap(), Money::from_cents(4_500));
    assert_eq!(card.subtotal().unwrap(), Money::from_cents(7_899));
}

#[test]
fn test_final_cost_without_discount_equals_subtotal() {
    let billing: Billing = compute_billing(&sample_job_card(), false).unwrap();
    assert_eq!(billing.subtotal, billing.final_cost);
}

#[test]
fn test_off_peak_discount_is_five_percent() {
    let card: JobCard = JobCard {
        parts_used: Vec::new(),
        labor_items: vec![LaborItem::new("Service", 10_000).unwrap()],
    };
    let billing: Billing = compute_billing(&card, true).unwrap();
    assert_eq!(billing.subtotal, Money::from_cents(10_000));
    assert_eq!(billing.final_cost, Money::from_cents(9_500));
}

#[test]
fn test_discount_rounds_half_up() {
    // 7899 * 0.95 = 7504.05
    let billing: Billing = compute_billing(&sample_job_card(), true).unwrap();
    assert_eq!(billing.final_cost, Money::from_cents(7_504));

    // 10 * 0.95 = 9.5
    let card: JobCard = JobCard {
        parts_used: Vec::new(),
        labor_items: vec![LaborItem::new("Top-up", 10).unwrap()],
    };
    assert_eq!(
        compute_billing(&card, true).unwrap().final_cost,
        Money::from_cents(10)
    );
}

#[test]
fn test_billing_is_rederivable() {
    let card: JobCard = sample_job_card();
    assert_eq!(
        compute_billing(&card, true).unwrap(),
        compute_billing(&card.clone(), true).unwrap()
    );
}

#[test]
fn test_empty_job_card_costs_nothing() {
    let billing: Billing = compute_billing(&JobCard::default(), true).unwrap();
    assert_eq!(billing.subtotal, Money::ZERO);
    assert_eq!(billing.final_cost, Money::ZERO);
}

#[test]
fn test_part_line_validation() {
    assert!(matches!(
        PartUsed::new(None, "Bolt", 0, 100),
        Err(DomainError::NonPositiveQuantity { .. })
    ));
    assert!(matches!(
        PartUsed::new(None, "  ", 1, 100),
        Err(DomainError::InvalidField { .. })
    ));
    assert!(matches!(
        PartUsed::new(None, "Bolt", 1, -1),
        Err(DomainError::NegativeAmount { .. })
    ));
    assert!(matches!(
        LaborItem::new("Polish", -500),
        Err(DomainError::NegativeAmount { .. })
    ));
}

#[test]
fn test_overflow_is_reported() {
    let card: JobCard = JobCard {
        parts_used: vec![PartUsed::new(None, "Gold", 2, i64::MAX).unwrap()],
        labor_items: Vec::new(),
    };
    assert_eq!(card.subtotal(), Err(DomainError::AmountOverflow));
}

#[test]
fn test_money_display() {
    assert_eq!(Money::from_cents(7_504).to_string(), "$75.04");
    assert_eq!(Money::from_cents(5).to_string(), "$0.05");
    assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
}

#[test]
fn test_part_quantity_is_bounded() {
    assert!(PartUsed::new(Some(3), "Bolt", MAX_PART_QUANTITY, 10).is_ok());
    assert_eq!(
        PartUsed::new(Some(3), "Bolt", MAX_PART_QUANTITY + 1, 10),
        Err(DomainError::QuantityTooLarge {
            field: "parts_used.quantity",
            value: MAX_PART_QUANTITY + 1,
            max: MAX_PART_QUANTITY,
        })
    );
}
