// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use servicebay::{BusinessSummary, MechanicPerformance};
use servicebay_domain::{ComplaintStatus, Money};

use super::{
    CUSTOMER, create_test_appointment, create_test_complaint, create_test_item,
    create_test_vehicle,
};
use crate::{
    OutboundEmail, SmsOrder, booking_confirmation_email, business_report_pdf,
    complaint_received_email, complaint_update_email, inventory_order_sms, supplier_order_email,
};

// ============================================================================
// Booking confirmation
// ============================================================================

#[test]
fn test_booking_confirmation_addresses_customer_with_pdf() {
    let email: OutboundEmail = booking_confirmation_email(
        &create_test_appointment(false),
        CUSTOMER,
        &create_test_vehicle(),
    );

    assert_eq!(email.to, "dana@example.com");
    assert_eq!(email.subject, "Service Appointment Confirmed");
    assert!(email.body.starts_with("Dear Dana Driver,"));
    assert!(email.body.contains("- Vehicle: Honda Civic (KA01AB1234)"));
    assert!(email.body.contains("- Date: 2024-06-03"));
    assert!(email.body.contains("- Time: 10:00"));
    assert!(email.body.contains("- Booking ID: 42"));
    assert!(!email.body.contains("Special Offer"));

    assert_eq!(email.attachments.len(), 1);
    assert_eq!(email.attachments[0].filename, "booking-42.pdf");
    assert_eq!(email.attachments[0].content_type, "application/pdf");
    let pdf: String = String::from_utf8(email.attachments[0].content.clone()).unwrap();
    assert!(pdf.starts_with("%PDF"));
    assert!(pdf.contains("(Booking ID: 42) Tj"));
    assert!(pdf.contains("(Status: Scheduled) Tj"));
    assert!(!pdf.contains("Off-Peak"));
}

#[test]
fn test_booking_confirmation_mentions_off_peak_discount() {
    let email: OutboundEmail = booking_confirmation_email(
        &create_test_appointment(true),
        CUSTOMER,
        &create_test_vehicle(),
    );

    assert!(email.body.contains("Special Offer: 5% off-peak discount applied!"));
    let pdf: String = String::from_utf8(email.attachments[0].content.clone()).unwrap();
    assert!(pdf.contains("(Special Offer: 5% Off-Peak Discount Applied!) Tj"));
}

// ============================================================================
// Complaints
// ============================================================================

#[test]
fn test_complaint_received_goes_to_manager() {
    let email: OutboundEmail =
        complaint_received_email(&create_test_complaint(), CUSTOMER, "boss@example.com");

    assert_eq!(email.to, "boss@example.com");
    assert_eq!(email.subject, "New Customer Complaint");
    assert!(email.body.contains("Customer: Dana Driver"));
    assert!(email.body.contains("Priority: High"));
    assert!(
        email
            .body
            .contains("Description:\nThe driver door was scratched during service.")
    );
}

#[test]
fn test_complaint_update_includes_response_when_present() {
    let mut complaint = create_test_complaint();
    complaint.status = ComplaintStatus::Resolved;
    complaint.manager_response = Some(String::from("We will repaint the door."));

    let email: OutboundEmail = complaint_update_email(&complaint, CUSTOMER);

    assert_eq!(email.to, "dana@example.com");
    assert_eq!(email.subject, "Complaint Update");
    assert!(email.body.contains("Status: Resolved"));
    assert!(email.body.contains("Manager Response:\nWe will repaint the door."));
    assert!(email.body.ends_with("Vehicle Service Center Management"));
}

#[test]
fn test_complaint_update_omits_missing_response() {
    let email: OutboundEmail = complaint_update_email(&create_test_complaint(), CUSTOMER);
    assert!(!email.body.contains("Manager Response"));
}

// ============================================================================
// Reorders
// ============================================================================

#[test]
fn test_supplier_order_lists_item_and_quantity() {
    let email: OutboundEmail =
        supplier_order_email(&create_test_item(), 6, "orders@parts.example.com");

    assert_eq!(email.to, "orders@parts.example.com");
    assert_eq!(email.subject, "Stock Order Request: Brake Pads");
    assert!(email.body.contains("Item Name: Brake Pads"));
    assert!(email.body.contains("Part Number: BP-220"));
    assert!(email.body.contains("Quantity: 6 sets"));
}

#[test]
fn test_inventory_order_sms_content() {
    let item = create_test_item();
    let text: String = inventory_order_sms(&SmsOrder {
        order_id: "ORD-1717232400000",
        item: &item,
        quantity: 10,
        ordered_by: "Morgan Manager",
        contact: None,
    });

    assert!(text.starts_with("INVENTORY ORDER - Vehicle Service Center"));
    assert!(text.contains("Item: Brake Pads"));
    assert!(text.contains("Part Number: BP-220"));
    assert!(text.contains("Current Stock: 2 sets"));
    assert!(text.contains("Order Quantity: 10 sets"));
    assert!(text.contains("Order ID: #ORD-1717232400000"));
    assert!(text.contains("Ordered by: Morgan Manager"));
    assert!(text.ends_with("Contact: service@vehiclecenter.com"));
}

#[test]
fn test_inventory_order_sms_uses_configured_contact() {
    let item = create_test_item();
    let text: String = inventory_order_sms(&SmsOrder {
        order_id: "ORD-1",
        item: &item,
        quantity: 1,
        ordered_by: "M",
        contact: Some("garage@example.com"),
    });
    assert!(text.ends_with("Contact: garage@example.com"));
}

#[test]
fn test_inventory_order_sms_marks_missing_part_number() {
    let mut item = create_test_item();
    item.part_number = None;
    let text: String = inventory_order_sms(&SmsOrder {
        order_id: "ORD-2",
        item: &item,
        quantity: 1,
        ordered_by: "M",
        contact: None,
    });
    assert!(text.contains("Part Number: N/A"));
}

// ============================================================================
// Business report
// ============================================================================

#[test]
fn test_business_report_names_mechanics() {
    let summary: BusinessSummary = BusinessSummary {
        total_revenue: Money::from_cents(12_500),
        top_services: vec![(String::from("Oil Change"), 3)],
        top_mechanics: vec![
            MechanicPerformance {
                mechanic_id: 20,
                jobs_completed: 2,
                revenue: Money::from_cents(10_000),
            },
            MechanicPerformance {
                mechanic_id: 99,
                jobs_completed: 1,
                revenue: Money::from_cents(2_500),
            },
        ],
        ..BusinessSummary::default()
    };
    let names: HashMap<i64, String> = HashMap::from([(20, String::from("Sam Wrench"))]);

    let pdf: String =
        String::from_utf8(business_report_pdf(&summary, "2024-06-01", "2024-06-30", &names))
            .unwrap();

    assert!(pdf.contains("(Period: 2024-06-01 to 2024-06-30) Tj"));
    assert!(pdf.contains("(Total Revenue: $125.00) Tj"));
    assert!(pdf.contains("(Oil Change: 3) Tj"));
    assert!(pdf.contains("(Sam Wrench: 2 jobs, $100.00) Tj"));
    assert!(pdf.contains("(#99: 1 jobs, $25.00) Tj"));
}

#[test]
fn test_business_report_handles_empty_period() {
    let pdf: String = String::from_utf8(business_report_pdf(
        &BusinessSummary::default(),
        "2024-01-01",
        "2024-01-31",
        &HashMap::new(),
    ))
    .unwrap();

    assert!(pdf.contains("(No appointments in this period) Tj"));
    assert!(pdf.contains("(No completed jobs in this period) Tj"));
}
