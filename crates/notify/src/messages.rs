// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Message templates.
//!
//! Each function renders one kind of notification from domain records.
//! Callers supply the contact details that live outside the records.

use std::collections::HashMap;
use std::fmt::Write as _;

use servicebay::{BookingStats, BusinessSummary, InventoryReport};
use servicebay_domain::{Appointment, Complaint, InventoryItem, Vehicle};

use crate::document::PdfDocument;
use crate::email::{Attachment, OutboundEmail};

const CENTER_NAME: &str = "Vehicle Service Center";
const DEFAULT_CONTACT: &str = "service@vehiclecenter.com";

/// The customer a message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipient<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

fn booking_id(appointment: &Appointment) -> String {
    appointment
        .appointment_id
        .map_or_else(|| String::from("pending"), |id| id.to_string())
}

/// Renders the booking confirmation PDF.
#[must_use]
pub fn booking_confirmation_pdf(
    appointment: &Appointment,
    customer: Recipient<'_>,
    vehicle: &Vehicle,
) -> Vec<u8> {
    let mut document: PdfDocument = PdfDocument::new()
        .title(CENTER_NAME)
        .heading("Booking Confirmation")
        .blank()
        .heading("Booking Details")
        .line(&format!("Booking ID: {}", booking_id(appointment)))
        .line(&format!("Customer: {}", customer.name))
        .line(&format!("Email: {}", customer.email))
        .line(&format!(
            "Vehicle: {} {} ({})",
            vehicle.make, vehicle.model, vehicle.registration_number
        ))
        .line(&format!("Service Type: {}", appointment.service_type))
        .line(&format!("Date: {}", appointment.slot.date_string()))
        .line(&format!("Time: {}", appointment.slot.time()))
        .line(&format!("Status: {}", appointment.status));

    if appointment.discount_eligible {
        document = document
            .blank()
            .heading("Special Offer: 5% Off-Peak Discount Applied!");
    }

    document
        .blank()
        .line("Thank you for choosing our service!")
        .render()
}

/// Renders the booking confirmation email with its PDF attached.
#[must_use]
pub fn booking_confirmation_email(
    appointment: &Appointment,
    customer: Recipient<'_>,
    vehicle: &Vehicle,
) -> OutboundEmail {
    let id: String = booking_id(appointment);

    let mut body: String = format!(
        "Dear {},\n\nYour service appointment has been confirmed!\n\nDetails:\n\
         - Vehicle: {} {} ({})\n- Service: {}\n- Date: {}\n- Time: {}\n- Booking ID: {id}\n",
        customer.name,
        vehicle.make,
        vehicle.model,
        vehicle.registration_number,
        appointment.service_type,
        appointment.slot.date_string(),
        appointment.slot.time(),
    );
    if appointment.discount_eligible {
        body.push_str("\nSpecial Offer: 5% off-peak discount applied!\n");
    }
    body.push_str(
        "\nPlease find your booking confirmation attached.\n\n\
         Thank you for choosing our service center!",
    );

    OutboundEmail {
        to: customer.email.to_string(),
        subject: String::from("Service Appointment Confirmed"),
        body,
        attachments: vec![Attachment::pdf(
            format!("booking-{id}.pdf"),
            booking_confirmation_pdf(appointment, customer, vehicle),
        )],
    }
}

/// Alerts a manager to a newly filed complaint.
#[must_use]
pub fn complaint_received_email(
    complaint: &Complaint,
    customer: Recipient<'_>,
    manager_email: &str,
) -> OutboundEmail {
    OutboundEmail {
        to: manager_email.to_string(),
        subject: String::from("New Customer Complaint"),
        body: format!(
            "New Complaint Received\n\nCustomer: {}\nEmail: {}\nSubject: {}\nPriority: {}\n\n\
             Description:\n{}\n\nPlease login to the system to review and respond.",
            customer.name,
            customer.email,
            complaint.subject,
            complaint.priority,
            complaint.description,
        ),
        attachments: Vec::new(),
    }
}

/// Tells a customer their complaint changed.
#[must_use]
pub fn complaint_update_email(complaint: &Complaint, customer: Recipient<'_>) -> OutboundEmail {
    let mut body: String = format!(
        "Dear {},\n\nYour complaint has been updated:\n\nSubject: {}\nStatus: {}\n\n",
        customer.name, complaint.subject, complaint.status,
    );
    if let Some(response) = &complaint.manager_response {
        let _ = writeln!(body, "Manager Response:\n{response}\n");
    }
    body.push_str(
        "Thank you for your feedback. If you have any further concerns, \
         please don't hesitate to reach out.\n\nBest regards,\n\
         Vehicle Service Center Management",
    );

    OutboundEmail {
        to: customer.email.to_string(),
        subject: String::from("Complaint Update"),
        body,
        attachments: Vec::new(),
    }
}

/// A reorder request addressed to a supplier.
#[must_use]
pub fn supplier_order_email(
    item: &InventoryItem,
    quantity: i64,
    supplier_email: &str,
) -> OutboundEmail {
    let mut details: String = format!("Item Name: {}\n", item.name);
    if let Some(part_number) = &item.part_number {
        let _ = writeln!(details, "Part Number: {part_number}");
    }
    let _ = writeln!(details, "Quantity: {quantity} {}", item.unit);

    OutboundEmail {
        to: supplier_email.to_string(),
        subject: format!("Stock Order Request: {}", item.name),
        body: format!(
            "Hello,\n\nThis is an order request from the {CENTER_NAME}.\n\
             Please prepare the following item for shipment:\n\n{details}\n\
             Please reply to this email to confirm the order and provide an \
             estimated delivery date.\n\nThank you,\nManagement"
        ),
        attachments: Vec::new(),
    }
}

/// Details of an SMS reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmsOrder<'a> {
    pub order_id: &'a str,
    pub item: &'a InventoryItem,
    pub quantity: i64,
    pub ordered_by: &'a str,
    /// Reply address printed at the bottom; falls back to the center's
    /// public address.
    pub contact: Option<&'a str>,
}

/// Renders the SMS sent to a supplier for a reorder.
#[must_use]
pub fn inventory_order_sms(order: &SmsOrder<'_>) -> String {
    let item: &InventoryItem = order.item;
    let mut text: String = format!(
        "INVENTORY ORDER - {CENTER_NAME}\n\nItem: {}\nPart Number: {}\n",
        item.name,
        item.part_number.as_deref().unwrap_or("N/A"),
    );
    let _ = writeln!(
        text,
        "Current Stock: {} {unit}\nOrder Quantity: {} {unit}\nOrder ID: #{}",
        item.quantity,
        order.quantity,
        order.order_id,
        unit = item.unit,
    );
    let _ = write!(
        text,
        "\nOrdered by: {}\n\nPlease prepare this order for pickup/delivery.\n\nContact: {}",
        order.ordered_by,
        order.contact.unwrap_or(DEFAULT_CONTACT),
    );
    text
}

fn inventory_section(document: PdfDocument, inventory: &InventoryReport) -> PdfDocument {
    let mut document: PdfDocument = document
        .heading("Inventory")
        .line(&format!("Items Tracked: {}", inventory.total_items))
        .line(&format!("Stock Value (cost): {}", inventory.total_cost_value))
        .line(&format!("Stock Value (sale): {}", inventory.total_sale_value))
        .line(&format!("Potential Profit: {}", inventory.potential_profit))
        .line(&format!("Low Stock Items: {}", inventory.low_stock.len()));
    for entry in &inventory.low_stock {
        document = document.line(&format!(
            "  - {}: {} {} (threshold {})",
            entry.name, entry.quantity, entry.unit, entry.threshold
        ));
    }
    document
}

/// Renders the printable business report for a date range.
///
/// # Arguments
///
/// * `summary` - Figures computed for the range
/// * `start` / `end` - Range bounds as shown on the report
/// * `mechanic_names` - Display names keyed by user ID; unknown IDs print as `#id`
#[must_use]
pub fn business_report_pdf(
    summary: &BusinessSummary,
    start: &str,
    end: &str,
    mechanic_names: &HashMap<i64, String>,
) -> Vec<u8> {
    let booking: &BookingStats = &summary.booking;
    let mut document: PdfDocument = PdfDocument::new()
        .title(CENTER_NAME)
        .heading("Business Report")
        .line(&format!("Period: {start} to {end}"))
        .blank()
        .heading("Revenue")
        .line(&format!("Total Revenue: {}", summary.total_revenue))
        .line(&format!("Parts Revenue: {}", summary.parts_revenue))
        .line(&format!("Labor Revenue: {}", summary.labor_revenue))
        .blank()
        .heading("Appointments")
        .line(&format!("Total: {}", booking.total))
        .line(&format!("Scheduled: {}", booking.scheduled))
        .line(&format!("In Progress: {}", booking.in_progress))
        .line(&format!("Completed: {}", booking.completed))
        .line(&format!("Cancelled: {}", booking.cancelled))
        .line(&format!("Completion Rate: {:.1}%", summary.completion_rate))
        .blank()
        .heading("Top Services");

    if summary.top_services.is_empty() {
        document = document.line("No appointments in this period");
    }
    for (service, count) in &summary.top_services {
        document = document.line(&format!("{service}: {count}"));
    }

    document = document.blank().heading("Mechanic Performance");
    if summary.top_mechanics.is_empty() {
        document = document.line("No completed jobs in this period");
    }
    for mechanic in &summary.top_mechanics {
        let name: String = mechanic_names
            .get(&mechanic.mechanic_id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", mechanic.mechanic_id));
        document = document.line(&format!(
            "{name}: {} jobs, {}",
            mechanic.jobs_completed, mechanic.revenue
        ));
    }

    document = inventory_section(document.blank(), &summary.inventory);

    document
        .blank()
        .heading("Customer Satisfaction")
        .line(&format!(
            "Average Rating: {:.2} ({} reviews)",
            summary.average_rating, summary.review_count
        ))
        .line(&format!(
            "Complaints: {} total, {} open",
            summary.total_complaints, summary.open_complaints
        ))
        .render()
}
