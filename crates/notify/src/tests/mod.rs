// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod dispatcher_tests;
mod message_tests;

use std::sync::Mutex;

use async_trait::async_trait;
use servicebay_domain::{
    Appointment, AppointmentStatus, Complaint, ComplaintPriority, ComplaintStatus, InventoryItem,
    JobCard, Money, PhoneNumber, RegistrationNumber, Slot, Vehicle,
};
use time::macros::datetime;

use crate::{EmailSender, NotifyError, OutboundEmail, Recipient, SmsReceipt, SmsSender};

/// Keeps every email it is asked to send.
#[derive(Default)]
pub struct RecordingEmailSender {
    pub sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Rejects every email.
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), NotifyError> {
        Err(NotifyError::Transport(String::from("connection refused")))
    }
}

/// Accepts every SMS and keeps the bodies.
#[derive(Default)]
pub struct RecordingSmsSender {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<SmsReceipt, NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.value().to_string(), body.to_string()));
        Ok(SmsReceipt {
            message_sid: String::from("SM123"),
            status: Some(String::from("queued")),
        })
    }
}

pub const CUSTOMER: Recipient<'static> = Recipient {
    name: "Dana Driver",
    email: "dana@example.com",
};

pub fn create_test_vehicle() -> Vehicle {
    Vehicle {
        vehicle_id: Some(3),
        customer_id: 10,
        make: String::from("Honda"),
        model: String::from("Civic"),
        year: 2019,
        registration_number: RegistrationNumber::parse("KA01AB1234").unwrap(),
    }
}

pub fn create_test_appointment(discount_eligible: bool) -> Appointment {
    Appointment {
        appointment_id: Some(42),
        customer_id: 10,
        vehicle_id: 3,
        service_type: String::from("Oil Change"),
        slot: Slot::parse("2024-06-03", "10:00").unwrap(),
        status: AppointmentStatus::Scheduled,
        assigned_mechanic_id: None,
        notes: None,
        description: None,
        job_card: JobCard::default(),
        subtotal: Money::ZERO,
        final_cost: Money::ZERO,
        discount_eligible,
        started_at: None,
        finished_at: None,
        feedback_submitted: false,
        version: 1,
        created_at: datetime!(2024-06-01 09:00 UTC),
    }
}

pub fn create_test_complaint() -> Complaint {
    Complaint {
        complaint_id: Some(7),
        customer_id: 10,
        appointment_id: Some(42),
        subject: String::from("Scratched door"),
        description: String::from("The driver door was scratched during service."),
        status: ComplaintStatus::Open,
        priority: ComplaintPriority::High,
        manager_response: None,
        resolved_by: None,
        resolved_at: None,
        created_at: datetime!(2024-06-04 12:00 UTC),
    }
}

pub fn create_test_item() -> InventoryItem {
    InventoryItem {
        item_id: Some(5),
        name: String::from("Brake Pads"),
        part_number: Some(String::from("BP-220")),
        supplier: Some(String::from("orders@parts.example.com")),
        quantity: 2,
        unit: String::from("sets"),
        cost_price: Money::from_cents(2500),
        sale_price: Money::from_cents(4000),
        low_stock_threshold: 4,
    }
}
