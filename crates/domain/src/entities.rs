// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::billing::{JobCard, Money};
use crate::types::{
    AppointmentStatus, ComplaintPriority, ComplaintStatus, Rating, RegistrationNumber, Slot,
};
use time::OffsetDateTime;

/// A service appointment.
///
/// `appointment_id` is `None` until the appointment has been persisted.
/// `version` starts at 1 and is bumped by storage on every write; writers
/// must present the version they read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub appointment_id: Option<i64>,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub service_type: String,
    pub slot: Slot,
    pub status: AppointmentStatus,
    pub assigned_mechanic_id: Option<i64>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub job_card: JobCard,
    pub subtotal: Money,
    pub final_cost: Money,
    pub discount_eligible: bool,
    pub started_at: Option<OffsetDateTime>,
    pub finished_at: Option<OffsetDateTime>,
    pub feedback_submitted: bool,
    pub version: i64,
    pub created_at: OffsetDateTime,
}

impl Appointment {
    /// Returns whether `user_id` is the booking customer.
    #[must_use]
    pub const fn is_owned_by(&self, user_id: i64) -> bool {
        self.customer_id == user_id
    }

    /// Returns whether `user_id` is the assigned mechanic.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.assigned_mechanic_id == Some(user_id)
    }
}

/// A customer's vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub vehicle_id: Option<i64>,
    pub customer_id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub registration_number: RegistrationNumber,
}

/// A stock-keeping record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub item_id: Option<i64>,
    pub name: String,
    pub part_number: Option<String>,
    pub supplier: Option<String>,
    pub quantity: i64,
    pub unit: String,
    pub cost_price: Money,
    pub sale_price: Money,
    pub low_stock_threshold: i64,
}

impl InventoryItem {
    pub const DEFAULT_UNIT: &'static str = "units";
    pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

    /// Low stock means on-hand quantity at or below the threshold.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

/// Post-service feedback; at most one per appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub feedback_id: Option<i64>,
    pub appointment_id: i64,
    pub customer_id: i64,
    /// The mechanic who worked the appointment, captured at submission.
    pub mechanic_id: Option<i64>,
    pub rating: Rating,
    pub comment: Option<String>,
    pub created_at: OffsetDateTime,
}

/// A customer complaint ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    pub complaint_id: Option<i64>,
    pub customer_id: i64,
    pub appointment_id: Option<i64>,
    pub subject: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    pub manager_response: Option<String>,
    pub resolved_by: Option<i64>,
    pub resolved_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}
