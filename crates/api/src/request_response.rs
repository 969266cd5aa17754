// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Currency amounts travel as integer cents in fields suffixed `_cents`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Capabilities
// ============================================================================

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value: bool = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(value))
    }
}

/// What the viewer may do with an appointment. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentCapabilities {
    pub can_cancel: Capability,
    pub can_assign: Capability,
    pub can_update_job_card: Capability,
    pub can_submit_feedback: Capability,
}

// ============================================================================
// Accounts
// ============================================================================

/// Self-service customer registration, also used to bootstrap the first manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// A manager creating a mechanic account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMechanicRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Name and email of a person referenced by another record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub user_id: i64,
    pub name: String,
    pub email: String,
}

// ============================================================================
// Vehicles
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub registration_number: String,
}

/// Partial vehicle update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateVehicleRequest {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub registration_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub vehicle_id: i64,
    pub customer_id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub registration_number: String,
}

/// The vehicle fields embedded in an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleSummary {
    pub make: String,
    pub model: String,
    pub registration_number: String,
}

// ============================================================================
// Inventory
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInventoryItemRequest {
    pub name: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
    pub cost_price_cents: i64,
    pub sale_price_cents: i64,
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
}

/// Partial inventory update; absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateInventoryItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub cost_price_cents: Option<i64>,
    #[serde(default)]
    pub sale_price_cents: Option<i64>,
    #[serde(default)]
    pub low_stock_threshold: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItemInfo {
    pub item_id: i64,
    pub name: String,
    pub part_number: Option<String>,
    pub supplier: Option<String>,
    pub quantity: i64,
    pub unit: String,
    pub cost_price_cents: i64,
    pub sale_price_cents: i64,
    pub low_stock_threshold: i64,
    pub is_low_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveStockRequest {
    pub quantity_received: i64,
}

/// A reorder emailed to a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailOrderRequest {
    pub supplier_email: String,
    pub quantity: i64,
}

/// A reorder sent by text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsOrderRequest {
    pub phone_number: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsOrderResponse {
    pub order_id: String,
    pub message_sid: String,
    pub status: Option<String>,
}

// ============================================================================
// Appointments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub vehicle_id: i64,
    pub service_type: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignMechanicRequest {
    pub mechanic_id: i64,
}

/// One part line on a job card.
///
/// Lines that reference an inventory item take the item's name and current
/// sale price; free-name lines must carry their own price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartLineRequest {
    #[serde(default)]
    pub inventory_item_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub unit_price_cents: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborLineRequest {
    pub description: String,
    pub cost_cents: i64,
}

/// A job-card edit. Absent fields are left unchanged; present line lists
/// replace the existing ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobCardRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub parts_used: Option<Vec<PartLineRequest>>,
    #[serde(default)]
    pub labor_items: Option<Vec<LaborLineRequest>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartUsedInfo {
    pub inventory_item_id: Option<i64>,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborItemInfo {
    pub description: String,
    pub cost_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentInfo {
    pub appointment_id: i64,
    pub customer_id: i64,
    pub vehicle_id: i64,
    pub service_type: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub assigned_mechanic_id: Option<i64>,
    pub notes: Option<String>,
    pub description: Option<String>,
    pub parts_used: Vec<PartUsedInfo>,
    pub labor_items: Vec<LaborItemInfo>,
    pub subtotal_cents: i64,
    pub final_cost_cents: i64,
    pub discount_eligible: bool,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub feedback_submitted: bool,
    pub version: i64,
    pub created_at: String,
    pub vehicle: Option<VehicleSummary>,
    pub customer: Option<PersonSummary>,
    pub mechanic: Option<PersonSummary>,
    pub capabilities: AppointmentCapabilities,
}

// ============================================================================
// Feedback
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub appointment_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackInfo {
    pub feedback_id: i64,
    pub appointment_id: i64,
    pub customer_id: i64,
    pub mechanic_id: Option<i64>,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicRatingInfo {
    pub mechanic_id: i64,
    pub mechanic_name: Option<String>,
    pub average_rating: f64,
    pub review_count: usize,
}

// ============================================================================
// Complaints
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateComplaintRequest {
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub appointment_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateComplaintRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub manager_response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintInfo {
    pub complaint_id: i64,
    pub customer_id: i64,
    pub appointment_id: Option<i64>,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub manager_response: Option<String>,
    pub resolved_by: Option<i64>,
    pub resolved_at: Option<String>,
    pub created_at: String,
    pub customer: Option<PersonSummary>,
}

/// Query string for the complaint list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplaintListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintStatsResponse {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsInfo {
    pub off_peak_days: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub off_peak_days: Vec<String>,
}

// ============================================================================
// Reports
// ============================================================================

/// Query string for booking statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookingStatsQuery {
    #[serde(default)]
    pub period: Option<String>,
}

/// Optional inclusive `YYYY-MM-DD` range. Both bounds or neither.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRangeQuery {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingStatsResponse {
    pub period: String,
    pub total: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueResponse {
    /// Absent when the report covers all records.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_revenue_cents: i64,
    pub appointment_count: usize,
    /// Completed revenue keyed by finish day (`YYYY-MM-DD`).
    pub daily_revenue_cents: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockInfo {
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub threshold: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryReportResponse {
    pub total_items: usize,
    pub total_cost_value_cents: i64,
    pub total_sale_value_cents: i64,
    pub potential_profit_cents: i64,
    pub low_stock_items: Vec<LowStockInfo>,
}

/// A rendered document ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResponse {
    pub filename: String,
    pub content_type: &'static str,
    pub content: Vec<u8>,
}
