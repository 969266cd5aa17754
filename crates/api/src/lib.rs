// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
pub mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{Action, AuthenticatedUser, AuthenticationService, AuthorizationService};
pub use capabilities::compute_appointment_capabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_notify_error,
    translate_persistence_error,
};
pub use handlers::inventory::SmsOrderPlan;
pub use handlers::{ApiResult, ContactSettings};
pub use password_policy::{
    BCRYPT_MAX_BYTES, CharacterClass, NewPassword, PasswordPolicy, PasswordPolicyError,
};
pub use request_response::{
    AppointmentCapabilities, AppointmentInfo, AssignMechanicRequest, BookAppointmentRequest,
    BookingStatsQuery, BookingStatsResponse, Capability, ComplaintInfo, ComplaintListQuery,
    ComplaintStatsResponse, CreateComplaintRequest, CreateInventoryItemRequest,
    CreateMechanicRequest, CreateVehicleRequest, DateRangeQuery, DocumentResponse,
    EmailOrderRequest, FeedbackInfo, InventoryItemInfo, InventoryReportResponse, JobCardRequest,
    LaborItemInfo, LaborLineRequest, LoginRequest, LoginResponse, LowStockInfo,
    MechanicRatingInfo, PartLineRequest, PartUsedInfo, PersonSummary, ReceiveStockRequest,
    RegisterRequest, RevenueResponse, SettingsInfo, SmsOrderRequest, SmsOrderResponse,
    SubmitFeedbackRequest, UpdateComplaintRequest, UpdateInventoryItemRequest,
    UpdateSettingsRequest, UpdateVehicleRequest, UserInfo, VehicleInfo, VehicleSummary,
};
