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

mod billing;
mod entities;
mod error;
mod off_peak;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use billing::{
    Billing, JobCard, LaborItem, Money, MAX_PART_QUANTITY, OFF_PEAK_DISCOUNT_PERCENT, PartUsed, compute_billing,
};
pub use entities::{Appointment, Complaint, Feedback, InventoryItem, Vehicle};
pub use error::DomainError;
pub use off_peak::{OffPeakDays, parse_weekday};
pub use types::{
    AppointmentStatus, ComplaintPriority, ComplaintStatus, EmailAddress, PhoneNumber, Rating,
    RegistrationNumber, Role, Slot, format_date, parse_date,
};
pub use validation::{
    MIN_VEHICLE_YEAR, optional_text, require_text, validate_inventory_item,
    validate_positive_quantity, validate_vehicle,
};
