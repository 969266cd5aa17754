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

mod apply;
mod booking;
mod command;
mod complaint;
mod error;
mod reports;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use booking::{BookingRequest, book_appointment, requested_slot};
pub use command::{Command, JobCardUpdate};
pub use complaint::{
    ComplaintRequest, ComplaintUpdate, ComplaintUpdateResult, file_complaint, update_complaint,
};
pub use error::CoreError;
pub use reports::{
    BookingStats, BusinessSummary, InventoryReport, LowStockEntry, MechanicPerformance,
    MechanicRating, ReportPeriod, RevenueReport, booking_stats, business_summary,
    inventory_report, mechanic_ratings, revenue_report,
};
pub use state::{Actor, StockDebit, TransitionResult};
