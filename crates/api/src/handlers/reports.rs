// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manager reports.
//!
//! Reports are read-only. Date ranges are inclusive calendar days in UTC;
//! without a range a report covers every record.

use servicebay::{
    BookingStats, BusinessSummary, InventoryReport, ReportPeriod, RevenueReport, booking_stats,
    business_summary, inventory_report as rollup_inventory, revenue_report as rollup_revenue,
};
use servicebay_domain::{
    Appointment, AppointmentStatus, Complaint, Feedback, InventoryItem, format_date, parse_date,
};
use servicebay_notify::business_report_pdf;
use servicebay_persistence::SqlitePersistence;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use time::{Date, Duration, OffsetDateTime, Time};
use tracing::info;

use super::{lookup_person, timestamp};
use crate::auth::{Action, AuthenticatedUser, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    BookingStatsResponse, DateRangeQuery, DocumentResponse, InventoryReportResponse,
    LowStockInfo, RevenueResponse,
};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DayRange {
    start: Date,
    end: Date,
}

impl DayRange {
    /// Stored-format bounds covering the range, end exclusive.
    fn bounds(self) -> Result<(String, String), ApiError> {
        let start: String = timestamp(self.start.with_time(Time::MIDNIGHT).assume_utc())?;
        let end: String = timestamp(
            (self.end + Duration::days(1))
                .with_time(Time::MIDNIGHT)
                .assume_utc(),
        )?;
        Ok((start, end))
    }
}

fn parse_range(query: &DateRangeQuery) -> Result<Option<DayRange>, ApiError> {
    match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (None, None) => Ok(None),
        (Some(start), Some(end)) => {
            let start: Date = parse_date(start).map_err(translate_domain_error)?;
            let end: Date = parse_date(end).map_err(translate_domain_error)?;
            if end < start {
                return Err(ApiError::InvalidInput {
                    field: String::from("end_date"),
                    message: String::from("end_date must not be before start_date"),
                });
            }
            Ok(Some(DayRange { start, end }))
        }
        _ => Err(ApiError::InvalidInput {
            field: String::from("start_date"),
            message: String::from("start_date and end_date must be given together"),
        }),
    }
}

/// Appointment counts and completed revenue for bookings made in the
/// trailing period.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `period` - `week`, `month` or `year`; defaults to `week`
/// * `user` - The calling manager
/// * `now` - End of the window
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the period is unknown.
pub fn booking_stats_report(
    persistence: &mut SqlitePersistence,
    period: Option<&str>,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<BookingStatsResponse, ApiError> {
    AuthorizationService::authorize(user, Action::ViewReports)?;

    let period: ReportPeriod = period
        .map(ReportPeriod::from_str)
        .transpose()
        .map_err(translate_domain_error)?
        .unwrap_or_default();

    let appointments: Vec<Appointment> = persistence
        .list_appointments_created_between(
            &timestamp(period.start(now))?,
            &timestamp(now + Duration::seconds(1))?,
        )
        .map_err(translate_persistence_error)?;
    let stats: BookingStats = booking_stats(&appointments).map_err(translate_core_error)?;

    Ok(BookingStatsResponse {
        period: period.as_str().to_string(),
        total: stats.total,
        scheduled: stats.scheduled,
        in_progress: stats.in_progress,
        completed: stats.completed,
        cancelled: stats.cancelled,
        revenue_cents: stats.revenue.cents(),
    })
}

/// Completed-appointment revenue grouped by finish day.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the range is invalid.
pub fn revenue_report(
    persistence: &mut SqlitePersistence,
    query: &DateRangeQuery,
    user: &AuthenticatedUser,
) -> Result<RevenueResponse, ApiError> {
    AuthorizationService::authorize(user, Action::ViewReports)?;

    let range: Option<DayRange> = parse_range(query)?;
    let completed: Vec<Appointment> = match range {
        Some(range) => {
            let (start, end): (String, String) = range.bounds()?;
            persistence.list_completed_between(&start, &end)
        }
        None => persistence.list_all_appointments().map(|all| {
            all.into_iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .collect()
        }),
    }
    .map_err(translate_persistence_error)?;

    let report: RevenueReport = rollup_revenue(&completed).map_err(translate_core_error)?;

    Ok(RevenueResponse {
        start_date: range.map(|r| format_date(r.start)),
        end_date: range.map(|r| format_date(r.end)),
        total_revenue_cents: report.total_revenue.cents(),
        appointment_count: report.appointment_count,
        daily_revenue_cents: report
            .daily_revenue
            .into_iter()
            .map(|(day, amount)| (day, amount.cents()))
            .collect::<BTreeMap<String, i64>>(),
    })
}

/// Stock valuation and the low-stock list.
///
/// # Errors
///
/// Returns an error if the caller is not a manager or the query fails.
pub fn inventory_report(
    persistence: &mut SqlitePersistence,
    user: &AuthenticatedUser,
) -> Result<InventoryReportResponse, ApiError> {
    AuthorizationService::authorize(user, Action::ViewReports)?;

    let items: Vec<InventoryItem> = persistence
        .list_inventory()
        .map_err(translate_persistence_error)?;
    let report: InventoryReport = rollup_inventory(&items).map_err(translate_core_error)?;

    Ok(InventoryReportResponse {
        total_items: report.total_items,
        total_cost_value_cents: report.total_cost_value.cents(),
        total_sale_value_cents: report.total_sale_value.cents(),
        potential_profit_cents: report.potential_profit.cents(),
        low_stock_items: report
            .low_stock
            .into_iter()
            .map(|entry| LowStockInfo {
                name: entry.name,
                quantity: entry.quantity,
                unit: entry.unit,
                threshold: entry.threshold,
            })
            .collect(),
    })
}

/// Renders the printable business report.
///
/// Appointments, feedback and complaints are those created in the range.
/// Inventory is always the current stock.
///
/// # Errors
///
/// Returns an error if the caller is not a manager, the range is invalid,
/// or a query fails.
pub fn business_report(
    persistence: &mut SqlitePersistence,
    query: &DateRangeQuery,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> Result<DocumentResponse, ApiError> {
    AuthorizationService::authorize(user, Action::ViewReports)?;

    let range: Option<DayRange> = parse_range(query)?;
    let (appointments, feedback, complaints): (Vec<Appointment>, Vec<Feedback>, Vec<Complaint>) =
        match range {
            Some(range) => {
                let (start, end): (String, String) = range.bounds()?;
                (
                    persistence
                        .list_appointments_created_between(&start, &end)
                        .map_err(translate_persistence_error)?,
                    persistence
                        .list_feedback_created_between(&start, &end)
                        .map_err(translate_persistence_error)?,
                    persistence
                        .list_complaints_created_between(&start, &end)
                        .map_err(translate_persistence_error)?,
                )
            }
            None => (
                persistence
                    .list_all_appointments()
                    .map_err(translate_persistence_error)?,
                persistence
                    .list_feedback()
                    .map_err(translate_persistence_error)?,
                persistence
                    .list_complaints(None)
                    .map_err(translate_persistence_error)?,
            ),
        };
    let inventory: Vec<InventoryItem> = persistence
        .list_inventory()
        .map_err(translate_persistence_error)?;

    let summary: BusinessSummary =
        business_summary(&appointments, &inventory, &feedback, &complaints)
            .map_err(translate_core_error)?;

    let mut mechanic_names: HashMap<i64, String> = HashMap::new();
    for performance in &summary.top_mechanics {
        if let Some(person) = lookup_person(persistence, Some(performance.mechanic_id))? {
            mechanic_names.insert(performance.mechanic_id, person.name);
        }
    }

    let today: String = format_date(now.date());
    let (start_label, end_label, filename): (String, String, String) = match range {
        Some(range) => {
            let start: String = format_date(range.start);
            let end: String = format_date(range.end);
            let filename: String = format!("business-report-{start}-to-{end}.pdf");
            (start, end, filename)
        }
        None => (
            String::from("earliest record"),
            today.clone(),
            format!("business-report-{today}.pdf"),
        ),
    };

    let content: Vec<u8> = business_report_pdf(&summary, &start_label, &end_label, &mechanic_names);

    info!(
        filename = %filename,
        appointments = appointments.len(),
        bytes = content.len(),
        "Business report generated"
    );

    Ok(DocumentResponse {
        filename,
        content_type: "application/pdf",
        content,
    })
}
