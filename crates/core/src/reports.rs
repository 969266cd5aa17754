// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only rollups over appointments, inventory, feedback and complaints.

use crate::error::CoreError;
use servicebay_domain::{
    Appointment, AppointmentStatus, Complaint, ComplaintStatus, DomainError, Feedback,
    InventoryItem, Money, format_date,
};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use time::{Date, Duration, Month, OffsetDateTime};

/// Number of entries kept in "top" lists.
const TOP_N: usize = 5;

/// Look-back window for booking statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPeriod {
    #[default]
    Week,
    Month,
    Year,
}

impl ReportPeriod {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// The start of the window ending at `now`.
    #[must_use]
    pub fn start(&self, now: OffsetDateTime) -> OffsetDateTime {
        match self {
            Self::Week => now - Duration::days(7),
            Self::Month => shift_months(now, 1),
            Self::Year => shift_months(now, 12),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(DomainError::InvalidField {
                field: "period",
                reason: format!("Unknown period '{s}', expected week, month or year"),
            }),
        }
    }
}

/// Moves a timestamp back by whole calendar months, clamping the day of
/// month to the target month's length.
fn shift_months(now: OffsetDateTime, months_back: i32) -> OffsetDateTime {
    let date: Date = now.date();
    let index: i32 = date.year() * 12 + i32::from(u8::from(date.month())) - 1 - months_back;
    let year: i32 = index.div_euclid(12);
    let Ok(month_number) = u8::try_from(index.rem_euclid(12) + 1) else {
        return now - Duration::days(30 * i64::from(months_back));
    };
    let Ok(month) = Month::try_from(month_number) else {
        return now - Duration::days(30 * i64::from(months_back));
    };

    (1..=date.day())
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .map_or_else(
            || now - Duration::days(30 * i64::from(months_back)),
            |shifted| now.replace_date(shifted),
        )
}

/// Appointment counts by status plus completed revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookingStats {
    pub total: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub revenue: Money,
}

/// Tallies appointments by status.
///
/// # Errors
///
/// Returns an error if the revenue sum overflows.
pub fn booking_stats(appointments: &[Appointment]) -> Result<BookingStats, CoreError> {
    let mut stats: BookingStats = BookingStats {
        total: appointments.len(),
        ..BookingStats::default()
    };
    for appointment in appointments {
        match appointment.status {
            AppointmentStatus::Scheduled => stats.scheduled += 1,
            AppointmentStatus::InProgress => stats.in_progress += 1,
            AppointmentStatus::Completed => {
                stats.completed += 1;
                stats.revenue = stats.revenue.checked_add(appointment.final_cost)?;
            }
            AppointmentStatus::Cancelled => stats.cancelled += 1,
        }
    }
    Ok(stats)
}

/// Completed-appointment revenue grouped by finish day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevenueReport {
    pub total_revenue: Money,
    /// Keyed by `YYYY-MM-DD`, in date order.
    pub daily_revenue: BTreeMap<String, Money>,
    pub appointment_count: usize,
}

/// Groups completed appointments by the UTC day they finished.
///
/// Appointments that are not completed, or have no finish time, are ignored.
///
/// # Errors
///
/// Returns an error if a sum overflows.
pub fn revenue_report(appointments: &[Appointment]) -> Result<RevenueReport, CoreError> {
    let mut report: RevenueReport = RevenueReport::default();
    for appointment in appointments {
        if appointment.status != AppointmentStatus::Completed {
            continue;
        }
        let Some(finished_at) = appointment.finished_at else {
            continue;
        };
        let day: String = format_date(finished_at.to_offset(time::UtcOffset::UTC).date());
        let entry: &mut Money = report.daily_revenue.entry(day).or_insert(Money::ZERO);
        *entry = entry.checked_add(appointment.final_cost)?;
        report.total_revenue = report.total_revenue.checked_add(appointment.final_cost)?;
        report.appointment_count += 1;
    }
    Ok(report)
}

/// A low-stock line in the inventory report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockEntry {
    pub name: String,
    pub quantity: i64,
    pub unit: String,
    pub threshold: i64,
}

/// Valuation of the stock on hand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InventoryReport {
    pub total_items: usize,
    pub total_cost_value: Money,
    pub total_sale_value: Money,
    pub potential_profit: Money,
    pub low_stock: Vec<LowStockEntry>,
}

/// Values the inventory at cost and sale price.
///
/// # Errors
///
/// Returns an error if a valuation overflows.
pub fn inventory_report(items: &[InventoryItem]) -> Result<InventoryReport, CoreError> {
    let mut report: InventoryReport = InventoryReport {
        total_items: items.len(),
        ..InventoryReport::default()
    };
    for item in items {
        report.total_cost_value = report
            .total_cost_value
            .checked_add(item.cost_price.checked_mul(item.quantity)?)?;
        report.total_sale_value = report
            .total_sale_value
            .checked_add(item.sale_price.checked_mul(item.quantity)?)?;
        if item.is_low_stock() {
            report.low_stock.push(LowStockEntry {
                name: item.name.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                threshold: item.low_stock_threshold,
            });
        }
    }
    report.potential_profit = report
        .total_sale_value
        .checked_sub(report.total_cost_value)?;
    Ok(report)
}

/// Completed work attributed to one mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MechanicPerformance {
    pub mechanic_id: i64,
    pub jobs_completed: usize,
    pub revenue: Money,
}

/// Everything the printable business report shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BusinessSummary {
    pub total_revenue: Money,
    pub parts_revenue: Money,
    pub labor_revenue: Money,
    pub booking: BookingStats,
    /// Percentage of appointments that completed, 0 when there are none.
    pub completion_rate: f64,
    /// Most booked service types, most popular first.
    pub top_services: Vec<(String, usize)>,
    pub inventory: InventoryReport,
    pub average_rating: f64,
    pub review_count: usize,
    pub total_complaints: usize,
    pub open_complaints: usize,
    /// Mechanics with the most completed jobs, busiest first.
    pub top_mechanics: Vec<MechanicPerformance>,
}

/// Builds the business summary from pre-filtered records.
///
/// # Errors
///
/// Returns an error if a currency sum overflows.
#[allow(clippy::cast_precision_loss)]
pub fn business_summary(
    appointments: &[Appointment],
    inventory: &[InventoryItem],
    feedback: &[Feedback],
    complaints: &[Complaint],
) -> Result<BusinessSummary, CoreError> {
    let booking: BookingStats = booking_stats(appointments)?;

    let mut parts_revenue: Money = Money::ZERO;
    let mut labor_revenue: Money = Money::ZERO;
    let mut mechanics: HashMap<i64, MechanicPerformance> = HashMap::new();
    for appointment in appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
    {
        parts_revenue = parts_revenue.checked_add(appointment.job_card.parts_total()?)?;
        labor_revenue = labor_revenue.checked_add(appointment.job_card.labor_total()?)?;

        if let Some(mechanic_id) = appointment.assigned_mechanic_id {
            let entry: &mut MechanicPerformance =
                mechanics.entry(mechanic_id).or_insert(MechanicPerformance {
                    mechanic_id,
                    jobs_completed: 0,
                    revenue: Money::ZERO,
                });
            entry.jobs_completed += 1;
            entry.revenue = entry.revenue.checked_add(appointment.final_cost)?;
        }
    }

    let mut services: HashMap<&str, usize> = HashMap::new();
    for appointment in appointments {
        *services.entry(appointment.service_type.as_str()).or_insert(0) += 1;
    }
    let mut top_services: Vec<(String, usize)> = services
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    top_services.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_services.truncate(TOP_N);

    let mut top_mechanics: Vec<MechanicPerformance> = mechanics.into_values().collect();
    top_mechanics.sort_by(|a, b| {
        b.jobs_completed
            .cmp(&a.jobs_completed)
            .then_with(|| a.mechanic_id.cmp(&b.mechanic_id))
    });
    top_mechanics.truncate(TOP_N);

    let completion_rate: f64 = if booking.total == 0 {
        0.0
    } else {
        booking.completed as f64 / booking.total as f64 * 100.0
    };

    let average_rating: f64 = if feedback.is_empty() {
        0.0
    } else {
        let sum: u64 = feedback.iter().map(|f| u64::from(f.rating.value())).sum();
        sum as f64 / feedback.len() as f64
    };

    Ok(BusinessSummary {
        total_revenue: booking.revenue,
        parts_revenue,
        labor_revenue,
        booking,
        completion_rate,
        top_services,
        inventory: inventory_report(inventory)?,
        average_rating,
        review_count: feedback.len(),
        total_complaints: complaints.len(),
        open_complaints: complaints
            .iter()
            .filter(|c| c.status == ComplaintStatus::Open)
            .count(),
        top_mechanics,
    })
}

/// Per-mechanic rating average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MechanicRating {
    pub mechanic_id: i64,
    /// Rounded to two decimals.
    pub average_rating: f64,
    pub review_count: usize,
}

/// Averages feedback ratings per mechanic, highest average first.
///
/// Feedback without a mechanic is skipped.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mechanic_ratings(feedback: &[Feedback]) -> Vec<MechanicRating> {
    let mut totals: BTreeMap<i64, (u64, usize)> = BTreeMap::new();
    for entry in feedback {
        if let Some(mechanic_id) = entry.mechanic_id {
            let slot: &mut (u64, usize) = totals.entry(mechanic_id).or_insert((0, 0));
            slot.0 += u64::from(entry.rating.value());
            slot.1 += 1;
        }
    }

    let mut ratings: Vec<MechanicRating> = totals
        .into_iter()
        .map(|(mechanic_id, (sum, count))| MechanicRating {
            mechanic_id,
            average_rating: (sum as f64 / count as f64 * 100.0).round() / 100.0,
            review_count: count,
        })
        .collect();
    ratings.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
    ratings
}
