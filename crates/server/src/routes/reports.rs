// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manager reports and the downloadable business report.

use axum::{
    Router,
    extract::{Query, State as AxumState},
    http::{
        HeaderValue, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::get,
};
use servicebay_api::handlers::reports::{
    booking_stats_report, business_report, inventory_report, revenue_report,
};
use servicebay_api::{
    BookingStatsQuery, BookingStatsResponse, DateRangeQuery, DocumentResponse,
    InventoryReportResponse, RevenueResponse,
};
use time::OffsetDateTime;

use super::Envelope;
use crate::AppState;
use crate::error::HttpError;
use crate::session::SessionUser;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports/booking-stats", get(handle_booking_stats))
        .route("/reports/revenue", get(handle_revenue))
        .route("/reports/inventory", get(handle_inventory_report))
        .route("/reports/business-report", get(handle_business_report))
}

async fn handle_booking_stats(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(query): Query<BookingStatsQuery>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let stats: BookingStatsResponse = booking_stats_report(
        &mut persistence,
        query.period.as_deref(),
        &user,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Envelope::ok().with("stats", &stats)
}

async fn handle_revenue(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let report: RevenueResponse = revenue_report(&mut persistence, &query, &user)?;
    drop(persistence);

    Envelope::ok().with("report", &report)
}

async fn handle_inventory_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Envelope, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let report: InventoryReportResponse = inventory_report(&mut persistence, &user)?;
    drop(persistence);

    Envelope::ok().with("report", &report)
}

/// Handler for GET `/reports/business-report`.
///
/// Responds with the PDF itself as an attachment.
async fn handle_business_report(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Query(query): Query<DateRangeQuery>,
) -> Result<Response, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let document: DocumentResponse =
        business_report(&mut persistence, &query, &user, OffsetDateTime::now_utc())?;
    drop(persistence);

    let disposition: HeaderValue =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", document.filename))
            .map_err(|e| HttpError::internal(format!("Invalid report filename: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(document.content_type)),
            (CONTENT_DISPOSITION, disposition),
        ],
        document.content,
    )
        .into_response())
}
