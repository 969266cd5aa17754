// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode, header},
    response::Response,
};
use servicebay_notify::{NotifyError, OutboundEmail};
use std::sync::Mutex as StdMutex;
use tower::ServiceExt;

const PASSWORD: &str = "Garage2026!";

/// A Monday, far enough ahead to stay bookable.
const BOOKING_DATE: &str = "2030-01-07";

/// Records the recipient and subject of every email it is asked to send.
#[derive(Default)]
struct RecordingEmailSender {
    sent: StdMutex<Vec<(String, String)>>,
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to.clone(), email.subject.clone()));
        Ok(())
    }
}

fn create_test_app_state(notifier: Notifier, dev_mode: bool) -> AppState {
    let persistence: SqlitePersistence =
        SqlitePersistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier,
        contacts: ContactSettings {
            manager_email: Some(String::from("manager@garage.example")),
            contact_email: Some(String::from("orders@garage.example")),
        },
        dev_mode,
        session_ttl: Duration::days(30),
    }
}

fn create_test_app() -> Router {
    build_router(create_test_app_state(Notifier::disabled(), false))
}

async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> (HttpStatusCode, Value) {
    let response = send_raw(app, method, uri, token, body).await;
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

fn registration(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": PASSWORD,
        "password_confirmation": PASSWORD,
    })
}

async fn login_as(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(&json!({"email": email, "password": PASSWORD})),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK, "login failed: {body}");
    body["session_token"].as_str().unwrap().to_string()
}

async fn register_customer(app: &Router) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(&registration("Nimal Perera", "nimal@example.com")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    login_as(app, "nimal@example.com").await
}

async fn bootstrap_manager(app: &Router) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/auth/bootstrap-manager",
        None,
        Some(&registration("Maya Silva", "maya@example.com")),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    login_as(app, "maya@example.com").await
}

async fn add_vehicle(app: &Router, token: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/vehicles",
        Some(token),
        Some(&json!({
            "make": "Toyota",
            "model": "Corolla",
            "year": 2018,
            "registration_number": "cab-1234",
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED, "vehicle failed: {body}");
    body["vehicle"]["vehicle_id"].as_i64().unwrap()
}

// ============================================================================
// Routing and sessions
// ============================================================================

#[tokio::test]
async fn test_index_describes_api() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/", None, None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["endpoints"]["appointments"], "/appointments");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/no-such-thing", None, None).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/auth/me", None, None).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, no token");
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/vehicles", Some("not-a-session"), None).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_register_login_and_whoami() {
    let app = create_test_app();
    let token = register_customer(&app).await;

    let (status, body) = send(&app, "GET", "/auth/me", Some(&token), None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["user"]["email"], "nimal@example.com");
    assert_eq!(body["user"]["role"], "Customer");
}

#[tokio::test]
async fn test_wrong_password_returns_401() {
    let app = create_test_app();
    register_customer(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(&json!({"email": "nimal@example.com", "password": "Wrong2026!"})),
    )
    .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = create_test_app();
    let token = register_customer(&app).await;

    let (status, _) = send(&app, "POST", "/auth/logout", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, _) = send(&app, "GET", "/auth/me", Some(&token), None).await;
    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_customer_cannot_view_inventory() {
    let app = create_test_app();
    let token = register_customer(&app).await;

    let (status, body) = send(&app, "GET", "/inventory", Some(&token), None).await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}

// ============================================================================
// Appointments
// ============================================================================

#[tokio::test]
async fn test_booking_sends_confirmation_and_rejects_taken_slot() {
    let recorder: Arc<RecordingEmailSender> = Arc::new(RecordingEmailSender::default());
    let notifier = Notifier::new(recorder.clone(), Arc::new(DisabledSmsSender));
    let app = build_router(create_test_app_state(notifier, false));
    let token = register_customer(&app).await;
    let vehicle_id = add_vehicle(&app, &token).await;
    let booking = json!({
        "vehicle_id": vehicle_id,
        "service_type": "Oil Change",
        "date": BOOKING_DATE,
        "time": "10:00",
    });

    let (status, body) = send(&app, "POST", "/appointments", Some(&token), Some(&booking)).await;

    assert_eq!(status, HttpStatusCode::CREATED, "booking failed: {body}");
    assert_eq!(body["appointment"]["status"], "Scheduled");

    let (status, body) = send(&app, "POST", "/appointments", Some(&token), Some(&booking)).await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let delivered = tokio::time::timeout(std::time::Duration::from_secs(2), async {
        loop {
            if !recorder.sent.lock().unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(delivered.is_ok(), "confirmation email was never sent");
    assert_eq!(recorder.sent.lock().unwrap()[0].0, "nimal@example.com");
}

#[tokio::test]
async fn test_my_appointments_lists_bookings() {
    let app = create_test_app();
    let token = register_customer(&app).await;
    let vehicle_id = add_vehicle(&app, &token).await;
    send(
        &app,
        "POST",
        "/appointments",
        Some(&token),
        Some(&json!({
            "vehicle_id": vehicle_id,
            "service_type": "Brake Inspection",
            "date": BOOKING_DATE,
            "time": "14:00",
        })),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        "/appointments/my-appointments",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["appointments"][0]["service_type"], "Brake Inspection");
}

#[tokio::test]
async fn test_invalid_booking_date_returns_400() {
    let app = create_test_app();
    let token = register_customer(&app).await;
    let vehicle_id = add_vehicle(&app, &token).await;

    let (status, body) = send(
        &app,
        "POST",
        "/appointments",
        Some(&token),
        Some(&json!({
            "vehicle_id": vehicle_id,
            "service_type": "Oil Change",
            "date": "07/01/2030",
            "time": "10:00",
        })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// ============================================================================
// Inventory and reports
// ============================================================================

#[tokio::test]
async fn test_sms_order_without_provider_returns_502() {
    let app = create_test_app();
    let token = bootstrap_manager(&app).await;
    let (status, body) = send(
        &app,
        "POST",
        "/inventory",
        Some(&token),
        Some(&json!({
            "name": "Oil Filter",
            "quantity": 10,
            "cost_price_cents": 500,
            "sale_price_cents": 1000,
        })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);
    let item_id = body["item"]["item_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/inventory/{item_id}/order"),
        Some(&token),
        Some(&json!({"phone_number": "+94771234567", "quantity": 5})),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_business_report_is_a_pdf_attachment() {
    let app = create_test_app();
    let token = bootstrap_manager(&app).await;

    let response = send_raw(
        &app,
        "GET",
        "/reports/business-report?start_date=2026-01-01&end_date=2026-01-31",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"business-report-2026-01-01-to-2026-01-31.pdf\""
    );
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body_bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_report_rejects_half_range() {
    let app = create_test_app();
    let token = bootstrap_manager(&app).await;

    let (status, _) = send(
        &app,
        "GET",
        "/reports/revenue?start_date=2026-01-01",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

// ============================================================================
// Internal errors
// ============================================================================

fn failing_app(dev_mode: bool) -> Router {
    let app_state: AppState = create_test_app_state(Notifier::disabled(), dev_mode);
    Router::new()
        .route(
            "/fail",
            get(|| async { HttpError::internal("database file is locked") }),
        )
        .layer(map_response_with_state(
            app_state.clone(),
            reveal_internal_detail,
        ))
        .with_state(app_state)
}

#[tokio::test]
async fn test_internal_detail_hidden_in_production() {
    let app = failing_app(false);

    let (status, body) = send(&app, "GET", "/fail", None, None).await;

    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_internal_detail_shown_in_development() {
    let app = failing_app(true);

    let (status, body) = send(&app, "GET", "/fail", None, None).await;

    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "database file is locked");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_args_definition_is_consistent() {
    use clap::CommandFactory;
    Args::command().debug_assert();
}

#[test]
fn test_session_ttl_days_is_bounded() {
    let parse = |days: &str| {
        Args::try_parse_from(["servicebay-server", "--session-ttl-days", days])
            .map(|args| args.session_ttl_days)
    };

    assert_eq!(parse("1").unwrap(), 1);
    assert_eq!(parse("3650").unwrap(), 3650);
    assert!(parse("0").is_err());
    assert!(parse("-7").is_err());
    assert!(parse("3651").is_err());
    assert!(parse("9223372036854775807").is_err());
}
