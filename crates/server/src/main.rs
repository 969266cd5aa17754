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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod routes;
mod session;

#[cfg(test)]
mod tests;

use axum::{Json, Router, middleware::map_response_with_state, routing::get};
use clap::{Parser, ValueEnum};
use serde_json::{Value, json};
use servicebay_api::ContactSettings;
use servicebay_notify::{
    DisabledSmsSender, EmailSender, LogEmailSender, Notifier, SmsSender, SmtpEmailSender,
    SmtpSettings, TwilioSettings, TwilioSmsSender,
};
use servicebay_persistence::SqlitePersistence;
use std::sync::Arc;
use time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::error::{HttpError, reveal_internal_detail};

/// Servicebay Server - HTTP server for the vehicle service center
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "DATABASE_URL")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1")]
    bind_address: String,

    /// Deployment environment. Development responses include internal error detail.
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = AppEnv::Production)]
    app_env: AppEnv,

    /// Lifetime of a login session, in days (1 to 3650)
    #[arg(
        long,
        env = "SESSION_TTL_DAYS",
        default_value_t = 30,
        value_parser = clap::value_parser!(i64).range(1..=3650)
    )]
    session_ttl_days: i64,

    /// SMTP relay host
    #[arg(long, env = "EMAIL_HOST", default_value = "smtp.gmail.com")]
    email_host: String,

    /// SMTP relay port
    #[arg(long, env = "EMAIL_PORT", default_value_t = 587)]
    email_port: u16,

    /// SMTP username, also used as the sender address
    #[arg(long, env = "EMAIL_USER")]
    email_user: Option<String>,

    /// SMTP password
    #[arg(long, env = "EMAIL_PASSWORD", hide_env_values = true)]
    email_password: Option<String>,

    /// Where complaint notifications are sent. Defaults to the SMTP user.
    #[arg(long, env = "MANAGER_EMAIL")]
    manager_email: Option<String>,

    #[arg(long, env = "TWILIO_ACCOUNT_SID")]
    twilio_account_sid: Option<String>,

    #[arg(long, env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    twilio_auth_token: Option<String>,

    /// Sending number for SMS orders, in E.164 form
    #[arg(long, env = "TWILIO_PHONE_NUMBER")]
    twilio_phone_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AppEnv {
    Development,
    Production,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex; handlers release it before
/// any network call.
#[derive(Clone)]
pub struct AppState {
    persistence: Arc<Mutex<SqlitePersistence>>,
    notifier: Notifier,
    contacts: ContactSettings,
    /// Expose internal error detail in 500 responses.
    dev_mode: bool,
    session_ttl: Duration,
}

/// Picks the email and SMS senders from whatever credentials are configured.
///
/// A missing channel is not fatal: email falls back to logging and SMS
/// orders are refused.
fn build_notifier(args: &Args) -> Notifier {
    let email: Arc<dyn EmailSender> = match (&args.email_user, &args.email_password) {
        (Some(username), Some(password)) => {
            let settings: SmtpSettings = SmtpSettings {
                host: args.email_host.clone(),
                port: args.email_port,
                username: username.clone(),
                password: password.clone(),
                from_name: String::from("Vehicle Service Center"),
            };
            match SmtpEmailSender::new(&settings) {
                Ok(sender) => {
                    info!(host = %args.email_host, port = args.email_port, "SMTP email enabled");
                    Arc::new(sender)
                }
                Err(e) => {
                    warn!(error = %e, "SMTP setup failed, emails will only be logged");
                    Arc::new(LogEmailSender)
                }
            }
        }
        _ => {
            warn!("EMAIL_USER or EMAIL_PASSWORD not set, emails will only be logged");
            Arc::new(LogEmailSender)
        }
    };

    let sms: Arc<dyn SmsSender> = match (
        &args.twilio_account_sid,
        &args.twilio_auth_token,
        &args.twilio_phone_number,
    ) {
        (Some(account_sid), Some(auth_token), Some(from_number)) => {
            info!(from = %from_number, "Twilio SMS enabled");
            Arc::new(TwilioSmsSender::new(TwilioSettings {
                account_sid: account_sid.clone(),
                auth_token: auth_token.clone(),
                from_number: from_number.clone(),
            }))
        }
        _ => {
            warn!("Twilio credentials not set, SMS orders are disabled");
            Arc::new(DisabledSmsSender)
        }
    };

    Notifier::new(email, sms)
}

/// Handler for GET `/`.
async fn handle_index() -> Json<Value> {
    Json(json!({
        "name": "Servicebay API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "auth": "/auth",
            "vehicles": "/vehicles",
            "appointments": "/appointments",
            "mechanic": "/mechanic",
            "manager": "/manager",
            "inventory": "/inventory",
            "feedback": "/feedback",
            "complaints": "/complaints",
            "reports": "/reports",
            "settings": "/settings",
        },
    }))
}

async fn handle_not_found() -> HttpError {
    HttpError::not_found("Route not found")
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .merge(routes::accounts::router())
        .merge(routes::vehicles::router())
        .merge(routes::appointments::router())
        .merge(routes::manager::router())
        .merge(routes::inventory::router())
        .merge(routes::feedback::router())
        .merge(routes::complaints::router())
        .merge(routes::settings::router())
        .merge(routes::reports::router())
        .fallback(handle_not_found)
        .layer(map_response_with_state(
            app_state.clone(),
            reveal_internal_detail,
        ))
        .with_state(app_state)
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(environment = ?args.app_env, "Initializing Servicebay Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        warn!("DATABASE_URL not set, using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier: build_notifier(&args),
        contacts: ContactSettings {
            manager_email: args.manager_email.clone().or_else(|| args.email_user.clone()),
            contact_email: args.email_user.clone(),
        },
        dev_mode: args.app_env == AppEnv::Development,
        session_ttl: Duration::days(args.session_ttl_days),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr =
        format!("{}:{}", args.bind_address, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
