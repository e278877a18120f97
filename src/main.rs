// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Garage Tracker API Server
//!
//! Serves derived vehicle state (service health, tire usage, fuel and cost
//! reports) and runs maintenance reminder scans.

use garage_tracker::{
    config::Config,
    db::GarageDb,
    services::{scan_reminders, MailTransport},
    AppState,
};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Garage Tracker API");

    // Load the garage snapshot
    let db = match &config.data_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading garage snapshot");
            GarageDb::load_from_file(path)
                .with_context(|| format!("Failed to load snapshot {}", path.display()))?
        }
        None => {
            tracing::warn!("GARAGE_DATA_PATH not set, using an in-memory store");
            GarageDb::new()
        }
    };
    tracing::info!(vehicles = db.list_vehicles().len(), "Garage store ready");

    let mailer = MailTransport::from_config(
        config.mail_relay_url.as_deref(),
        config.mail_relay_token.as_deref(),
    );
    if matches!(mailer, MailTransport::Disabled) {
        tracing::warn!("MAIL_RELAY_URL not set, reminder emails will fail");
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        mailer,
    });

    if let Some(secs) = config.reminder_scan_interval_secs {
        spawn_reminder_loop(state.clone(), Duration::from_secs(secs.max(1)));
    }

    // Build router
    let app = garage_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Scan reminders periodically in-process, for deployments without an
/// external scheduler hitting `/tasks/scan-reminders`.
fn spawn_reminder_loop(state: Arc<AppState>, period: Duration) {
    tracing::info!(period_secs = period.as_secs(), "Starting reminder scan loop");

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let today = chrono::Utc::now().date_naive();
            scan_reminders(&state.db, &state.mailer, today).await;
        }
    });
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("garage_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
