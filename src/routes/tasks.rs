// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Task handler routes for scheduler callbacks.
//!
//! These endpoints are called by an external scheduler, not by users.
//! They are protected by the shared tasks token (see `require_tasks_auth`).

use crate::middleware::require_tasks_auth;
use crate::services::{scan_reminders, ScanResult};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Json, State},
    middleware,
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Task handler routes (called by the scheduler).
pub fn routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks/scan-reminders", post(scan_reminders_task))
        .route_layer(middleware::from_fn_with_state(state, require_tasks_auth))
}

/// Payload for a reminder scan.
#[derive(Debug, Default, Deserialize)]
pub struct ScanRemindersPayload {
    /// Scan as of this date instead of today (UTC)
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Scan outcome with the time the scan ran.
#[derive(Debug, Serialize)]
pub struct ScanRemindersResponse {
    pub scanned_at: String,
    #[serde(flatten)]
    pub result: ScanResult,
}

/// Scan for due reminders and dispatch notifications.
///
/// Always answers 200 once the scan ran: delivery failures are logged and
/// reported in the body, and retrying would not resend claimed reminders.
async fn scan_reminders_task(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<ScanRemindersPayload>>,
) -> Json<ScanRemindersResponse> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let today = payload
        .today
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    tracing::info!(%today, "Scanning reminders from scheduler task");

    let result = scan_reminders(&state.db, &state.mailer, today).await;

    Json(ScanRemindersResponse {
        scanned_at: format_utc_rfc3339(chrono::Utc::now()),
        result,
    })
}
