// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Scheduler authentication middleware.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Require `Authorization: Bearer <TASKS_TOKEN>` on `/tasks/*` routes.
pub async fn require_tasks_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        tracing::warn!("Blocked tasks request without bearer token");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let expected = state.config.tasks_token.as_bytes();
    if !bool::from(token.as_bytes().ct_eq(expected)) {
        tracing::warn!("Blocked tasks request with invalid token");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}
