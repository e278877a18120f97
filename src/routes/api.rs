// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! API routes for the dashboard.
//!
//! Callers are authenticated upstream; these handlers only read snapshots
//! from the store and return derived figures.

use crate::error::{AppError, Result};
use crate::models::{CostFilter, CostReport, Estimate, Event, EventKind};
use crate::services::fuel::{self, FuelEstimate, MonthlyConsumption};
use crate::services::health::ServiceHealth;
use crate::services::tires::{self, SwapOutcome, TireUsage};
use crate::services::{aggregate_costs, VehicleOverview};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Dashboard API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/vehicles/{id}/overview", get(get_overview))
        .route("/api/vehicles/{id}/odometer", put(update_odometer))
        .route("/api/vehicles/{id}/service-reset", post(reset_service))
        .route(
            "/api/vehicles/{id}/events/{event_id}",
            put(put_event).delete(delete_event),
        )
        .route("/api/vehicles/{id}/tires/mount", post(mount_tires))
        .route("/api/vehicles/{id}/fuel", get(get_fuel))
        .route("/api/costs", get(get_costs))
}

// ─── Vehicles ────────────────────────────────────────────────

/// Vehicle list entry with its service status.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VehicleSummary {
    pub id: String,
    pub name: String,
    pub plate: Option<String>,
    pub current_odometer: i64,
    pub service: ServiceHealth,
}

/// List vehicles with service health.
async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<VehicleSummary>> {
    let summaries = state
        .db
        .list_vehicles()
        .into_iter()
        .filter_map(|v| state.db.get_record(&v.id))
        .map(|record| VehicleSummary {
            service: ServiceHealth::for_vehicle(&record.vehicle, &record.events),
            id: record.vehicle.id,
            name: record.vehicle.name,
            plate: record.vehicle.plate,
            current_odometer: record.vehicle.current_odometer,
        })
        .collect();

    Json(summaries)
}

/// Full overview for one vehicle.
async fn get_overview(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<VehicleOverview>> {
    let record = state
        .db
        .get_record(&vehicle_id)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {}", vehicle_id)))?;

    Ok(Json(VehicleOverview::from_record(&record)))
}

#[derive(Deserialize)]
struct OdometerRequest {
    odometer: i64,
}

/// Record a new odometer reading and return the resulting service health.
///
/// A reading below the previous one is accepted; derived figures clamp it.
async fn update_odometer(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
    Json(request): Json<OdometerRequest>,
) -> Result<Json<ServiceHealth>> {
    state
        .db
        .set_current_odometer(&vehicle_id, request.odometer)?;

    tracing::info!(%vehicle_id, odometer = request.odometer, "Odometer updated");

    let record = state
        .db
        .get_record(&vehicle_id)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {}", vehicle_id)))?;

    Ok(Json(ServiceHealth::for_vehicle(
        &record.vehicle,
        &record.events,
    )))
}

/// Acknowledge a service done outside the event log.
async fn reset_service(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<ServiceHealth>> {
    state.db.reset_service_counter(&vehicle_id)?;

    let record = state
        .db
        .get_record(&vehicle_id)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {}", vehicle_id)))?;

    Ok(Json(ServiceHealth::for_vehicle(
        &record.vehicle,
        &record.events,
    )))
}

// ─── Events ──────────────────────────────────────────────────

/// Event fields as edited by the owner; IDs come from the path.
#[derive(Deserialize)]
struct EventPayload {
    kind: EventKind,
    date: NaiveDate,
    #[serde(default)]
    odometer: Option<i64>,
    #[serde(default)]
    cost: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
}

/// Create or replace a log entry.
async fn put_event(
    State(state): State<Arc<AppState>>,
    Path((vehicle_id, event_id)): Path<(String, String)>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<Event>> {
    let event = Event {
        id: event_id,
        vehicle_id,
        kind: payload.kind,
        date: payload.date,
        odometer: payload.odometer,
        cost: payload.cost,
        volume: payload.volume,
        title: payload.title,
        description: payload.description,
        location: payload.location,
    };

    state.db.upsert_event(event.clone())?;
    tracing::debug!(event_id = %event.id, vehicle_id = %event.vehicle_id, "Event saved");

    Ok(Json(event))
}

/// Remove a log entry.
async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path((vehicle_id, event_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    if !state.db.delete_event(&vehicle_id, &event_id)? {
        return Err(AppError::NotFound(format!("Event {}", event_id)));
    }

    tracing::debug!(%event_id, %vehicle_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ─── Tires ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct MountRequest {
    /// Set to mount; `null` takes the current set off
    tire_set_id: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MountResponse {
    pub outcome: SwapOutcome,
    pub tires: Vec<TireUsage>,
}

/// Swap the mounted tire set at the current odometer.
async fn mount_tires(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
    Json(request): Json<MountRequest>,
) -> Result<Json<MountResponse>> {
    let outcome = state
        .db
        .swap_mounted_tire(&vehicle_id, request.tire_set_id.as_deref())?;

    let record = state
        .db
        .get_record(&vehicle_id)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {}", vehicle_id)))?;

    Ok(Json(MountResponse {
        outcome,
        tires: tires::tire_usage(&record.tires, record.vehicle.current_odometer),
    }))
}

// ─── Fuel ────────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FuelReport {
    pub average: Estimate<FuelEstimate>,
    pub months: Vec<MonthlyConsumption>,
}

/// Average and monthly fuel consumption for one vehicle.
async fn get_fuel(
    State(state): State<Arc<AppState>>,
    Path(vehicle_id): Path<String>,
) -> Result<Json<FuelReport>> {
    let record = state
        .db
        .get_record(&vehicle_id)
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {}", vehicle_id)))?;

    Ok(Json(FuelReport {
        average: fuel::average_consumption(&record.events),
        months: fuel::monthly_consumption(&record.events),
    }))
}

// ─── Costs ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct CostsQuery {
    /// Inclusive start date (YYYY-MM-DD)
    from: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    to: Option<String>,
    vehicle_id: Option<String>,
}

fn parse_date(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                AppError::BadRequest(format!("Invalid '{}' parameter: expected YYYY-MM-DD", name))
            })
        })
        .transpose()
}

/// Cost report over a date window, optionally for one vehicle.
async fn get_costs(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CostsQuery>,
) -> Result<Json<CostReport>> {
    let from = parse_date("from", params.from.as_deref())?;
    let to = parse_date("to", params.to.as_deref())?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::BadRequest(
                "'from' must not be after 'to'".to_string(),
            ));
        }
    }

    let events = match params.vehicle_id.as_deref() {
        Some(id) => {
            state
                .db
                .get_record(id)
                .ok_or_else(|| AppError::NotFound(format!("Vehicle {}", id)))?
                .events
        }
        None => state.db.all_events(),
    };

    tracing::debug!(
        from = ?from,
        to = ?to,
        vehicle_id = ?params.vehicle_id,
        events = events.len(),
        "Aggregating costs"
    );

    let filter = CostFilter {
        from,
        to,
        vehicle_id: params.vehicle_id,
    };
    Ok(Json(aggregate_costs(&events, &filter)))
}
