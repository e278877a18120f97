// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Service interval health ("oil life").

use crate::models::{Event, Vehicle};
use crate::services::odometer::service_baseline;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Remaining distance below which a service is reported as due soon (km).
pub const DUE_SOON_DISTANCE: i64 = 2000;

/// Service status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum ServiceStatus {
    Healthy,
    DueSoon,
    Overdue,
}

/// Service interval health for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ServiceHealth {
    pub baseline: i64,
    pub current_odometer: i64,
    pub distance_since_service: i64,
    pub next_due_odometer: i64,
    /// Negative once the service is overdue
    pub remaining: i64,
    /// Share of the interval used, in [0, 100]
    pub percent_used: f64,
    /// `100 - percent_used`
    pub health: f64,
    pub status: ServiceStatus,
}

impl ServiceHealth {
    /// Compute health from a baseline, the current reading and the interval.
    pub fn compute(baseline: i64, current_odometer: i64, interval_distance: i64) -> Self {
        let distance_since_service = current_odometer.saturating_sub(baseline);
        let next_due_odometer = baseline.saturating_add(interval_distance);
        let remaining = next_due_odometer.saturating_sub(current_odometer);

        let percent_used = if interval_distance > 0 {
            (distance_since_service as f64 / interval_distance as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            // No usable interval configured
            100.0
        };

        let status = if remaining <= 0 {
            ServiceStatus::Overdue
        } else if remaining < DUE_SOON_DISTANCE {
            ServiceStatus::DueSoon
        } else {
            ServiceStatus::Healthy
        };

        Self {
            baseline,
            current_odometer,
            distance_since_service,
            next_due_odometer,
            remaining,
            percent_used,
            health: 100.0 - percent_used,
            status,
        }
    }

    /// Reconcile the baseline from the log and compute health.
    pub fn for_vehicle(vehicle: &Vehicle, events: &[Event]) -> Self {
        let baseline = service_baseline(vehicle, events);
        Self::compute(
            baseline,
            vehicle.current_odometer,
            vehicle.service_interval_distance,
        )
    }
}
