// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Per-vehicle overview combining the derived figures.

use crate::db::VehicleRecord;
use crate::models::{Estimate, Vehicle};
use crate::services::fuel::{self, FuelEstimate};
use crate::services::health::ServiceHealth;
use crate::services::tires::{self, TireUsage};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Everything the dashboard shows for one vehicle.
///
/// Each part is computed independently from the same snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VehicleOverview {
    pub vehicle: Vehicle,
    pub service: ServiceHealth,
    pub tires: Vec<TireUsage>,
    pub fuel: Estimate<FuelEstimate>,
    /// Reminders not yet notified
    pub open_reminders: usize,
}

impl VehicleOverview {
    pub fn from_record(record: &VehicleRecord) -> Self {
        let vehicle = &record.vehicle;

        Self {
            vehicle: vehicle.clone(),
            service: ServiceHealth::for_vehicle(vehicle, &record.events),
            tires: tires::tire_usage(&record.tires, vehicle.current_odometer),
            fuel: fuel::average_consumption(&record.events),
            open_reminders: record
                .reminders
                .iter()
                .filter(|r| !r.notification_sent)
                .count(),
        }
    }
}
