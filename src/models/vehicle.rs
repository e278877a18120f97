// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Vehicle and owner models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A tracked vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Vehicle {
    pub id: String,
    /// Owner ID, used to resolve notification recipients
    pub owner_id: String,
    /// Display name (e.g. "Family Octavia")
    pub name: String,
    #[serde(default)]
    pub plate: Option<String>,
    /// Odometer reading as last entered by the owner (km)
    pub current_odometer: i64,
    /// Service interval distance (km)
    pub service_interval_distance: i64,
    /// Service interval in days. Carried for clients; health is distance-based.
    #[serde(default)]
    pub service_interval_days: Option<u32>,
    /// Odometer at the last acknowledged service, if any
    #[serde(default)]
    pub last_service_odometer: Option<i64>,
}

impl Vehicle {
    /// Acknowledge a service performed outside the event log.
    pub fn reset_service_counter(&mut self) {
        self.last_service_odometer = Some(self.current_odometer);
    }
}

/// Vehicle owner, as far as the engine needs to know.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}
