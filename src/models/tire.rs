// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Tire set model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A set of tires belonging to one vehicle.
///
/// Mount state is only changed through
/// [`swap_mount`](crate::services::tires::swap_mount).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TireSet {
    pub id: String,
    pub vehicle_id: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    /// Tire size (e.g. "205/55 R16")
    #[serde(default)]
    pub size: String,
    /// Distance banked from earlier mount periods (km)
    #[serde(default)]
    pub total_distance: i64,
    #[serde(default)]
    pub is_mounted: bool,
    /// Odometer when mounted; only set while mounted
    #[serde(default)]
    pub mounted_at_odometer: Option<i64>,
}
