// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Logged vehicle events (fill-ups, services, everything else).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Kind of a logged event.
///
/// Anything other than `fuel` and `service` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Fuel,
    Service,
    Other(String),
}

impl From<String> for EventKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "fuel" => EventKind::Fuel,
            "service" => EventKind::Service,
            _ => EventKind::Other(kind),
        }
    }
}

impl From<&str> for EventKind {
    fn from(kind: &str) -> Self {
        EventKind::from(kind.to_string())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Fuel => "fuel".to_string(),
            EventKind::Service => "service".to_string(),
            EventKind::Other(other) => other,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Fuel => f.write_str("fuel"),
            EventKind::Service => f.write_str("service"),
            EventKind::Other(other) => f.write_str(other),
        }
    }
}

/// A single entry in a vehicle's log.
///
/// Entries are edited and deleted freely by the owner, so nothing may
/// assume they arrive sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Event {
    pub id: String,
    pub vehicle_id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub kind: EventKind,
    pub date: NaiveDate,
    /// Odometer reading at the time of the event (km)
    #[serde(default)]
    pub odometer: Option<i64>,
    #[serde(default)]
    pub cost: Option<f64>,
    /// Fuel volume (litres), only meaningful for fill-ups
    #[serde(default)]
    pub volume: Option<f64>,
    /// Free-text title, used for cost category inference
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Event {
    /// Cost with missing or negative values treated as zero.
    pub fn effective_cost(&self) -> f64 {
        self.cost.unwrap_or(0.0).max(0.0)
    }

    pub fn is_fuel(&self) -> bool {
        self.kind == EventKind::Fuel
    }

    pub fn is_service(&self) -> bool {
        self.kind == EventKind::Service
    }
}
