// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Derived figures computed from a vehicle's log.
//!
//! Nothing here is stored as a source of truth; every value is recomputed
//! from a fresh snapshot of the log.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A computed value, or a marker that there was not enough data.
///
/// Kept distinct from a computed zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum Estimate<T> {
    Value(T),
    InsufficientData,
}

impl<T> Estimate<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Estimate::Value(v) => Some(v),
            Estimate::InsufficientData => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, Estimate::InsufficientData)
    }
}

/// A display ratio, clamped to a plausibility cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct Ratio {
    pub value: f64,
    /// True when the raw ratio exceeded the cap and was clamped
    pub capped: bool,
}

// ─── Cost Categories ─────────────────────────────────────────

/// Cost category inferred from an event title.
///
/// Declaration order matches rule order and breaks ties between
/// equally large categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum CostCategory {
    Fuel,
    Service,
    Insurance,
    Parking,
    Tax,
    Maintenance,
    Other,
}

impl CostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostCategory::Fuel => "fuel",
            CostCategory::Service => "service",
            CostCategory::Insurance => "insurance",
            CostCategory::Parking => "parking",
            CostCategory::Tax => "tax",
            CostCategory::Maintenance => "maintenance",
            CostCategory::Other => "other",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Cost Report ─────────────────────────────────────────────

/// Costs within one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct MonthlyCost {
    pub year: i32,
    pub month: u32,
    /// Display label (e.g. "Mar 2024"); never used for ordering
    pub label: String,
    pub total_cost: f64,
    pub by_category: BTreeMap<CostCategory, f64>,
    /// Highest odometer reading seen in the month, per vehicle
    pub max_odometer: BTreeMap<String, i64>,
    /// Distance driven since the previous month with a reading
    pub distance: Option<i64>,
    /// Month cost per km driven since the previous month
    pub cost_per_distance: Estimate<Ratio>,
}

/// Aggregated costs over a filtered window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct CostSummary {
    /// Number of events in the window (including zero-cost ones)
    pub event_count: usize,
    pub total_cost: f64,
    pub by_category: BTreeMap<CostCategory, f64>,
    /// Chronological monthly buckets
    pub months: Vec<MonthlyCost>,
    pub top_category: CostCategory,
    /// Distance covered by odometer readings inside the window
    pub distance: Option<i64>,
    pub cost_per_distance: Estimate<f64>,
}

/// Result of a cost aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "summary", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CostReport {
    NoData,
    Summary(CostSummary),
}

impl CostReport {
    pub fn summary(&self) -> Option<&CostSummary> {
        match self {
            CostReport::Summary(s) => Some(s),
            CostReport::NoData => None,
        }
    }
}

/// Filter applied before cost aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostFilter {
    /// Inclusive start date
    pub from: Option<NaiveDate>,
    /// Inclusive end date
    pub to: Option<NaiveDate>,
    pub vehicle_id: Option<String>,
}
