// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Data models for the application.

pub mod event;
pub mod reminder;
pub mod stats;
pub mod tire;
pub mod vehicle;

pub use event::{Event, EventKind};
pub use reminder::{Reminder, ReminderStatus};
pub use stats::{CostCategory, CostFilter, CostReport, CostSummary, Estimate, MonthlyCost, Ratio};
pub use tire::TireSet;
pub use vehicle::{Owner, Vehicle};
