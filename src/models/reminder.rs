// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Maintenance reminder model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Reminder lifecycle status, as set by the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub enum ReminderStatus {
    #[default]
    Pending,
    Completed,
    Dismissed,
}

/// A dated reminder with notification channel flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Reminder {
    pub id: String,
    pub vehicle_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub notify_email: bool,
    #[serde(default)]
    pub notify_push: bool,
    /// Set once a scan has touched this reminder, whatever the outcome
    #[serde(default)]
    pub notification_sent: bool,
    #[serde(default)]
    pub status: ReminderStatus,
}
