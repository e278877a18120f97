// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Services module - derived-state engine and notification.

pub mod cost;
pub mod fuel;
pub mod health;
pub mod notifier;
pub mod odometer;
pub mod overview;
pub mod reminders;
pub mod tires;

pub use cost::{aggregate_costs, categorize};
pub use health::{ServiceHealth, ServiceStatus};
pub use notifier::{HttpMailer, MailError, MailTransport, Mailer, RecipientResolver};
pub use overview::VehicleOverview;
pub use reminders::{scan_reminders, ScanResult};
