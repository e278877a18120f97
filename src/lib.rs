// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Garage Tracker: derived vehicle state from an owner-edited log
//!
//! This crate turns a vehicle's fuel, service, tire and reminder records
//! into service health, tire mileage, fuel consumption and cost reports,
//! and sends maintenance reminders.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::GarageDb;
use services::MailTransport;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: GarageDb,
    pub mailer: MailTransport,
}
