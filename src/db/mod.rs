// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Storage layer (in-memory garage store with snapshot files).

pub mod garage;

pub use garage::{DueReminder, GarageDb, GarageSnapshot, StoreError, VehicleRecord};
