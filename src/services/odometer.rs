// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Service baseline reconciliation.

use crate::models::{Event, Vehicle};

/// Odometer reading that starts the current maintenance interval.
///
/// Starts from the acknowledged last-service reading and is raised to the
/// highest-odometer service event. Service events are ranked by odometer,
/// not date, since owners sometimes log them with the wrong date. A vehicle
/// with no history at all counts as serviced at its current reading.
pub fn service_baseline(vehicle: &Vehicle, events: &[Event]) -> i64 {
    let acknowledged = vehicle.last_service_odometer.unwrap_or(0);

    let baseline = events
        .iter()
        .filter(|e| e.is_service())
        .filter_map(|e| e.odometer)
        .fold(acknowledged, i64::max);

    if baseline == 0 {
        vehicle.current_odometer
    } else {
        baseline
    }
}
