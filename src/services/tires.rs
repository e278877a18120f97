// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Tire allocation ledger.
//!
//! Distance is banked into a tire set when it comes off the car; while
//! mounted, its running total is derived from the current odometer.

use crate::models::TireSet;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Distance a tire set has covered, including its current mount period.
///
/// A current reading below the mount reading adds nothing.
pub fn effective_distance(tire: &TireSet, current_odometer: i64) -> i64 {
    match (tire.is_mounted, tire.mounted_at_odometer) {
        (true, Some(mounted_at)) => tire
            .total_distance
            .saturating_add(current_odometer.saturating_sub(mounted_at).max(0)),
        _ => tire.total_distance,
    }
}

/// Per-set usage for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TireUsage {
    pub id: String,
    pub brand: String,
    pub model: String,
    pub size: String,
    pub is_mounted: bool,
    pub effective_distance: i64,
}

/// Usage of every set for a vehicle, mounted set first.
pub fn tire_usage(tires: &[TireSet], current_odometer: i64) -> Vec<TireUsage> {
    let mut usage: Vec<TireUsage> = tires
        .iter()
        .map(|t| TireUsage {
            id: t.id.clone(),
            brand: t.brand.clone(),
            model: t.model.clone(),
            size: t.size.clone(),
            is_mounted: t.is_mounted,
            effective_distance: effective_distance(t, current_odometer),
        })
        .collect();

    usage.sort_by(|a, b| b.is_mounted.cmp(&a.is_mounted).then_with(|| a.id.cmp(&b.id)));
    usage
}

/// Outcome of a swap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct SwapOutcome {
    /// Sets taken off, with the distance banked for each
    pub unmounted: Vec<(String, i64)>,
    /// Set now on the car, if any
    pub mounted: Option<String>,
}

/// Take the current set off (banking its distance) and put `target` on.
///
/// `target = None` leaves the car without a mounted set. An unknown target
/// is rejected before anything changes. Every set flagged as mounted is
/// taken off, so a log that somehow holds two mounted sets is repaired.
pub fn swap_mount(
    tires: &mut [TireSet],
    current_odometer: i64,
    target: Option<&str>,
) -> Result<SwapOutcome, TireError> {
    if let Some(target_id) = target {
        if !tires.iter().any(|t| t.id == target_id) {
            return Err(TireError::UnknownTireSet(target_id.to_string()));
        }
    }

    let mut outcome = SwapOutcome::default();

    for tire in tires.iter_mut().filter(|t| t.is_mounted) {
        let driven = tire
            .mounted_at_odometer
            .map(|mounted_at| current_odometer.saturating_sub(mounted_at).max(0))
            .unwrap_or(0);

        tire.total_distance = tire.total_distance.saturating_add(driven);
        tire.is_mounted = false;
        tire.mounted_at_odometer = None;
        outcome.unmounted.push((tire.id.clone(), driven));
    }

    if let Some(target_id) = target {
        if let Some(tire) = tires.iter_mut().find(|t| t.id == target_id) {
            tire.is_mounted = true;
            tire.mounted_at_odometer = Some(current_odometer);
            outcome.mounted = Some(tire.id.clone());
        }
    }

    Ok(outcome)
}

/// Errors from tire operations.
#[derive(Debug, thiserror::Error)]
pub enum TireError {
    #[error("Unknown tire set: {0}")]
    UnknownTireSet(String),
}
