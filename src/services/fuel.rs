// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Fuel consumption estimates.

use crate::models::{Estimate, Event, Ratio};
use crate::time_utils::MonthKey;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Monthly consumption above this is shown clamped (L/100 km).
pub const MAX_DISPLAY_CONSUMPTION: f64 = 40.0;

/// Monthly cost per km above this is shown clamped.
pub const MAX_DISPLAY_COST_PER_DISTANCE: f64 = 1000.0;

/// Average consumption between the first and last fill-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct FuelEstimate {
    /// Litres per 100 km
    pub consumption: f64,
    /// Litres burned between the first and last fill-up
    pub total_volume: f64,
    pub distance: i64,
    pub fill_ups: usize,
}

/// Fill-ups with both a reading and a volume, sorted by odometer.
///
/// Ties fall back to date and id so the order never depends on storage.
fn sorted_fill_ups(events: &[Event]) -> Vec<(&Event, i64, f64)> {
    let mut fill_ups: Vec<(&Event, i64, f64)> = events
        .iter()
        .filter(|e| e.is_fuel())
        .filter_map(|e| match (e.odometer, e.volume) {
            (Some(odometer), Some(volume)) => Some((e, odometer, volume.max(0.0))),
            _ => None,
        })
        .collect();

    fill_ups.sort_by(|a, b| {
        a.1.cmp(&b.1)
            .then_with(|| a.0.date.cmp(&b.0.date))
            .then_with(|| a.0.id.cmp(&b.0.id))
    });
    fill_ups
}

/// Two-endpoint consumption estimate.
///
/// The first fill-up's volume is left out: it was burned before the
/// first reading.
pub fn average_consumption(events: &[Event]) -> Estimate<FuelEstimate> {
    let fill_ups = sorted_fill_ups(events);

    let (Some(first), Some(last)) = (fill_ups.first(), fill_ups.last()) else {
        return Estimate::InsufficientData;
    };
    if fill_ups.len() < 2 {
        return Estimate::InsufficientData;
    }

    let total_volume: f64 = fill_ups.iter().skip(1).map(|(_, _, volume)| volume).sum();
    let distance = last.1 - first.1;

    if distance <= 0 {
        return Estimate::InsufficientData;
    }

    Estimate::Value(FuelEstimate {
        consumption: total_volume * 100.0 / distance as f64,
        total_volume,
        distance,
        fill_ups: fill_ups.len(),
    })
}

/// Fuel figures for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct MonthlyConsumption {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub volume: f64,
    pub cost: f64,
    pub max_odometer: Option<i64>,
    /// Distance since the previous month with a reading
    pub distance: Option<i64>,
    /// Litres per 100 km
    pub consumption: Estimate<Ratio>,
    pub cost_per_distance: Estimate<Ratio>,
}

#[derive(Default)]
struct FuelBucket {
    volume: f64,
    cost: f64,
    max_odometer: BTreeMap<String, i64>,
}

/// Month-by-month fuel series for trend charts.
pub fn monthly_consumption(events: &[Event]) -> Vec<MonthlyConsumption> {
    let mut buckets: BTreeMap<MonthKey, FuelBucket> = BTreeMap::new();

    for event in events.iter().filter(|e| e.is_fuel()) {
        let bucket = buckets.entry(MonthKey::from_date(event.date)).or_default();
        bucket.volume += event.volume.unwrap_or(0.0).max(0.0);
        bucket.cost += event.effective_cost();
        if let Some(odometer) = event.odometer {
            let max = bucket
                .max_odometer
                .entry(event.vehicle_id.clone())
                .or_insert(odometer);
            *max = (*max).max(odometer);
        }
    }

    let deltas = distance_deltas(buckets.values().map(|b| &b.max_odometer));

    buckets
        .iter()
        .zip(deltas)
        .map(|((key, bucket), distance)| MonthlyConsumption {
            year: key.year,
            month: key.month,
            label: key.label(),
            volume: bucket.volume,
            cost: bucket.cost,
            max_odometer: bucket.max_odometer.values().copied().max(),
            distance,
            consumption: capped_ratio(bucket.volume, distance, 100.0, MAX_DISPLAY_CONSUMPTION),
            cost_per_distance: capped_ratio(
                bucket.cost,
                distance,
                1.0,
                MAX_DISPLAY_COST_PER_DISTANCE,
            ),
        })
        .collect()
}

/// Distance driven per bucket, from per-vehicle maximum readings.
///
/// Each vehicle's delta is measured against the highest reading it had in
/// any earlier bucket; vehicles without an earlier reading, or whose reading
/// went backwards, contribute nothing. Buckets are expected in chronological
/// order.
pub(crate) fn distance_deltas<'a>(
    buckets: impl IntoIterator<Item = &'a BTreeMap<String, i64>>,
) -> Vec<Option<i64>> {
    let mut last_seen: HashMap<&'a str, i64> = HashMap::new();
    let mut deltas = Vec::new();

    for bucket in buckets {
        let mut total: Option<i64> = None;
        for (vehicle_id, &max) in bucket {
            if let Some(&previous) = last_seen.get(vehicle_id.as_str()) {
                let delta = max - previous;
                if delta > 0 {
                    total = Some(total.unwrap_or(0) + delta);
                }
            }
            let entry = last_seen.entry(vehicle_id.as_str()).or_insert(max);
            *entry = (*entry).max(max);
        }
        deltas.push(total);
    }

    deltas
}

/// `numerator * scale / distance`, clamped to `cap` for display.
pub(crate) fn capped_ratio(
    numerator: f64,
    distance: Option<i64>,
    scale: f64,
    cap: f64,
) -> Estimate<Ratio> {
    match distance {
        Some(d) if d > 0 => {
            let raw = numerator * scale / d as f64;
            if raw > cap {
                Estimate::Value(Ratio {
                    value: cap,
                    capped: true,
                })
            } else {
                Estimate::Value(Ratio {
                    value: raw,
                    capped: false,
                })
            }
        }
        _ => Estimate::InsufficientData,
    }
}
