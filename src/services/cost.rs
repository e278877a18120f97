// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Cost categorization and aggregation.
//!
//! Categories are inferred from free-text titles through an ordered rule
//! table; the first rule with a matching keyword wins.

use crate::models::{
    CostCategory, CostFilter, CostReport, CostSummary, Estimate, Event, MonthlyCost,
};
use crate::services::fuel::{capped_ratio, distance_deltas, MAX_DISPLAY_COST_PER_DISTANCE};
use crate::time_utils::MonthKey;
use std::collections::BTreeMap;

/// Ordered category rules. Keywords are lowercase.
pub const CATEGORY_RULES: &[(CostCategory, &[&str])] = &[
    (CostCategory::Fuel, &["fuel", "tank"]),
    (CostCategory::Service, &["szerviz", "olaj", "service"]),
    (
        CostCategory::Insurance,
        &["biztosítás", "kgfb", "insurance"],
    ),
    (CostCategory::Parking, &["parkolás", "parking"]),
    (CostCategory::Tax, &["adó", "tax"]),
    (
        CostCategory::Maintenance,
        &["mosás", "karbantartás", "maintenance"],
    ),
];

/// Infer a cost category from an event title.
pub fn categorize(title: &str) -> CostCategory {
    let title = title.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| title.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(CostCategory::Other)
}

fn matches_filter(event: &Event, filter: &CostFilter) -> bool {
    filter.from.is_none_or(|from| event.date >= from)
        && filter.to.is_none_or(|to| event.date <= to)
        && filter
            .vehicle_id
            .as_deref()
            .is_none_or(|id| event.vehicle_id == id)
}

#[derive(Default)]
struct CostBucket {
    total: f64,
    by_category: BTreeMap<CostCategory, f64>,
    max_odometer: BTreeMap<String, i64>,
}

/// Aggregate costs for the events matching `filter`.
///
/// Events without a cost still count toward `event_count` but add nothing
/// to totals. Distance is taken per vehicle (highest minus lowest reading
/// in the window) and summed, so an unfiltered report over several cars
/// does not mix their odometers.
pub fn aggregate_costs(events: &[Event], filter: &CostFilter) -> CostReport {
    let selected: Vec<&Event> = events.iter().filter(|e| matches_filter(e, filter)).collect();

    if selected.is_empty() {
        return CostReport::NoData;
    }

    let mut total_cost = 0.0;
    let mut by_category: BTreeMap<CostCategory, f64> = BTreeMap::new();
    let mut buckets: BTreeMap<MonthKey, CostBucket> = BTreeMap::new();
    let mut odometer_range: BTreeMap<&str, (i64, i64)> = BTreeMap::new();

    for event in &selected {
        let cost = event.effective_cost();
        let category = categorize(&event.title);

        total_cost += cost;
        *by_category.entry(category).or_insert(0.0) += cost;

        let bucket = buckets.entry(MonthKey::from_date(event.date)).or_default();
        bucket.total += cost;
        *bucket.by_category.entry(category).or_insert(0.0) += cost;

        if let Some(odometer) = event.odometer {
            let max = bucket
                .max_odometer
                .entry(event.vehicle_id.clone())
                .or_insert(odometer);
            *max = (*max).max(odometer);

            let range = odometer_range
                .entry(event.vehicle_id.as_str())
                .or_insert((odometer, odometer));
            range.0 = range.0.min(odometer);
            range.1 = range.1.max(odometer);
        }
    }

    let distance = if odometer_range.is_empty() {
        None
    } else {
        Some(odometer_range.values().map(|(min, max)| max - min).sum::<i64>())
    };

    let cost_per_distance = match distance {
        Some(d) if d > 0 => Estimate::Value(total_cost / d as f64),
        _ => Estimate::InsufficientData,
    };

    let deltas = distance_deltas(buckets.values().map(|b| &b.max_odometer));
    let months = buckets
        .into_iter()
        .zip(deltas)
        .map(|((key, bucket), distance)| MonthlyCost {
            year: key.year,
            month: key.month,
            label: key.label(),
            total_cost: bucket.total,
            cost_per_distance: capped_ratio(
                bucket.total,
                distance,
                1.0,
                MAX_DISPLAY_COST_PER_DISTANCE,
            ),
            by_category: bucket.by_category,
            max_odometer: bucket.max_odometer,
            distance,
        })
        .collect();

    CostReport::Summary(CostSummary {
        event_count: selected.len(),
        total_cost,
        top_category: top_category(&by_category),
        by_category,
        months,
        distance,
        cost_per_distance,
    })
}

/// Category with the largest total; earlier rules win ties.
fn top_category(by_category: &BTreeMap<CostCategory, f64>) -> CostCategory {
    let mut top = CostCategory::Other;
    let mut top_total = f64::NEG_INFINITY;
    for (category, &total) in by_category {
        if total > top_total {
            top = *category;
            top_total = total;
        }
    }
    top
}
