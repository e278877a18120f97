// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

use axum::body::Body;
use axum::http::Response;
use garage_tracker::config::Config;
use garage_tracker::db::GarageDb;
use garage_tracker::routes::create_router;
use garage_tracker::services::MailTransport;
use garage_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;

/// Two vehicles: a well-logged Astra and a bare Zafira whose owner has no
/// email address.
pub const GARAGE_FIXTURE: &str = r#"{
    "owners": [
        { "id": "o1", "email": "owner@example.com" },
        { "id": "o2", "email": null }
    ],
    "vehicles": [
        {
            "vehicle": {
                "id": "v1",
                "owner_id": "o1",
                "name": "Astra",
                "plate": "ABC-123",
                "current_odometer": 20000,
                "service_interval_distance": 15000,
                "service_interval_days": 365
            },
            "events": [
                { "id": "f1", "vehicle_id": "v1", "kind": "fuel", "date": "2024-03-01",
                  "odometer": 10000, "cost": 10000.0, "volume": 40.0, "title": "Tankolás" },
                { "id": "s1", "vehicle_id": "v1", "kind": "service", "date": "2024-03-05",
                  "odometer": 10500, "cost": 50000.0, "title": "Szerviz – olajcsere" },
                { "id": "p1", "vehicle_id": "v1", "kind": "expense", "date": "2024-03-09",
                  "cost": 2000.0, "title": "Parkolás" },
                { "id": "f2", "vehicle_id": "v1", "kind": "fuel", "date": "2024-04-02",
                  "odometer": 10800, "cost": 16000.0, "volume": 64.0, "title": "Tankolás" }
            ],
            "tires": [
                { "id": "t1", "vehicle_id": "v1", "brand": "Michelin", "model": "Primacy",
                  "size": "205/55 R16", "total_distance": 5000, "is_mounted": true,
                  "mounted_at_odometer": 18000 },
                { "id": "t2", "vehicle_id": "v1", "brand": "Nokian", "model": "WR",
                  "size": "205/55 R16", "total_distance": 12000, "is_mounted": false }
            ],
            "reminders": [
                { "id": "r1", "vehicle_id": "v1", "title": "Műszaki vizsga",
                  "due_date": "2024-06-10", "notify_email": true, "notify_push": true }
            ]
        },
        {
            "vehicle": {
                "id": "v2",
                "owner_id": "o2",
                "name": "Zafira",
                "current_odometer": 5000,
                "service_interval_distance": 10000
            },
            "reminders": [
                { "id": "r2", "vehicle_id": "v2", "title": "Olajcsere",
                  "due_date": "2024-06-30", "notify_email": true, "notify_push": false }
            ]
        }
    ]
}"#;

/// Create a store seeded with [`GARAGE_FIXTURE`].
#[allow(dead_code)]
pub fn test_db() -> GarageDb {
    GarageDb::load_from_json(GARAGE_FIXTURE).expect("Fixture should parse")
}

/// Create a test app over the seeded store with mail disabled.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        db: test_db(),
        mailer: MailTransport::Disabled,
    });

    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("Body should be readable");
    serde_json::from_slice(&body).expect("Body should be JSON")
}
