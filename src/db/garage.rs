// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! In-memory garage store with typed operations.
//!
//! Holds one record per vehicle (the vehicle plus its events, tire sets and
//! reminders) behind a `DashMap`, so operations that read and then write a
//! vehicle's records run under that vehicle's entry lock:
//! - Tire swaps (at most one mounted set)
//! - Reminder claims (notified at most once)
//!
//! The store can be seeded from, and written back to, a JSON snapshot file.

use crate::models::{Event, Owner, Reminder, TireSet, Vehicle};
use crate::services::notifier::RecipientResolver;
use crate::services::tires::{self, SwapOutcome, TireError};
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Everything stored for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub vehicle: Vehicle,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tires: Vec<TireSet>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl VehicleRecord {
    pub fn new(vehicle: Vehicle) -> Self {
        Self {
            vehicle,
            events: Vec::new(),
            tires: Vec::new(),
            reminders: Vec::new(),
        }
    }
}

/// Serialized form of the whole store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GarageSnapshot {
    #[serde(default)]
    pub owners: Vec<Owner>,
    #[serde(default)]
    pub vehicles: Vec<VehicleRecord>,
}

/// A reminder selected for notification, with its vehicle.
#[derive(Debug, Clone)]
pub struct DueReminder {
    pub vehicle: Vehicle,
    pub reminder: Reminder,
}

struct GarageInner {
    vehicles: DashMap<String, VehicleRecord>,
    owners: DashMap<String, Owner>,
    snapshot_path: Option<PathBuf>,
    /// Held across snapshot, write and rename so saves land in order
    save_lock: Mutex<()>,
}

/// Garage store handle. Cheap to clone.
#[derive(Clone)]
pub struct GarageDb {
    inner: Arc<GarageInner>,
}

impl Default for GarageDb {
    fn default() -> Self {
        Self::new()
    }
}

impl GarageDb {
    /// Create an empty store that is never written to disk.
    pub fn new() -> Self {
        Self::from_snapshot(GarageSnapshot::default(), None)
    }

    fn from_snapshot(snapshot: GarageSnapshot, snapshot_path: Option<PathBuf>) -> Self {
        let vehicles = DashMap::new();
        for record in snapshot.vehicles {
            vehicles.insert(record.vehicle.id.clone(), record);
        }

        let owners = DashMap::new();
        for owner in snapshot.owners {
            owners.insert(owner.id.clone(), owner);
        }

        Self {
            inner: Arc::new(GarageInner {
                vehicles,
                owners,
                snapshot_path,
                save_lock: Mutex::new(()),
            }),
        }
    }

    /// Load a store from a snapshot file; later changes are written back to it.
    ///
    /// A missing file yields an empty store that will be created on first write.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(path = %path.display(), "Snapshot file not found, starting empty");
            return Ok(Self::from_snapshot(
                GarageSnapshot::default(),
                Some(path.to_path_buf()),
            ));
        }

        let json_data = fs::read_to_string(path).map_err(|e| StoreError::Io(e.to_string()))?;
        let snapshot = Self::parse_snapshot(&json_data)?;

        tracing::info!(
            path = %path.display(),
            vehicles = snapshot.vehicles.len(),
            owners = snapshot.owners.len(),
            "Loaded garage snapshot"
        );
        Ok(Self::from_snapshot(snapshot, Some(path.to_path_buf())))
    }

    /// Load an in-memory store from a snapshot JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, StoreError> {
        Ok(Self::from_snapshot(Self::parse_snapshot(json_data)?, None))
    }

    fn parse_snapshot(json_data: &str) -> Result<GarageSnapshot, StoreError> {
        serde_json::from_str(json_data).map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// Copy of the full store, ordered by ID.
    pub fn snapshot(&self) -> GarageSnapshot {
        let mut owners: Vec<Owner> = self
            .inner
            .owners
            .iter()
            .map(|o| o.value().clone())
            .collect();
        owners.sort_by(|a, b| a.id.cmp(&b.id));

        let mut vehicles: Vec<VehicleRecord> = self
            .inner
            .vehicles
            .iter()
            .map(|r| r.value().clone())
            .collect();
        vehicles.sort_by(|a, b| a.vehicle.id.cmp(&b.vehicle.id));

        GarageSnapshot { owners, vehicles }
    }

    /// Write the snapshot file, if this store has one.
    ///
    /// Must not be called while holding an entry guard.
    pub fn save(&self) -> Result<(), StoreError> {
        let Some(path) = self.inner.snapshot_path.as_ref() else {
            return Ok(());
        };

        // Guards no data; a poisoned lock is still usable
        let _guard = self
            .inner
            .save_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let json = serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        // Write then rename so a crash never leaves a truncated snapshot
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, path).map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::debug!(path = %path.display(), "Garage snapshot saved");
        Ok(())
    }

    /// Best-effort save after a mutation.
    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::error!(error = %e, "Failed to save garage snapshot");
        }
    }

    // ─── Owner Operations ────────────────────────────────────────

    pub fn upsert_owner(&self, owner: Owner) {
        self.inner.owners.insert(owner.id.clone(), owner);
        self.persist();
    }

    // ─── Vehicle Operations ──────────────────────────────────────

    /// Insert or replace a vehicle record.
    pub fn upsert_vehicle(&self, record: VehicleRecord) {
        self.inner
            .vehicles
            .insert(record.vehicle.id.clone(), record);
        self.persist();
    }

    /// All vehicles, ordered by name.
    pub fn list_vehicles(&self) -> Vec<Vehicle> {
        let mut vehicles: Vec<Vehicle> = self
            .inner
            .vehicles
            .iter()
            .map(|r| r.value().vehicle.clone())
            .collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        vehicles
    }

    /// Snapshot of one vehicle's records.
    pub fn get_record(&self, vehicle_id: &str) -> Option<VehicleRecord> {
        self.inner
            .vehicles
            .get(vehicle_id)
            .map(|r| r.value().clone())
    }

    /// Record a new odometer reading for a vehicle.
    pub fn set_current_odometer(&self, vehicle_id: &str, reading: i64) -> Result<(), StoreError> {
        {
            let mut record = self.record_mut(vehicle_id)?;
            record.vehicle.current_odometer = reading;
        }
        self.persist();
        Ok(())
    }

    /// Acknowledge a service at the current odometer.
    pub fn reset_service_counter(&self, vehicle_id: &str) -> Result<Vehicle, StoreError> {
        let vehicle = {
            let mut record = self.record_mut(vehicle_id)?;
            record.vehicle.reset_service_counter();
            record.vehicle.clone()
        };

        tracing::info!(
            vehicle_id,
            odometer = vehicle.current_odometer,
            "Service counter reset"
        );
        self.persist();
        Ok(vehicle)
    }

    fn record_mut(
        &self,
        vehicle_id: &str,
    ) -> Result<dashmap::mapref::one::RefMut<'_, String, VehicleRecord>, StoreError> {
        self.inner
            .vehicles
            .get_mut(vehicle_id)
            .ok_or_else(|| StoreError::VehicleNotFound(vehicle_id.to_string()))
    }

    // ─── Event Operations ────────────────────────────────────────

    /// All events across vehicles, in storage order.
    pub fn all_events(&self) -> Vec<Event> {
        self.inner
            .vehicles
            .iter()
            .flat_map(|r| r.value().events.clone())
            .collect()
    }

    /// Insert an event, or replace the one with the same ID.
    pub fn upsert_event(&self, event: Event) -> Result<(), StoreError> {
        {
            let mut record = self.record_mut(&event.vehicle_id)?;
            match record.events.iter_mut().find(|e| e.id == event.id) {
                Some(existing) => *existing = event,
                None => record.events.push(event),
            }
        }
        self.persist();
        Ok(())
    }

    /// Delete an event. Returns `false` if it did not exist.
    pub fn delete_event(&self, vehicle_id: &str, event_id: &str) -> Result<bool, StoreError> {
        let removed = {
            let mut record = self.record_mut(vehicle_id)?;
            let before = record.events.len();
            record.events.retain(|e| e.id != event_id);
            record.events.len() != before
        };
        if removed {
            self.persist();
        }
        Ok(removed)
    }

    // ─── Tire Operations ─────────────────────────────────────────

    /// Swap the mounted tire set at the vehicle's current odometer.
    ///
    /// Runs under the vehicle's entry lock, so concurrent swaps cannot
    /// both observe the same mounted set.
    pub fn swap_mounted_tire(
        &self,
        vehicle_id: &str,
        target: Option<&str>,
    ) -> Result<SwapOutcome, StoreError> {
        let outcome = {
            let mut record = self.record_mut(vehicle_id)?;
            let current_odometer = record.vehicle.current_odometer;
            tires::swap_mount(&mut record.tires, current_odometer, target)?
        };

        tracing::info!(
            vehicle_id,
            mounted = ?outcome.mounted,
            unmounted = ?outcome.unmounted,
            "Tire sets swapped"
        );
        self.persist();
        Ok(outcome)
    }

    // ─── Reminder Operations ─────────────────────────────────────

    /// Reminders not yet notified and due on or before `window_end`.
    pub fn due_reminders(&self, window_end: NaiveDate) -> Vec<DueReminder> {
        let mut due: Vec<DueReminder> = self
            .inner
            .vehicles
            .iter()
            .flat_map(|r| {
                let record = r.value();
                record
                    .reminders
                    .iter()
                    .filter(|rem| !rem.notification_sent && rem.due_date <= window_end)
                    .map(|rem| DueReminder {
                        vehicle: record.vehicle.clone(),
                        reminder: rem.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        due.sort_by(|a, b| {
            a.reminder
                .due_date
                .cmp(&b.reminder.due_date)
                .then_with(|| a.reminder.id.cmp(&b.reminder.id))
        });
        due
    }

    /// Mark a reminder as notified if nobody has yet.
    ///
    /// Returns `true` only for the caller that flipped the flag. Does not
    /// save; callers claiming a batch save once afterwards.
    pub fn claim_reminder(&self, vehicle_id: &str, reminder_id: &str) -> bool {
        let Some(mut record) = self.inner.vehicles.get_mut(vehicle_id) else {
            return false;
        };

        match record
            .reminders
            .iter_mut()
            .find(|r| r.id == reminder_id && !r.notification_sent)
        {
            Some(reminder) => {
                reminder.notification_sent = true;
                true
            }
            None => false,
        }
    }
}

impl RecipientResolver for GarageDb {
    fn resolve_recipient(&self, owner_id: &str) -> Option<String> {
        self.inner
            .owners
            .get(owner_id)
            .and_then(|o| o.value().email.clone())
            .filter(|email| !email.trim().is_empty())
    }
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Failed to access snapshot file: {0}")]
    Io(String),

    #[error("Failed to parse snapshot: {0}")]
    Parse(String),

    #[error(transparent)]
    Tire(#[from] TireError),
}
