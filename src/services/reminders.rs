// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Reminder due-date scanning and notification.
//!
//! Handles the scan workflow:
//! 1. Select un-notified reminders due within the lookahead window
//! 2. Claim each one (flip `notification_sent`) so no later or concurrent
//!    scan picks it up again
//! 3. Send email for claimed reminders that ask for it
//! 4. Collect push summaries for the caller to deliver
//!
//! A claimed reminder stays claimed even when the email fails: delivery is
//! attempted at most once.

use crate::db::{DueReminder, GarageDb};
use crate::services::notifier::{Mailer, RecipientResolver};
use chrono::{Days, NaiveDate};
use futures_util::{stream, StreamExt};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Days past today included in a scan.
pub const LOOKAHEAD_DAYS: u64 = 3;

const MAX_CONCURRENT_SENDS: usize = 8;

/// Last due date included in a scan run on `today`.
pub fn window_end(today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(Days::new(LOOKAHEAD_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

/// Result of a scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScanResult {
    /// Reminders claimed by this scan
    pub processed: usize,
    pub emails_sent: usize,
    pub email_failures: usize,
    /// Push alert texts for the caller to deliver
    pub push_alerts: Vec<String>,
}

/// Push alert text for a reminder.
pub fn push_summary(due: &DueReminder) -> String {
    format!(
        "{}: {} (due {})",
        due.vehicle.name,
        due.reminder.title,
        due.reminder.due_date.format("%Y-%m-%d")
    )
}

fn email_subject(due: &DueReminder) -> String {
    format!("Reminder: {} – {}", due.reminder.title, due.vehicle.name)
}

fn email_body(due: &DueReminder) -> String {
    let vehicle = match due.vehicle.plate.as_deref().filter(|p| !p.is_empty()) {
        Some(plate) => format!("{} ({})", due.vehicle.name, plate),
        None => due.vehicle.name.clone(),
    };

    let mut body = format!(
        "{} is due on {} for {}.",
        due.reminder.title,
        due.reminder.due_date.format("%Y-%m-%d"),
        vehicle
    );
    if let Some(description) = due.reminder.description.as_deref().filter(|d| !d.is_empty()) {
        body.push_str("\n\n");
        body.push_str(description);
    }
    body
}

/// Email one reminder. Returns whether the relay accepted it.
async fn send_reminder_email<R, M>(resolver: &R, mailer: &M, due: &DueReminder) -> bool
where
    R: RecipientResolver,
    M: Mailer,
{
    let Some(recipient) = resolver.resolve_recipient(&due.vehicle.owner_id) else {
        tracing::warn!(
            reminder_id = %due.reminder.id,
            owner_id = %due.vehicle.owner_id,
            "No email address for reminder owner"
        );
        return false;
    };

    match mailer
        .send(&recipient, &email_subject(due), &email_body(due))
        .await
    {
        Ok(()) => {
            tracing::info!(reminder_id = %due.reminder.id, "Reminder email sent");
            true
        }
        Err(e) => {
            tracing::error!(
                reminder_id = %due.reminder.id,
                error = %e,
                "Failed to send reminder email"
            );
            false
        }
    }
}

/// Scan for due reminders and notify each at most once.
pub async fn scan_reminders<M: Mailer>(db: &GarageDb, mailer: &M, today: NaiveDate) -> ScanResult {
    let end = window_end(today);
    let candidates = db.due_reminders(end);

    let claimed: Vec<DueReminder> = candidates
        .into_iter()
        .filter(|due| db.claim_reminder(&due.vehicle.id, &due.reminder.id))
        .collect();

    if claimed.is_empty() {
        tracing::debug!(%today, "No reminders due");
        return ScanResult::default();
    }

    // Record the claims before anything is sent
    if let Err(e) = db.save() {
        tracing::error!(error = %e, "Failed to save reminder claims");
    }

    let push_alerts: Vec<String> = claimed
        .iter()
        .filter(|due| due.reminder.notify_push)
        .map(push_summary)
        .collect();

    let to_email: Vec<DueReminder> = claimed
        .iter()
        .filter(|due| due.reminder.notify_email)
        .cloned()
        .collect();

    let email_results: Vec<bool> = stream::iter(to_email)
        .map(|due| async move { send_reminder_email(db, mailer, &due).await })
        .buffer_unordered(MAX_CONCURRENT_SENDS)
        .collect()
        .await;

    let emails_sent = email_results.iter().filter(|sent| **sent).count();
    let result = ScanResult {
        processed: claimed.len(),
        emails_sent,
        email_failures: email_results.len() - emails_sent,
        push_alerts,
    };

    tracing::info!(
        %today,
        processed = result.processed,
        emails_sent = result.emails_sent,
        email_failures = result.email_failures,
        push_alerts = result.push_alerts.len(),
        "Reminder scan complete"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::VehicleRecord;
    use crate::models::{Owner, Reminder, Vehicle};
    use crate::services::notifier::MailError;
    use std::sync::{Arc, Mutex};

    /// Records every send; fails when `fail` is set.
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl Mailer for RecordingMailer {
        async fn send(&self, recipient: &str, subject: &str, _body: &str) -> Result<(), MailError> {
            self.sent
                .lock()
                .unwrap()
                .push((recipient.to_string(), subject.to_string()));
            if self.fail {
                Err(MailError::Transport("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn reminder(id: &str, due: &str, email: bool, push: bool) -> Reminder {
        Reminder {
            id: id.to_string(),
            vehicle_id: "v1".to_string(),
            title: "Műszaki vizsga".to_string(),
            description: Some("Bring the registration papers".to_string()),
            due_date: date(due),
            notify_email: email,
            notify_push: push,
            notification_sent: false,
            status: Default::default(),
        }
    }

    fn garage(reminders: Vec<Reminder>) -> GarageDb {
        let db = GarageDb::new();
        db.upsert_owner(Owner {
            id: "o1".to_string(),
            email: Some("owner@example.com".to_string()),
        });
        let mut record = VehicleRecord::new(Vehicle {
            id: "v1".to_string(),
            owner_id: "o1".to_string(),
            name: "Astra".to_string(),
            plate: Some("ABC-123".to_string()),
            current_odometer: 120000,
            service_interval_distance: 15000,
            service_interval_days: Some(365),
            last_service_odometer: None,
        });
        record.reminders = reminders;
        db.upsert_vehicle(record);
        db
    }

    #[test]
    fn test_window_end() {
        assert_eq!(window_end(date("2024-12-30")), date("2025-01-02"));
    }

    #[tokio::test]
    async fn test_due_reminder_notified_once() {
        let db = garage(vec![reminder("r1", "2024-05-03", true, true)]);
        let mailer = RecordingMailer::default();

        let first = scan_reminders(&db, &mailer, date("2024-05-01")).await;
        assert_eq!(first.processed, 1);
        assert_eq!(first.emails_sent, 1);
        assert_eq!(
            first.push_alerts,
            vec!["Astra: Műszaki vizsga (due 2024-05-03)".to_string()]
        );

        let second = scan_reminders(&db, &mailer, date("2024-05-01")).await;
        assert_eq!(second, ScanResult::default());
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_dispatch_still_marks_sent() {
        let db = garage(vec![reminder("r1", "2024-05-03", true, false)]);
        let mailer = RecordingMailer {
            fail: true,
            ..Default::default()
        };

        let first = scan_reminders(&db, &mailer, date("2024-05-01")).await;
        assert_eq!(first.emails_sent, 0);
        assert_eq!(first.email_failures, 1);
        assert!(db.get_record("v1").unwrap().reminders[0].notification_sent);

        let second = scan_reminders(&db, &mailer, date("2024-05-01")).await;
        assert_eq!(second.processed, 0);
    }

    #[tokio::test]
    async fn test_outside_window_left_alone() {
        let db = garage(vec![reminder("r1", "2024-05-10", true, true)]);
        let mailer = RecordingMailer::default();

        let result = scan_reminders(&db, &mailer, date("2024-05-01")).await;
        assert_eq!(result.processed, 0);
        assert!(!db.get_record("v1").unwrap().reminders[0].notification_sent);
    }

    #[tokio::test]
    async fn test_overdue_reminder_included() {
        let db = garage(vec![reminder("r1", "2024-04-01", false, true)]);
        let mailer = RecordingMailer::default();

        let result = scan_reminders(&db, &mailer, date("2024-05-01")).await;
        assert_eq!(result.processed, 1);
        assert_eq!(result.emails_sent, 0);
        assert_eq!(result.push_alerts.len(), 1);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_recipient_counts_as_failure() {
        let db = garage(vec![reminder("r1", "2024-05-02", true, false)]);
        db.upsert_owner(Owner {
            id: "o1".to_string(),
            email: None,
        });
        let mailer = RecordingMailer::default();

        let result = scan_reminders(&db, &mailer, date("2024-05-01")).await;
        assert_eq!(result.processed, 1);
        assert_eq!(result.email_failures, 1);
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_scans_never_double_send() {
        let db = garage(vec![
            reminder("r1", "2024-05-02", true, false),
            reminder("r2", "2024-05-03", true, false),
        ]);
        let mailer = RecordingMailer::default();
        let today = date("2024-05-01");

        let (a, b) = tokio::join!(
            scan_reminders(&db, &mailer, today),
            scan_reminders(&db, &mailer, today)
        );
        assert_eq!(a.processed + b.processed, 2);
        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_scan_runs_on_spawned_task() {
        let db = garage(vec![reminder("r1", "2024-05-02", true, true)]);
        let mailer = Arc::new(RecordingMailer::default());

        let task_db = db.clone();
        let task_mailer = mailer.clone();
        let result = tokio::spawn(async move {
            scan_reminders(&task_db, task_mailer.as_ref(), date("2024-05-01")).await
        })
        .await
        .unwrap();

        assert_eq!(result.emails_sent, 1);
        assert_eq!(mailer.sent.lock().unwrap().len(), 1);
        assert!(db.get_record("v1").unwrap().reminders[0].notification_sent);
    }

    #[test]
    fn test_email_body_includes_plate_and_description() {
        let due = DueReminder {
            vehicle: garage(vec![]).get_record("v1").unwrap().vehicle,
            reminder: reminder("r1", "2024-05-03", true, false),
        };
        assert_eq!(
            email_body(&due),
            "Műszaki vizsga is due on 2024-05-03 for Astra (ABC-123).\n\nBring the registration papers"
        );
        assert_eq!(email_subject(&due), "Reminder: Műszaki vizsga – Astra");
    }
}
