// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Garage snapshot file; in-memory only when unset
    pub data_path: Option<PathBuf>,
    /// Shared secret expected from the scheduler on `/tasks/*`
    pub tasks_token: String,
    /// Mail relay endpoint for reminder emails
    pub mail_relay_url: Option<String>,
    /// Bearer token for the mail relay
    pub mail_relay_token: Option<String>,
    /// Run reminder scans in-process at this interval (seconds)
    pub reminder_scan_interval_secs: Option<u64>,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_path: None,
            tasks_token: "test_tasks_token".to_string(),
            mail_relay_url: None,
            mail_relay_token: None,
            reminder_scan_interval_secs: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_path: non_empty_var("GARAGE_DATA_PATH").map(PathBuf::from),
            tasks_token: env::var("TASKS_TOKEN")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing("TASKS_TOKEN"))?,
            mail_relay_url: non_empty_var("MAIL_RELAY_URL"),
            mail_relay_token: non_empty_var("MAIL_RELAY_TOKEN"),
            reminder_scan_interval_secs: match non_empty_var("REMINDER_SCAN_INTERVAL_SECS") {
                Some(raw) => Some(raw.parse().map_err(|_| {
                    ConfigError::Invalid("REMINDER_SCAN_INTERVAL_SECS", raw.clone())
                })?),
                None => None,
            },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
