// SPDX-License-Identifier: MIT
// Copyright 2026 Garage Tracker Contributors

//! Middleware modules (scheduler authentication, security headers).

pub mod security;
pub mod tasks_auth;

pub use tasks_auth::require_tasks_auth;
