// ABOUTME: Route module organization for the site API
// ABOUTME: Public content and submission endpoints plus the admin management surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! Route module for the Shield site server
//!
//! Each domain module owns its route table and thin handlers that delegate to
//! [`crate::database::Database`]. Admin handlers take an
//! [`crate::middleware::AdminRequest`] (or [`crate::middleware::AdminSession`])
//! argument, so an unauthenticated request is rejected before the handler body runs.

use crate::database::Database;
use crate::models::NewActivity;

/// Activity log listing and statistics
pub mod activity_logs;
/// Job application submission and review
pub mod applications;
/// Admin login and session verification
pub mod auth;
/// Contact form submission and inbox
pub mod contacts;
/// Documentation index
pub mod documentation;
/// Health check and readiness routes
pub mod health;
/// Job openings
pub mod jobs;
/// Service catalog
pub mod services;

/// Activity log route handlers
pub use activity_logs::ActivityLogRoutes;
/// Application route handlers
pub use applications::ApplicationRoutes;
/// Authentication route handlers
pub use auth::{AuthRoutes, LoginRequest, LoginResponse};
/// Contact route handlers
pub use contacts::ContactRoutes;
/// Documentation route handlers
pub use documentation::DocumentationRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Job route handlers
pub use jobs::JobRoutes;
/// Service route handlers
pub use services::ServiceRoutes;

/// Record an admin action; failures are logged and never fail the request
pub(crate) async fn log_activity(database: &Database, activity: NewActivity) {
    if let Err(e) = database.record_activity(&activity).await {
        tracing::warn!(
            action = activity.action.as_str(),
            resource = activity.resource.as_str(),
            "Failed to record admin activity: {e}"
        );
    }
}

/// Uniform acknowledgement body for deletes
pub(crate) fn deleted_message(resource: &str) -> serde_json::Value {
    serde_json::json!({ "message": format!("{resource} deleted successfully") })
}
