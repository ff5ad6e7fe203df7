// ABOUTME: Admin activity log route handlers: filtered listing and per-action statistics
// ABOUTME: Both endpoints require an authenticated admin session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use crate::errors::AppError;
use crate::middleware::AdminSession;
use crate::models::{ActivityPage, ActivityQuery, ActivityStat};
use crate::resources::ServerResources;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Activity log routes
pub struct ActivityLogRoutes;

impl ActivityLogRoutes {
    /// Create all activity log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/activity-logs", get(Self::list))
            .route("/api/activity-logs/stats", get(Self::stats))
            .with_state(resources)
    }

    async fn list(
        State(resources): State<Arc<ServerResources>>,
        _session: AdminSession,
        Query(query): Query<ActivityQuery>,
    ) -> Result<Json<ActivityPage>, AppError> {
        Ok(Json(resources.database.list_activity(&query).await?))
    }

    async fn stats(
        State(resources): State<Arc<ServerResources>>,
        _session: AdminSession,
    ) -> Result<Json<Vec<ActivityStat>>, AppError> {
        Ok(Json(resources.database.activity_stats().await?))
    }
}
