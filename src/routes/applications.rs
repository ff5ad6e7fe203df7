// ABOUTME: Job application route handlers: public submission and admin review
// ABOUTME: Review covers listing, detail, status workflow and deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use crate::errors::AppError;
use crate::middleware::{AdminRequest, AdminSession};
use crate::models::{ActivityAction, ApplicationInput, ApplicationStatus, JobApplication, ResourceKind};
use crate::resources::ServerResources;
use crate::routes::{deleted_message, log_activity};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// Status change request
#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: String,
}

/// Application routes
pub struct ApplicationRoutes;

impl ApplicationRoutes {
    /// Create all application routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/applications", get(Self::list).post(Self::submit))
            .route(
                "/api/applications/:id",
                get(Self::get_one).delete(Self::delete),
            )
            .route("/api/applications/:id/status", patch(Self::update_status))
            .with_state(resources)
    }

    async fn submit(
        State(resources): State<Arc<ServerResources>>,
        Json(input): Json<ApplicationInput>,
    ) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
        input.validate()?;
        let application = resources.database.create_application(&input).await?;
        tracing::info!(
            application_id = application.id,
            job_id = ?application.job_id,
            "Job application received"
        );
        Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Application submitted successfully",
                "id": application.id,
            })),
        ))
    }

    async fn list(
        State(resources): State<Arc<ServerResources>>,
        _session: AdminSession,
    ) -> Result<Json<Vec<JobApplication>>, AppError> {
        Ok(Json(resources.database.list_applications().await?))
    }

    async fn get_one(
        State(resources): State<Arc<ServerResources>>,
        _session: AdminSession,
        Path(id): Path<i64>,
    ) -> Result<Json<JobApplication>, AppError> {
        Ok(Json(resources.database.get_application(id).await?))
    }

    async fn update_status(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
        Json(update): Json<StatusUpdate>,
    ) -> Result<Json<JobApplication>, AppError> {
        let status = ApplicationStatus::parse(update.status.trim())?;
        let application = resources
            .database
            .update_application_status(id, status)
            .await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Update, ResourceKind::Application, Some(id)),
        )
        .await;
        Ok(Json(application))
    }

    async fn delete(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        resources.database.delete_application(id).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Delete, ResourceKind::Application, Some(id)),
        )
        .await;
        Ok(Json(deleted_message("Application")))
    }
}
