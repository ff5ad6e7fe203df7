// ABOUTME: Job opening route handlers for the careers page and admin management
// ABOUTME: Public listing shows active jobs, admin routes manage all of them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use crate::errors::AppError;
use crate::middleware::{AdminRequest, AdminSession};
use crate::models::{ActivityAction, Job, JobInput, ResourceKind};
use crate::resources::ServerResources;
use crate::routes::{deleted_message, log_activity};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Job routes
pub struct JobRoutes;

impl JobRoutes {
    /// Create all job routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/jobs", get(Self::list_active).post(Self::create))
            .route("/api/jobs/all", get(Self::list_all))
            .route(
                "/api/jobs/:id",
                get(Self::get_one).put(Self::update).delete(Self::delete),
            )
            .with_state(resources)
    }

    async fn list_active(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Json<Vec<Job>>, AppError> {
        Ok(Json(resources.database.list_active_jobs().await?))
    }

    async fn list_all(
        State(resources): State<Arc<ServerResources>>,
        _session: AdminSession,
    ) -> Result<Json<Vec<Job>>, AppError> {
        Ok(Json(resources.database.list_all_jobs().await?))
    }

    /// Public detail view; inactive jobs are hidden
    async fn get_one(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Json<Job>, AppError> {
        let job = resources.database.get_job(id).await?;
        if !job.is_active {
            return Err(AppError::not_found(format!("Job {id}")));
        }
        Ok(Json(job))
    }

    async fn create(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Json(input): Json<JobInput>,
    ) -> Result<(StatusCode, Json<Job>), AppError> {
        input.validate()?;
        let job = resources.database.create_job(&input).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Create, ResourceKind::Job, Some(job.id)),
        )
        .await;
        Ok((StatusCode::CREATED, Json(job)))
    }

    async fn update(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
        Json(input): Json<JobInput>,
    ) -> Result<Json<Job>, AppError> {
        input.validate()?;
        let job = resources.database.update_job(id, &input).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Update, ResourceKind::Job, Some(id)),
        )
        .await;
        Ok(Json(job))
    }

    async fn delete(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        resources.database.delete_job(id).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Delete, ResourceKind::Job, Some(id)),
        )
        .await;
        Ok(Json(deleted_message("Job")))
    }
}
