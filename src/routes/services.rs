// ABOUTME: Service catalog route handlers for the services pages and admin editing
// ABOUTME: Public listing is filtered by category and ordered for display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use crate::errors::AppError;
use crate::middleware::AdminRequest;
use crate::models::{ActivityAction, CategoryQuery, ResourceKind, Service, ServiceCategory, ServiceInput};
use crate::resources::ServerResources;
use crate::routes::{deleted_message, log_activity};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Service routes
pub struct ServiceRoutes;

impl ServiceRoutes {
    /// Create all service routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/services", get(Self::list).post(Self::create))
            .route(
                "/api/services/:id",
                get(Self::get_one).put(Self::update).delete(Self::delete),
            )
            .with_state(resources)
    }

    async fn list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<CategoryQuery>,
    ) -> Result<Json<Vec<Service>>, AppError> {
        let category = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .map(ServiceCategory::parse)
            .transpose()?;
        Ok(Json(resources.database.list_services(category).await?))
    }

    async fn get_one(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<i64>,
    ) -> Result<Json<Service>, AppError> {
        Ok(Json(resources.database.get_service(id).await?))
    }

    async fn create(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Json(input): Json<ServiceInput>,
    ) -> Result<(StatusCode, Json<Service>), AppError> {
        input.validate()?;
        let service = resources.database.create_service(&input).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Create, ResourceKind::Service, Some(service.id)),
        )
        .await;
        Ok((StatusCode::CREATED, Json(service)))
    }

    async fn update(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
        Json(input): Json<ServiceInput>,
    ) -> Result<Json<Service>, AppError> {
        input.validate()?;
        let service = resources.database.update_service(id, &input).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Update, ResourceKind::Service, Some(id)),
        )
        .await;
        Ok(Json(service))
    }

    async fn delete(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        resources.database.delete_service(id).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Delete, ResourceKind::Service, Some(id)),
        )
        .await;
        Ok(Json(deleted_message("Service")))
    }
}
