// ABOUTME: Documentation index route handlers for the learning center and admin editing
// ABOUTME: Public reads go by category or slug, admin writes go by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use crate::errors::AppError;
use crate::middleware::AdminRequest;
use crate::models::{
    ActivityAction, CategoryQuery, Documentation, DocumentationInput, ResourceKind,
};
use crate::resources::ServerResources;
use crate::routes::{deleted_message, log_activity};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

/// Documentation routes
pub struct DocumentationRoutes;

impl DocumentationRoutes {
    /// Create all documentation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/documentation", get(Self::list).post(Self::create))
            // Reads address an entry by slug, writes by numeric id
            .route(
                "/api/documentation/:key",
                get(Self::get_by_slug).put(Self::update).delete(Self::delete),
            )
            .with_state(resources)
    }

    async fn list(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<CategoryQuery>,
    ) -> Result<Json<Vec<Documentation>>, AppError> {
        let category = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty());
        Ok(Json(resources.database.list_documentation(category).await?))
    }

    async fn get_by_slug(
        State(resources): State<Arc<ServerResources>>,
        Path(slug): Path<String>,
    ) -> Result<Json<Documentation>, AppError> {
        let doc = resources.database.get_documentation_by_slug(&slug).await?;
        if !doc.is_active {
            return Err(AppError::not_found("Documentation"));
        }
        Ok(Json(doc))
    }

    async fn create(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Json(input): Json<DocumentationInput>,
    ) -> Result<(StatusCode, Json<Documentation>), AppError> {
        input.validate()?;
        let doc = resources.database.create_documentation(&input).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Create, ResourceKind::Documentation, Some(doc.id)),
        )
        .await;
        Ok((StatusCode::CREATED, Json(doc)))
    }

    async fn update(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
        Json(input): Json<DocumentationInput>,
    ) -> Result<Json<Documentation>, AppError> {
        input.validate()?;
        let doc = resources.database.update_documentation(id, &input).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Update, ResourceKind::Documentation, Some(id)),
        )
        .await;
        Ok(Json(doc))
    }

    async fn delete(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        resources.database.delete_documentation(id).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Delete, ResourceKind::Documentation, Some(id)),
        )
        .await;
        Ok(Json(deleted_message("Documentation")))
    }
}
