// ABOUTME: Contact form route handlers: validated public submission and admin inbox
// ABOUTME: Submissions are HTML-encoded before they reach storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use crate::errors::AppError;
use crate::middleware::{AdminRequest, AdminSession};
use crate::models::{ActivityAction, ContactInput, ContactMessage, ContactStatus, ResourceKind};
use crate::resources::ServerResources;
use crate::routes::{deleted_message, log_activity};
use crate::validation::validate_contact;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: String,
}

/// Contact routes
pub struct ContactRoutes;

impl ContactRoutes {
    /// Create all contact routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/contact", get(Self::list).post(Self::submit))
            .route("/api/contact/:id", delete(Self::delete))
            .route("/api/contact/:id/status", patch(Self::update_status))
            .with_state(resources)
    }

    async fn submit(
        State(resources): State<Arc<ServerResources>>,
        Json(input): Json<ContactInput>,
    ) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
        let contact = validate_contact(&input)?;
        let stored = resources.database.create_contact(&contact).await?;
        tracing::info!(contact_id = stored.id, "Contact form submitted");
        Ok((
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Message sent successfully",
                "id": stored.id,
            })),
        ))
    }

    async fn list(
        State(resources): State<Arc<ServerResources>>,
        _session: AdminSession,
    ) -> Result<Json<Vec<ContactMessage>>, AppError> {
        Ok(Json(resources.database.list_contacts().await?))
    }

    async fn update_status(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
        Json(update): Json<StatusUpdate>,
    ) -> Result<Json<ContactMessage>, AppError> {
        let status = ContactStatus::parse(update.status.trim())?;
        let contact = resources.database.update_contact_status(id, status).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Update, ResourceKind::Contact, Some(id)),
        )
        .await;
        Ok(Json(contact))
    }

    async fn delete(
        State(resources): State<Arc<ServerResources>>,
        admin: AdminRequest,
        Path(id): Path<i64>,
    ) -> Result<Json<serde_json::Value>, AppError> {
        resources.database.delete_contact(id).await?;
        log_activity(
            &resources.database,
            admin.activity(ActivityAction::Delete, ResourceKind::Contact, Some(id)),
        )
        .await;
        Ok(Json(deleted_message("Contact")))
    }
}
