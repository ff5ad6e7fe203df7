// ABOUTME: Admin login and session verification route handlers
// ABOUTME: Login answers every rejection with the same generic 401 body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! Authentication routes
//!
//! `POST /api/auth/login` trades a username/password pair for a bearer token.
//! `GET /api/auth/verify` lets the admin frontend check a stored token.

use crate::auth::AuthError;
use crate::middleware::{AdminSession, ClientInfo};
use crate::models::{ActivityAction, NewActivity, ResourceKind};
use crate::resources::ServerResources;
use crate::routes::log_activity;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Login request payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Admin username
    pub username: String,
    /// Plaintext password, never stored or logged
    pub password: String,
}

/// Login response with token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    /// Authenticated admin
    pub username: String,
    /// Token expiry, RFC 3339
    pub expires_at: Option<String>,
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/verify", get(Self::handle_verify))
            .with_state(resources)
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        client: ClientInfo,
        Json(request): Json<LoginRequest>,
    ) -> Result<Json<LoginResponse>, AuthError> {
        let issued = resources
            .auth_manager
            .login(&resources.database, &request.username, &request.password)
            .await?;

        log_activity(
            &resources.database,
            NewActivity {
                admin_username: issued.claims.sub.clone(),
                action: ActivityAction::Login,
                resource: ResourceKind::Admin,
                resource_id: None,
                details: serde_json::json!({ "method": "POST", "path": "/api/auth/login" }),
                ip_address: client.ip_address,
                user_agent: client.user_agent,
            },
        )
        .await;

        Ok(Json(LoginResponse {
            expires_at: issued.claims.expires_at().map(|at| at.to_rfc3339()),
            username: issued.claims.sub,
            token: issued.token,
        }))
    }

    async fn handle_verify(session: AdminSession) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "valid": true,
            "username": session.username,
        }))
    }
}
