// ABOUTME: Shared resource container handed to every route through axum state
// ABOUTME: Built once at startup from the validated configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! # Server Resources
//!
//! Centralized resource container for dependency injection. Configuration is
//! parsed once and passed in here; no handler reads the process environment.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::middleware::AdminAuthMiddleware;
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone, Debug)]
pub struct ServerResources {
    /// Content storage
    pub database: Arc<Database>,
    /// Token issuer and verifier
    pub auth_manager: Arc<AuthManager>,
    /// Admin request authentication
    pub auth_middleware: Arc<AdminAuthMiddleware>,
    /// Immutable startup configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no signing secret is configured
    pub fn new(database: Database, config: ServerConfig) -> AppResult<Self> {
        let secret = config
            .jwt_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::config("JWT_SECRET is required"))?;

        let auth_manager = AuthManager::new(secret, config.jwt_expiry_hours);
        let auth_middleware = AdminAuthMiddleware::new(auth_manager.clone());

        Ok(Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            auth_middleware: Arc::new(auth_middleware),
            config: Arc::new(config),
        })
    }
}
