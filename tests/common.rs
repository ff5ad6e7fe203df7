// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides configuration, in-memory resources, admin seeding and login helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `shield_site_server`

use anyhow::Result;
use axum::Router;
use shield_site_server::{
    config::ServerConfig, database::Database, resources::ServerResources, server::build_router,
};
use std::collections::HashMap;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Signing secret that passes every validator check
pub const STRONG_SECRET: &str = "Zq8vN3kLw7Rt2Yp5Hc9Jm4Xb6Gf1Ds0Ae";

/// Admin credentials seeded by [`create_test_app_with_admin`]
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Correct-Horse-Battery-9";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Build a configuration from literal key/value pairs instead of the process environment
pub fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    ServerConfig::from_lookup(|key| vars.get(key).cloned())
}

/// Valid testing configuration backed by an in-memory database
pub fn test_config() -> ServerConfig {
    config_from(&[
        ("ENVIRONMENT", "testing"),
        ("JWT_SECRET", STRONG_SECRET),
        ("DATABASE_PATH", "sqlite::memory:"),
        ("PORT", "5001"),
    ])
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources(config: ServerConfig) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(database, config)?))
}

/// Insert an admin with a cheap bcrypt cost so tests stay fast
pub async fn seed_admin(database: &Database, username: &str, password: &str) -> Result<i64> {
    let password_hash = bcrypt::hash(password, 4)?;
    Ok(database.upsert_admin(username, &password_hash).await?)
}

/// Full router plus its resources, with one admin account seeded
pub async fn create_test_app_with_admin() -> Result<(Router, Arc<ServerResources>)> {
    let resources = create_test_resources(test_config()).await?;
    seed_admin(&resources.database, ADMIN_USERNAME, ADMIN_PASSWORD).await?;
    Ok((build_router(&resources), resources))
}
