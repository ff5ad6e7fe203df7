// ABOUTME: SQLite storage for admin accounts, site content, submissions and activity logs
// ABOUTME: Owns the connection pool and bootstraps the schema on startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! # Database Management
//!
//! One [`Database`] handle wraps the `SQLite` pool. Each table lives in its
//! own file that adds `migrate_*` and query methods to the same type.

mod activity_logs;
mod admins;
mod applications;
mod contacts;
mod documentation;
mod jobs;
mod services;

use crate::errors::{AppError, AppResult};
use anyhow::Result;
use sqlx::{
    sqlite::{SqlitePoolOptions, SqliteRow},
    Decode, Pool, Row, Sqlite, Type,
};
use std::path::Path;
use tracing::info;

/// Database manager for admins and site content
#[derive(Clone, Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// `sqlite::memory:` gets a single long-lived connection so every query
    /// sees the same in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the
    /// connection fails or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(database_url)
                .await?
        } else {
            if let Some(parent) = database_url
                .strip_prefix("sqlite:")
                .map(Path::new)
                .and_then(Path::parent)
                .filter(|parent| !parent.as_os_str().is_empty())
            {
                tokio::fs::create_dir_all(parent).await?;
            }

            // Ensure SQLite creates the database file if it doesn't exist
            let connection_options = if database_url.contains('?') {
                database_url.to_owned()
            } else {
                format!("{database_url}?mode=rwc")
            };
            SqlitePoolOptions::new().connect(&connection_options).await?
        };

        let db = Self { pool };
        db.migrate().await?;

        info!("Database ready at {database_url}");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create every table that does not exist yet
    ///
    /// # Errors
    ///
    /// Returns an error if any `CREATE TABLE` statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_admins().await?;
        self.migrate_jobs().await?;
        self.migrate_applications().await?;
        self.migrate_contacts().await?;
        self.migrate_services().await?;
        self.migrate_documentation().await?;
        self.migrate_activity_logs().await?;
        Ok(())
    }

    /// Connectivity check behind the readiness endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    async fn execute_ddl(&self, table: &str, ddl: &str) -> AppResult<()> {
        sqlx::query(ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create {table} table: {e}")))?;
        Ok(())
    }
}

/// Read one column, mapping decode failures to a database error
pub(crate) fn column<'r, T>(row: &'r SqliteRow, name: &str) -> AppResult<T>
where
    T: Decode<'r, Sqlite> + Type<Sqlite>,
{
    row.try_get(name)
        .map_err(|e| AppError::database(format!("Failed to get {name}: {e}")))
}

/// Decode a JSON string-array column; NULL and empty text become an empty list
pub(crate) fn decode_string_list(raw: Option<&str>) -> AppResult<Vec<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

/// Whether a query failed on a UNIQUE constraint
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}
