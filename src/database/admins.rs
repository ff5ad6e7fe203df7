// ABOUTME: Admin account storage: lookup by username and password hash upsert
// ABOUTME: Only bcrypt hashes are stored, never plaintext passwords
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use super::{column, Database};
use crate::errors::{AppError, AppResult};
use crate::models::AdminAccount;

impl Database {
    pub(super) async fn migrate_admins(&self) -> AppResult<()> {
        self.execute_ddl(
            "admins",
            r"
            CREATE TABLE IF NOT EXISTS admins (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .await
    }

    /// Find an admin by exact username
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_admin_by_username(&self, username: &str) -> AppResult<Option<AdminAccount>> {
        let row = sqlx::query("SELECT id, username, password_hash FROM admins WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch admin: {e}")))?;

        row.map(|row| {
            Ok(AdminAccount {
                id: column(&row, "id")?,
                username: column(&row, "username")?,
                password_hash: column(&row, "password_hash")?,
            })
        })
        .transpose()
    }

    /// Create the admin or replace its password hash, returning the row id
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails
    pub async fn upsert_admin(&self, username: &str, password_hash: &str) -> AppResult<i64> {
        sqlx::query(
            r"
            INSERT INTO admins (username, password_hash) VALUES (?, ?)
            ON CONFLICT(username) DO UPDATE SET password_hash = excluded.password_hash
            ",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save admin: {e}")))?;

        let id: i64 = sqlx::query_scalar("SELECT id FROM admins WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to read admin id: {e}")))?;
        Ok(id)
    }

    /// Number of admin accounts
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_admins(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count admins: {e}")))
    }
}
