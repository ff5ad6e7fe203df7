// ABOUTME: Documentation index storage keyed by unique slug
// ABOUTME: Supports category listing, slug lookup and bulk replacement for seeding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use super::{column, is_unique_violation, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Documentation, DocumentationInput};
use sqlx::sqlite::SqliteRow;

const DOC_COLUMNS: &str = "id, title, slug, file_path, category, description, display_order, \
     is_active, created_at, updated_at";

fn map_write_error(error: &sqlx::Error, slug: &str) -> AppError {
    if is_unique_violation(error) {
        AppError::already_exists(format!("Documentation with slug '{slug}' already exists"))
    } else {
        AppError::database(format!("Failed to save documentation: {error}"))
    }
}

impl Database {
    pub(super) async fn migrate_documentation(&self) -> AppResult<()> {
        self.execute_ddl(
            "documentation",
            r"
            CREATE TABLE IF NOT EXISTS documentation (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                slug TEXT UNIQUE NOT NULL,
                file_path TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'learning-center',
                description TEXT,
                display_order INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .await
    }

    /// Active documentation ordered for display, optionally limited to one category
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_documentation(&self, category: Option<&str>) -> AppResult<Vec<Documentation>> {
        let rows = match category {
            Some(category) => {
                sqlx::query(&format!(
                    "SELECT {DOC_COLUMNS} FROM documentation
                     WHERE category = ? AND is_active = 1
                     ORDER BY display_order ASC, id ASC"
                ))
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {DOC_COLUMNS} FROM documentation
                     WHERE is_active = 1
                     ORDER BY display_order ASC, id ASC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to fetch documentation: {e}")))?;

        rows.iter().map(row_to_documentation).collect()
    }

    /// One entry by slug
    ///
    /// # Errors
    ///
    /// Returns not-found if no entry has this slug
    pub async fn get_documentation_by_slug(&self, slug: &str) -> AppResult<Documentation> {
        let row = sqlx::query(&format!("SELECT {DOC_COLUMNS} FROM documentation WHERE slug = ?"))
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch documentation: {e}")))?
            .ok_or_else(|| AppError::not_found("Documentation"))?;

        row_to_documentation(&row)
    }

    /// One entry by id
    ///
    /// # Errors
    ///
    /// Returns not-found if no such entry exists
    pub async fn get_documentation(&self, id: i64) -> AppResult<Documentation> {
        let row = sqlx::query(&format!("SELECT {DOC_COLUMNS} FROM documentation WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch documentation: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Documentation {id}")))?;

        row_to_documentation(&row)
    }

    /// Insert an entry
    ///
    /// # Errors
    ///
    /// Returns already-exists if the slug is taken
    pub async fn create_documentation(&self, input: &DocumentationInput) -> AppResult<Documentation> {
        let id = sqlx::query(
            r"
            INSERT INTO documentation (title, slug, file_path, category, description, display_order, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(input.title.trim())
        .bind(input.slug.trim())
        .bind(input.file_path.trim())
        .bind(input.category_or_default())
        .bind(input.description.as_deref())
        .bind(input.display_order)
        .bind(input.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(&e, &input.slug))?
        .last_insert_rowid();

        self.get_documentation(id).await
    }

    /// Replace every field of an entry
    ///
    /// # Errors
    ///
    /// Returns not-found if no such entry exists, already-exists if the new slug is taken
    pub async fn update_documentation(
        &self,
        id: i64,
        input: &DocumentationInput,
    ) -> AppResult<Documentation> {
        let affected = sqlx::query(
            r"
            UPDATE documentation
            SET title = ?, slug = ?, file_path = ?, category = ?, description = ?,
                display_order = ?, is_active = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            ",
        )
        .bind(input.title.trim())
        .bind(input.slug.trim())
        .bind(input.file_path.trim())
        .bind(input.category_or_default())
        .bind(input.description.as_deref())
        .bind(input.display_order)
        .bind(input.is_active)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(&e, &input.slug))?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Documentation {id}")));
        }
        self.get_documentation(id).await
    }

    /// Remove an entry
    ///
    /// # Errors
    ///
    /// Returns not-found if no such entry exists
    pub async fn delete_documentation(&self, id: i64) -> AppResult<()> {
        let affected = sqlx::query("DELETE FROM documentation WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete documentation: {e}")))?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Documentation {id}")));
        }
        Ok(())
    }

    /// Replace the whole documentation index in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error and leaves the old index in place if any insert fails
    pub async fn replace_documentation(&self, entries: &[DocumentationInput]) -> AppResult<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("DELETE FROM documentation")
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear documentation: {e}")))?;

        for entry in entries {
            entry.validate()?;
            sqlx::query(
                r"
                INSERT INTO documentation (title, slug, file_path, category, description, display_order, is_active)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ",
            )
            .bind(entry.title.trim())
            .bind(entry.slug.trim())
            .bind(entry.file_path.trim())
            .bind(entry.category_or_default())
            .bind(entry.description.as_deref())
            .bind(entry.display_order)
            .bind(entry.is_active)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(&e, &entry.slug))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit documentation: {e}")))?;
        Ok(entries.len())
    }
}

fn row_to_documentation(row: &SqliteRow) -> AppResult<Documentation> {
    Ok(Documentation {
        id: column(row, "id")?,
        title: column(row, "title")?,
        slug: column(row, "slug")?,
        file_path: column(row, "file_path")?,
        category: column(row, "category")?,
        description: column(row, "description")?,
        display_order: column(row, "display_order")?,
        is_active: column(row, "is_active")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}
