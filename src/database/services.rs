// ABOUTME: Service catalog storage grouped by page category and display order
// ABOUTME: Feature and highlight bullet lists are stored as JSON text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use super::{column, decode_string_list, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Service, ServiceCategory, ServiceInput};
use sqlx::sqlite::SqliteRow;

const SERVICE_COLUMNS: &str = "id, category, title, description, icon_name, features, highlights, \
     badge, display_order, is_active, created_at, updated_at";

impl Database {
    pub(super) async fn migrate_services(&self) -> AppResult<()> {
        self.execute_ddl(
            "services",
            r"
            CREATE TABLE IF NOT EXISTS services (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL CHECK(category IN ('need', 'consulting', 'industry', 'platform')),
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                icon_name TEXT,
                features TEXT NOT NULL DEFAULT '[]',
                highlights TEXT,
                badge TEXT,
                display_order INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .await
    }

    /// Active services ordered for display, optionally limited to one category
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or stored lists are corrupt
    pub async fn list_services(&self, category: Option<ServiceCategory>) -> AppResult<Vec<Service>> {
        let rows = match category {
            Some(category) => {
                sqlx::query(&format!(
                    "SELECT {SERVICE_COLUMNS} FROM services
                     WHERE category = ? AND is_active = 1
                     ORDER BY display_order ASC, id ASC"
                ))
                .bind(category.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {SERVICE_COLUMNS} FROM services
                     WHERE is_active = 1
                     ORDER BY display_order ASC, id ASC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::database(format!("Failed to fetch services: {e}")))?;

        rows.iter().map(row_to_service).collect()
    }

    /// One service by id, active or not
    ///
    /// # Errors
    ///
    /// Returns not-found if no such service exists
    pub async fn get_service(&self, id: i64) -> AppResult<Service> {
        let row = sqlx::query(&format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch service: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Service {id}")))?;

        row_to_service(&row)
    }

    /// Insert a service
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_service(&self, input: &ServiceInput) -> AppResult<Service> {
        let features = serde_json::to_string(&input.features)?;
        let highlights = input
            .highlights
            .as_ref()
            .filter(|items| !items.is_empty())
            .map(serde_json::to_string)
            .transpose()?;

        let id = sqlx::query(
            r"
            INSERT INTO services (
                category, title, description, icon_name, features, highlights,
                badge, display_order, is_active
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(input.category.as_str())
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(input.icon_name.as_deref())
        .bind(features)
        .bind(highlights)
        .bind(input.badge.as_deref())
        .bind(input.display_order)
        .bind(input.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create service: {e}")))?
        .last_insert_rowid();

        self.get_service(id).await
    }

    /// Replace every field of a service
    ///
    /// # Errors
    ///
    /// Returns not-found if no such service exists
    pub async fn update_service(&self, id: i64, input: &ServiceInput) -> AppResult<Service> {
        let features = serde_json::to_string(&input.features)?;
        let highlights = input
            .highlights
            .as_ref()
            .filter(|items| !items.is_empty())
            .map(serde_json::to_string)
            .transpose()?;

        let affected = sqlx::query(
            r"
            UPDATE services
            SET category = ?, title = ?, description = ?, icon_name = ?, features = ?,
                highlights = ?, badge = ?, display_order = ?, is_active = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            ",
        )
        .bind(input.category.as_str())
        .bind(input.title.trim())
        .bind(&input.description)
        .bind(input.icon_name.as_deref())
        .bind(features)
        .bind(highlights)
        .bind(input.badge.as_deref())
        .bind(input.display_order)
        .bind(input.is_active)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update service: {e}")))?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Service {id}")));
        }
        self.get_service(id).await
    }

    /// Remove a service
    ///
    /// # Errors
    ///
    /// Returns not-found if no such service exists
    pub async fn delete_service(&self, id: i64) -> AppResult<()> {
        let affected = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete service: {e}")))?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Service {id}")));
        }
        Ok(())
    }
}

fn row_to_service(row: &SqliteRow) -> AppResult<Service> {
    let category: String = column(row, "category")?;
    let features: Option<String> = column(row, "features")?;
    let highlights: Option<String> = column(row, "highlights")?;

    Ok(Service {
        id: column(row, "id")?,
        category: ServiceCategory::parse(&category)?,
        title: column(row, "title")?,
        description: column(row, "description")?,
        icon_name: column(row, "icon_name")?,
        features: decode_string_list(features.as_deref())?,
        highlights: highlights
            .as_deref()
            .map(|raw| decode_string_list(Some(raw)))
            .transpose()?,
        badge: column(row, "badge")?,
        display_order: column(row, "display_order")?,
        is_active: column(row, "is_active")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}
