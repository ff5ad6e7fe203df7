// ABOUTME: Job opening storage with JSON-encoded requirement lists
// ABOUTME: Public listing returns active jobs only, admin listing returns all
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use super::{column, decode_string_list, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{Job, JobInput};
use sqlx::sqlite::SqliteRow;

const JOB_COLUMNS: &str =
    "id, title, department, location, type, description, requirements, is_active, created_at";

impl Database {
    pub(super) async fn migrate_jobs(&self) -> AppResult<()> {
        self.execute_ddl(
            "jobs",
            r"
            CREATE TABLE IF NOT EXISTS jobs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                department TEXT NOT NULL,
                location TEXT NOT NULL,
                type TEXT NOT NULL,
                description TEXT NOT NULL,
                requirements TEXT NOT NULL DEFAULT '[]',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .await
    }

    /// Active jobs, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or stored requirements are corrupt
    pub async fn list_active_jobs(&self) -> AppResult<Vec<Job>> {
        self.fetch_jobs(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE is_active = 1 ORDER BY created_at DESC, id DESC"
        ))
        .await
    }

    /// Every job, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or stored requirements are corrupt
    pub async fn list_all_jobs(&self) -> AppResult<Vec<Job>> {
        self.fetch_jobs(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC, id DESC"
        ))
        .await
    }

    async fn fetch_jobs(&self, sql: &str) -> AppResult<Vec<Job>> {
        let rows = sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch jobs: {e}")))?;

        rows.iter().map(row_to_job).collect()
    }

    /// One job by id, active or not
    ///
    /// # Errors
    ///
    /// Returns not-found if no such job exists
    pub async fn get_job(&self, id: i64) -> AppResult<Job> {
        let row = sqlx::query(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch job: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Job {id}")))?;

        row_to_job(&row)
    }

    /// Insert a job
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_job(&self, input: &JobInput) -> AppResult<Job> {
        let requirements = serde_json::to_string(&input.requirements)?;
        let id = sqlx::query(
            r"
            INSERT INTO jobs (title, department, location, type, description, requirements, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(input.title.trim())
        .bind(input.department.trim())
        .bind(input.location.trim())
        .bind(input.job_type.trim())
        .bind(&input.description)
        .bind(requirements)
        .bind(input.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create job: {e}")))?
        .last_insert_rowid();

        self.get_job(id).await
    }

    /// Replace every field of a job
    ///
    /// # Errors
    ///
    /// Returns not-found if no such job exists
    pub async fn update_job(&self, id: i64, input: &JobInput) -> AppResult<Job> {
        let requirements = serde_json::to_string(&input.requirements)?;
        let affected = sqlx::query(
            r"
            UPDATE jobs
            SET title = ?, department = ?, location = ?, type = ?, description = ?,
                requirements = ?, is_active = ?
            WHERE id = ?
            ",
        )
        .bind(input.title.trim())
        .bind(input.department.trim())
        .bind(input.location.trim())
        .bind(input.job_type.trim())
        .bind(&input.description)
        .bind(requirements)
        .bind(input.is_active)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update job: {e}")))?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Job {id}")));
        }
        self.get_job(id).await
    }

    /// Delete a job; its applications keep their row with no job link
    ///
    /// # Errors
    ///
    /// Returns not-found if no such job exists
    pub async fn delete_job(&self, id: i64) -> AppResult<()> {
        let affected = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete job: {e}")))?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Job {id}")));
        }
        Ok(())
    }
}

fn row_to_job(row: &SqliteRow) -> AppResult<Job> {
    let requirements: Option<String> = column(row, "requirements")?;
    Ok(Job {
        id: column(row, "id")?,
        title: column(row, "title")?,
        department: column(row, "department")?,
        location: column(row, "location")?,
        job_type: column(row, "type")?,
        description: column(row, "description")?,
        requirements: decode_string_list(requirements.as_deref())?,
        is_active: column(row, "is_active")?,
        created_at: column(row, "created_at")?,
    })
}
