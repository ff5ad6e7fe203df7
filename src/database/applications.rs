// ABOUTME: Job application storage with a status workflow and job title join
// ABOUTME: Applications referencing a deleted job keep their data with no job link
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use super::{column, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ApplicationInput, ApplicationStatus, JobApplication};
use sqlx::sqlite::SqliteRow;

const APPLICATION_SELECT: &str = r"
    SELECT a.id, a.job_id, j.title AS job_title, a.name, a.email, a.phone, a.resume_path,
           a.cover_letter, a.linkedin_url, a.portfolio_url, a.current_employer,
           a.years_experience, a.status, a.created_at
    FROM applications a
    LEFT JOIN jobs j ON a.job_id = j.id
";

impl Database {
    pub(super) async fn migrate_applications(&self) -> AppResult<()> {
        self.execute_ddl(
            "applications",
            r"
            CREATE TABLE IF NOT EXISTS applications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                job_id INTEGER REFERENCES jobs(id) ON DELETE SET NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                resume_path TEXT,
                cover_letter TEXT,
                linkedin_url TEXT,
                portfolio_url TEXT,
                current_employer TEXT,
                years_experience INTEGER,
                status TEXT NOT NULL DEFAULT 'new',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .await
    }

    /// Store a submitted application
    ///
    /// # Errors
    ///
    /// Returns invalid-input if `job_id` names no existing job
    pub async fn create_application(&self, input: &ApplicationInput) -> AppResult<JobApplication> {
        if let Some(job_id) = input.job_id {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM jobs WHERE id = ?)")
                .bind(job_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check job: {e}")))?;
            if !exists {
                return Err(AppError::invalid_input(format!("Unknown job {job_id}")));
            }
        }

        let id = sqlx::query(
            r"
            INSERT INTO applications (
                job_id, name, email, phone, resume_path, cover_letter,
                linkedin_url, portfolio_url, current_employer, years_experience
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(input.job_id)
        .bind(input.name.trim())
        .bind(input.email.trim())
        .bind(input.phone.as_deref())
        .bind(input.resume_path.as_deref())
        .bind(input.cover_letter.as_deref())
        .bind(input.linkedin_url.as_deref())
        .bind(input.portfolio_url.as_deref())
        .bind(input.current_employer.as_deref())
        .bind(input.years_experience)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save application: {e}")))?
        .last_insert_rowid();

        self.get_application(id).await
    }

    /// All applications, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_applications(&self) -> AppResult<Vec<JobApplication>> {
        let rows = sqlx::query(&format!(
            "{APPLICATION_SELECT} ORDER BY a.created_at DESC, a.id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch applications: {e}")))?;

        rows.iter().map(row_to_application).collect()
    }

    /// One application by id
    ///
    /// # Errors
    ///
    /// Returns not-found if no such application exists
    pub async fn get_application(&self, id: i64) -> AppResult<JobApplication> {
        let row = sqlx::query(&format!("{APPLICATION_SELECT} WHERE a.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch application: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Application {id}")))?;

        row_to_application(&row)
    }

    /// Move an application through the hiring pipeline
    ///
    /// # Errors
    ///
    /// Returns not-found if no such application exists
    pub async fn update_application_status(
        &self,
        id: i64,
        status: ApplicationStatus,
    ) -> AppResult<JobApplication> {
        let affected = sqlx::query("UPDATE applications SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update application: {e}")))?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Application {id}")));
        }
        self.get_application(id).await
    }

    /// Remove an application
    ///
    /// # Errors
    ///
    /// Returns not-found if no such application exists
    pub async fn delete_application(&self, id: i64) -> AppResult<()> {
        let affected = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete application: {e}")))?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Application {id}")));
        }
        Ok(())
    }
}

fn row_to_application(row: &SqliteRow) -> AppResult<JobApplication> {
    let status: String = column(row, "status")?;
    Ok(JobApplication {
        id: column(row, "id")?,
        job_id: column(row, "job_id")?,
        job_title: column(row, "job_title")?,
        name: column(row, "name")?,
        email: column(row, "email")?,
        phone: column(row, "phone")?,
        resume_path: column(row, "resume_path")?,
        cover_letter: column(row, "cover_letter")?,
        linkedin_url: column(row, "linkedin_url")?,
        portfolio_url: column(row, "portfolio_url")?,
        current_employer: column(row, "current_employer")?,
        years_experience: column(row, "years_experience")?,
        status: ApplicationStatus::parse(&status)?,
        created_at: column(row, "created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobInput;

    fn application(job_id: Option<i64>) -> ApplicationInput {
        ApplicationInput {
            job_id,
            name: "Ada Lovelace".to_owned(),
            email: "ada@analytical.engineering".to_owned(),
            cover_letter: Some("I like engines".to_owned()),
            ..ApplicationInput::default()
        }
    }

    #[tokio::test]
    async fn test_application_joins_job_title_and_survives_job_delete() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let job = db
            .create_job(&JobInput {
                title: "Detection Engineer".to_owned(),
                department: "Security".to_owned(),
                location: "Remote".to_owned(),
                job_type: "Full-time".to_owned(),
                description: "Write rules".to_owned(),
                requirements: Vec::new(),
                is_active: true,
            })
            .await
            .unwrap();

        let created = db.create_application(&application(Some(job.id))).await.unwrap();
        assert_eq!(created.job_title.as_deref(), Some("Detection Engineer"));
        assert_eq!(created.status, ApplicationStatus::New);

        db.delete_job(job.id).await.unwrap();
        let orphan = db.get_application(created.id).await.unwrap();
        assert_eq!(orphan.job_id, None);
        assert_eq!(orphan.job_title, None);
    }

    #[tokio::test]
    async fn test_unknown_job_is_rejected() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let err = db.create_application(&application(Some(99))).await.unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_status_update() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        let created = db.create_application(&application(None)).await.unwrap();
        let updated = db
            .update_application_status(created.id, ApplicationStatus::Interview)
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Interview);
        assert!(db
            .update_application_status(created.id + 1, ApplicationStatus::Hired)
            .await
            .is_err());
    }
}
