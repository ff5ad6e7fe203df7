// ABOUTME: Contact-form inbox storage with read/replied status tracking
// ABOUTME: Accepts only already validated and HTML-encoded submissions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use super::{column, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ContactMessage, ContactStatus, SanitizedContact};
use sqlx::sqlite::SqliteRow;

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, company, phone, status, created_at";

impl Database {
    pub(super) async fn migrate_contacts(&self) -> AppResult<()> {
        self.execute_ddl(
            "contacts",
            r"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                subject TEXT,
                message TEXT NOT NULL,
                company TEXT,
                phone TEXT,
                status TEXT NOT NULL DEFAULT 'new',
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .await
    }

    /// Store a contact message
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_contact(&self, contact: &SanitizedContact) -> AppResult<ContactMessage> {
        let id = sqlx::query(
            r"
            INSERT INTO contacts (name, email, subject, message, company, phone)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.subject)
        .bind(&contact.message)
        .bind(&contact.company)
        .bind(&contact.phone)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save contact: {e}")))?
        .last_insert_rowid();

        self.get_contact(id).await
    }

    /// All contact messages, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_contacts(&self) -> AppResult<Vec<ContactMessage>> {
        let rows = sqlx::query(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch contacts: {e}")))?;

        rows.iter().map(row_to_contact).collect()
    }

    /// One contact message by id
    ///
    /// # Errors
    ///
    /// Returns not-found if no such message exists
    pub async fn get_contact(&self, id: i64) -> AppResult<ContactMessage> {
        let row = sqlx::query(&format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch contact: {e}")))?
            .ok_or_else(|| AppError::not_found(format!("Contact {id}")))?;

        row_to_contact(&row)
    }

    /// Mark a message read or replied
    ///
    /// # Errors
    ///
    /// Returns not-found if no such message exists
    pub async fn update_contact_status(
        &self,
        id: i64,
        status: ContactStatus,
    ) -> AppResult<ContactMessage> {
        let affected = sqlx::query("UPDATE contacts SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to update contact: {e}")))?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Contact {id}")));
        }
        self.get_contact(id).await
    }

    /// Remove a message
    ///
    /// # Errors
    ///
    /// Returns not-found if no such message exists
    pub async fn delete_contact(&self, id: i64) -> AppResult<()> {
        let affected = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete contact: {e}")))?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Contact {id}")));
        }
        Ok(())
    }
}

fn row_to_contact(row: &SqliteRow) -> AppResult<ContactMessage> {
    let status: String = column(row, "status")?;
    Ok(ContactMessage {
        id: column(row, "id")?,
        name: column(row, "name")?,
        email: column(row, "email")?,
        subject: column(row, "subject")?,
        message: column(row, "message")?,
        company: column(row, "company")?,
        phone: column(row, "phone")?,
        status: ContactStatus::parse(&status)?,
        created_at: column(row, "created_at")?,
    })
}
