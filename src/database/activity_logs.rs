// ABOUTME: Admin activity audit trail with filtered, paginated listing and stats
// ABOUTME: Entries are append-only and reference admins by username lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use super::{column, Database};
use crate::constants::pagination::{DEFAULT_LIMIT, MAX_LIMIT, STATS_WINDOW_DAYS};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLog, ActivityPage, ActivityQuery, ActivityStat, NewActivity, Pagination};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite};

const ACTIVITY_COLUMNS: &str = "id, admin_id, admin_username, action_type, resource_type, \
     resource_id, details, ip_address, user_agent, created_at";

/// Filters that survived trimming, owned so they can be bound twice
struct ActivityFilters {
    action_type: Option<String>,
    resource_type: Option<String>,
    admin_username: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl ActivityFilters {
    fn from_query(query: &ActivityQuery) -> Self {
        let clean = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned)
        };
        Self {
            action_type: clean(&query.action_type),
            resource_type: clean(&query.resource_type),
            admin_username: clean(&query.admin_username),
            start_date: clean(&query.start_date),
            end_date: clean(&query.end_date),
        }
    }

    fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        builder.push(" WHERE 1 = 1");
        if let Some(action) = &self.action_type {
            builder.push(" AND action_type = ").push_bind(action.clone());
        }
        if let Some(resource) = &self.resource_type {
            builder.push(" AND resource_type = ").push_bind(resource.clone());
        }
        if let Some(username) = &self.admin_username {
            builder.push(" AND admin_username = ").push_bind(username.clone());
        }
        if let Some(start) = &self.start_date {
            builder.push(" AND created_at >= ").push_bind(start.clone());
        }
        if let Some(end) = &self.end_date {
            builder.push(" AND created_at <= ").push_bind(end.clone());
        }
    }
}

/// Resolve page and limit to the allowed ranges
pub(crate) fn page_bounds(query: &ActivityQuery) -> (i64, i64) {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    (page, limit)
}

impl Database {
    pub(super) async fn migrate_activity_logs(&self) -> AppResult<()> {
        self.execute_ddl(
            "activity_logs",
            r"
            CREATE TABLE IF NOT EXISTS activity_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                admin_id INTEGER REFERENCES admins(id) ON DELETE SET NULL,
                admin_username TEXT NOT NULL,
                action_type TEXT NOT NULL,
                resource_type TEXT NOT NULL,
                resource_id INTEGER,
                details TEXT,
                ip_address TEXT,
                user_agent TEXT,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .await?;

        self.execute_ddl(
            "activity_logs index",
            "CREATE INDEX IF NOT EXISTS idx_activity_logs_created_at ON activity_logs(created_at)",
        )
        .await
    }

    /// Append one activity entry
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn record_activity(&self, activity: &NewActivity) -> AppResult<i64> {
        let details = serde_json::to_string(&activity.details)?;
        let id = sqlx::query(
            r"
            INSERT INTO activity_logs (
                admin_id, admin_username, action_type, resource_type, resource_id,
                details, ip_address, user_agent
            ) VALUES ((SELECT id FROM admins WHERE username = ?), ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&activity.admin_username)
        .bind(&activity.admin_username)
        .bind(activity.action.as_str())
        .bind(activity.resource.as_str())
        .bind(activity.resource_id)
        .bind(details)
        .bind(&activity.ip_address)
        .bind(&activity.user_agent)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to record activity: {e}")))?
        .last_insert_rowid();

        Ok(id)
    }

    /// Filtered activity entries, newest first, one page at a time
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error if the page lies beyond any addressable
    /// offset, or a database error if either the count or the page query fails
    pub async fn list_activity(&self, query: &ActivityQuery) -> AppResult<ActivityPage> {
        let (page, limit) = page_bounds(query);
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| AppError::invalid_input(format!("Page {page} is out of range")))?;
        let filters = ActivityFilters::from_query(query);

        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM activity_logs");
        filters.push_where(&mut count_query);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count activity logs: {e}")))?;

        let mut page_query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {ACTIVITY_COLUMNS} FROM activity_logs"));
        filters.push_where(&mut page_query);
        page_query
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = page_query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to fetch activity logs: {e}")))?;

        let logs = rows
            .iter()
            .map(row_to_activity)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(ActivityPage {
            logs,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: (total + limit - 1) / limit,
            },
        })
    }

    /// Entry counts per action type over the recent window, most frequent first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn activity_stats(&self) -> AppResult<Vec<ActivityStat>> {
        let rows = sqlx::query(
            r"
            SELECT action_type, COUNT(*) AS count
            FROM activity_logs
            WHERE created_at >= datetime('now', ?)
            GROUP BY action_type
            ORDER BY count DESC, action_type ASC
            ",
        )
        .bind(format!("-{STATS_WINDOW_DAYS} days"))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch activity stats: {e}")))?;

        rows.iter()
            .map(|row| {
                Ok(ActivityStat {
                    action_type: column(row, "action_type")?,
                    count: column(row, "count")?,
                })
            })
            .collect()
    }
}

fn row_to_activity(row: &SqliteRow) -> AppResult<ActivityLog> {
    Ok(ActivityLog {
        id: column(row, "id")?,
        admin_id: column(row, "admin_id")?,
        admin_username: column(row, "admin_username")?,
        action_type: column(row, "action_type")?,
        resource_type: column(row, "resource_type")?,
        resource_id: column(row, "resource_id")?,
        details: column(row, "details")?,
        ip_address: column(row, "ip_address")?,
        user_agent: column(row, "user_agent")?,
        created_at: column(row, "created_at")?,
    })
}
