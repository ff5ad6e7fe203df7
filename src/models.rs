// ABOUTME: Domain models for admins, jobs, applications, contacts, services, docs and activity
// ABOUTME: Row types returned by storage plus the request payloads routes accept
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! # Data Models
//!
//! Stored rows are returned to clients as-is. JSON array columns
//! (`requirements`, `features`, `highlights`) are decoded into vectors.
//! Timestamps are `SQLite` `CURRENT_TIMESTAMP` text in UTC.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_true() -> bool {
    true
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(())
}

// ================================================================================================
// Admins
// ================================================================================================

/// A stored administrator
#[derive(Clone)]
pub struct AdminAccount {
    /// Row id
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
}

impl fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAccount")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

// ================================================================================================
// Jobs
// ================================================================================================

/// Job opening
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    /// Row id
    pub id: i64,
    /// Position title
    pub title: String,
    /// Owning department
    pub department: String,
    /// Office or "Remote"
    pub location: String,
    /// Full-time, contract, ...
    #[serde(rename = "type")]
    pub job_type: String,
    /// Long description
    pub description: String,
    /// Bullet list of requirements
    pub requirements: Vec<String>,
    /// Listed on the public careers page
    pub is_active: bool,
    /// Creation time
    pub created_at: String,
}

/// Create or replace a job
#[derive(Debug, Clone, Deserialize)]
pub struct JobInput {
    /// Position title
    pub title: String,
    /// Owning department
    pub department: String,
    /// Office or "Remote"
    pub location: String,
    /// Full-time, contract, ...
    #[serde(rename = "type")]
    pub job_type: String,
    /// Long description
    pub description: String,
    /// Bullet list of requirements
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Listed on the public careers page
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl JobInput {
    /// Reject blank required fields
    ///
    /// # Errors
    ///
    /// Returns a missing-field error naming the first blank field
    pub fn validate(&self) -> AppResult<()> {
        require("title", &self.title)?;
        require("department", &self.department)?;
        require("location", &self.location)?;
        require("type", &self.job_type)?;
        require("description", &self.description)
    }
}

// ================================================================================================
// Applications
// ================================================================================================

/// Where an application is in the hiring pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Not yet looked at
    New,
    /// Screened by a recruiter
    Reviewed,
    /// Interview scheduled
    Interview,
    /// Declined
    Rejected,
    /// Offer accepted
    Hired,
}

impl ApplicationStatus {
    /// Database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewed => "reviewed",
            Self::Interview => "interview",
            Self::Rejected => "rejected",
            Self::Hired => "hired",
        }
    }

    /// Parse a stored or requested status
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for unknown values
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "new" => Ok(Self::New),
            "reviewed" => Ok(Self::Reviewed),
            "interview" => Ok(Self::Interview),
            "rejected" => Ok(Self::Rejected),
            "hired" => Ok(Self::Hired),
            other => Err(AppError::invalid_input(format!(
                "Invalid application status: {other}"
            ))),
        }
    }
}

/// Submitted job application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    /// Row id
    pub id: i64,
    /// Job applied for, if any
    pub job_id: Option<i64>,
    /// Title of that job, joined on read
    pub job_title: Option<String>,
    /// Applicant name
    pub name: String,
    /// Applicant email
    pub email: String,
    /// Applicant phone
    pub phone: Option<String>,
    /// Uploaded résumé location
    pub resume_path: Option<String>,
    /// Cover letter text
    pub cover_letter: Option<String>,
    /// `LinkedIn` profile
    pub linkedin_url: Option<String>,
    /// Portfolio link
    pub portfolio_url: Option<String>,
    /// Current employer
    pub current_employer: Option<String>,
    /// Years of experience
    pub years_experience: Option<i64>,
    /// Pipeline state
    pub status: ApplicationStatus,
    /// Submission time
    pub created_at: String,
}

/// Public application submission
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationInput {
    /// Job applied for
    pub job_id: Option<i64>,
    /// Applicant name
    pub name: String,
    /// Applicant email
    pub email: String,
    /// Applicant phone
    pub phone: Option<String>,
    /// Résumé location, when uploaded separately
    pub resume_path: Option<String>,
    /// Cover letter text
    pub cover_letter: Option<String>,
    /// `LinkedIn` profile
    pub linkedin_url: Option<String>,
    /// Portfolio link
    pub portfolio_url: Option<String>,
    /// Current employer
    pub current_employer: Option<String>,
    /// Years of experience
    pub years_experience: Option<i64>,
}

impl ApplicationInput {
    /// Reject submissions without a name or a plausible email
    ///
    /// # Errors
    ///
    /// Returns a missing-field or invalid-input error
    pub fn validate(&self) -> AppResult<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        if !self.email.contains('@') {
            return Err(AppError::invalid_input("Please provide a valid email address"));
        }
        if self.years_experience.is_some_and(|years| years < 0) {
            return Err(AppError::invalid_input("years_experience cannot be negative"));
        }
        Ok(())
    }
}

// ================================================================================================
// Contacts
// ================================================================================================

/// Inbox state of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    /// Unread
    New,
    /// Opened by an admin
    Read,
    /// Answered
    Replied,
}

impl ContactStatus {
    /// Database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }

    /// Parse a stored or requested status
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for unknown values
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            other => Err(AppError::invalid_input(format!(
                "Invalid contact status: {other}"
            ))),
        }
    }
}

/// Stored contact-form message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Row id
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender work email
    pub email: String,
    /// Subject line
    pub subject: Option<String>,
    /// Message body
    pub message: String,
    /// Sender company
    pub company: Option<String>,
    /// Sender phone
    pub phone: Option<String>,
    /// Inbox state
    pub status: ContactStatus,
    /// Submission time
    pub created_at: String,
}

/// Public contact-form submission, all fields arrive as text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactInput {
    /// Sender name
    pub name: String,
    /// Sender work email
    pub email: String,
    /// Sender company
    pub company: String,
    /// Sender phone
    pub phone: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

/// Contact message after validation and HTML encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedContact {
    /// Sender name
    pub name: String,
    /// Sender work email
    pub email: String,
    /// Sender company
    pub company: String,
    /// Sender phone
    pub phone: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

// ================================================================================================
// Services
// ================================================================================================

/// Section of the services page a service belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    /// "What do you need" cards
    Need,
    /// Consulting engagements
    Consulting,
    /// Industry solutions
    Industry,
    /// Platform products
    Platform,
}

impl ServiceCategory {
    /// Database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Need => "need",
            Self::Consulting => "consulting",
            Self::Industry => "industry",
            Self::Platform => "platform",
        }
    }

    /// Parse a stored or requested category
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for unknown values
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "need" => Ok(Self::Need),
            "consulting" => Ok(Self::Consulting),
            "industry" => Ok(Self::Industry),
            "platform" => Ok(Self::Platform),
            other => Err(AppError::invalid_input(format!(
                "Invalid service category: {other}"
            ))),
        }
    }
}

/// Service offering shown on the services page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    /// Row id
    pub id: i64,
    /// Page section
    pub category: ServiceCategory,
    /// Card title
    pub title: String,
    /// Card body
    pub description: String,
    /// Frontend icon identifier
    pub icon_name: Option<String>,
    /// Feature bullet list
    pub features: Vec<String>,
    /// Optional highlight bullets
    pub highlights: Option<Vec<String>>,
    /// Optional badge text
    pub badge: Option<String>,
    /// Sort key within a category
    pub display_order: i64,
    /// Shown publicly
    pub is_active: bool,
    /// Creation time
    pub created_at: String,
    /// Last update time
    pub updated_at: String,
}

/// Create or replace a service
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInput {
    /// Page section
    pub category: ServiceCategory,
    /// Card title
    pub title: String,
    /// Card body
    pub description: String,
    /// Frontend icon identifier
    #[serde(default)]
    pub icon_name: Option<String>,
    /// Feature bullet list
    #[serde(default)]
    pub features: Vec<String>,
    /// Optional highlight bullets
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
    /// Optional badge text
    #[serde(default)]
    pub badge: Option<String>,
    /// Sort key within a category
    #[serde(default)]
    pub display_order: i64,
    /// Shown publicly
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl ServiceInput {
    /// Reject blank required fields
    ///
    /// # Errors
    ///
    /// Returns a missing-field error naming the first blank field
    pub fn validate(&self) -> AppResult<()> {
        require("title", &self.title)?;
        require("description", &self.description)
    }
}

/// Category filter for public listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryQuery {
    /// Only return rows in this category
    pub category: Option<String>,
}

// ================================================================================================
// Documentation
// ================================================================================================

/// Default documentation category
pub const DEFAULT_DOC_CATEGORY: &str = "learning-center";

/// Documentation article listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Documentation {
    /// Row id
    pub id: i64,
    /// Article title
    pub title: String,
    /// Unique URL slug
    pub slug: String,
    /// Static HTML location
    pub file_path: String,
    /// Grouping, defaults to the learning center
    pub category: String,
    /// Short summary
    pub description: Option<String>,
    /// Sort key
    pub display_order: i64,
    /// Shown publicly
    pub is_active: bool,
    /// Creation time
    pub created_at: String,
    /// Last update time
    pub updated_at: String,
}

/// Create or replace a documentation entry
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentationInput {
    /// Article title
    pub title: String,
    /// Unique URL slug
    pub slug: String,
    /// Static HTML location
    pub file_path: String,
    /// Grouping
    #[serde(default)]
    pub category: Option<String>,
    /// Short summary
    #[serde(default)]
    pub description: Option<String>,
    /// Sort key
    #[serde(default)]
    pub display_order: i64,
    /// Shown publicly
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl DocumentationInput {
    /// Reject blank fields and slugs that are not URL-safe
    ///
    /// # Errors
    ///
    /// Returns a missing-field or invalid-input error
    pub fn validate(&self) -> AppResult<()> {
        require("title", &self.title)?;
        require("slug", &self.slug)?;
        require("file_path", &self.file_path)?;
        let slug_ok = self
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !slug_ok {
            return Err(AppError::invalid_input(
                "slug may only contain lowercase letters, digits and '-'",
            ));
        }
        Ok(())
    }

    /// Category to store, falling back to the default
    #[must_use]
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_DOC_CATEGORY)
    }
}

/// Learning center articles installed by `site-admin seed-content`
const LEARNING_CENTER: &[(&str, &str)] = &[
    ("API Security Best Practices", "api-security-best-practices"),
    ("AI in Cybersecurity", "ai-in-cybersecurity"),
    ("Zero Trust Security Architecture", "zero-trust-security"),
    ("DevSecOps Best Practices", "devsecops-best-practices"),
    ("Ransomware Defense Strategies", "ransomware-defense"),
    ("Supply Chain Security", "supply-chain-security"),
];

/// Default documentation index, one entry per static learning center page
#[must_use]
pub fn learning_center_catalog() -> Vec<DocumentationInput> {
    LEARNING_CENTER
        .iter()
        .zip(1_i64..)
        .map(|(&(title, slug), display_order)| DocumentationInput {
            title: title.to_owned(),
            slug: slug.to_owned(),
            file_path: format!("/resources/documentation/{slug}.html"),
            category: Some(DEFAULT_DOC_CATEGORY.to_owned()),
            description: None,
            display_order,
            is_active: true,
        })
        .collect()
}

// ================================================================================================
// Activity log
// ================================================================================================

/// Kind of admin action recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    /// Successful login
    Login,
    /// Row created
    Create,
    /// Row changed
    Update,
    /// Row removed
    Delete,
}

impl ActivityAction {
    /// Database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Kind of resource an admin action touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Admin account (logins)
    Admin,
    /// Job opening
    Job,
    /// Job application
    Application,
    /// Contact message
    Contact,
    /// Service entry
    Service,
    /// Documentation entry
    Documentation,
}

impl ResourceKind {
    /// Database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Job => "job",
            Self::Application => "application",
            Self::Contact => "contact",
            Self::Service => "service",
            Self::Documentation => "documentation",
        }
    }
}

/// Stored activity entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    /// Row id
    pub id: i64,
    /// Acting admin row id
    pub admin_id: Option<i64>,
    /// Acting admin name
    pub admin_username: String,
    /// Action performed
    pub action_type: String,
    /// Resource touched
    pub resource_type: String,
    /// Id of the resource touched
    pub resource_id: Option<i64>,
    /// JSON blob with method and path
    pub details: Option<String>,
    /// Client address
    pub ip_address: Option<String>,
    /// Client user agent
    pub user_agent: Option<String>,
    /// When it happened
    pub created_at: String,
}

/// Activity entry to record
#[derive(Debug, Clone)]
pub struct NewActivity {
    /// Acting admin name
    pub admin_username: String,
    /// Action performed
    pub action: ActivityAction,
    /// Resource touched
    pub resource: ResourceKind,
    /// Id of the resource touched
    pub resource_id: Option<i64>,
    /// Request method and path
    pub details: serde_json::Value,
    /// Client address
    pub ip_address: String,
    /// Client user agent
    pub user_agent: String,
}

/// Filters and paging for the activity listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
    /// Only this action
    pub action_type: Option<String>,
    /// Only this resource type
    pub resource_type: Option<String>,
    /// Only this admin
    pub admin_username: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub start_date: Option<String>,
    /// Inclusive upper bound on `created_at`
    pub end_date: Option<String>,
}

/// Page metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page
    pub page: i64,
    /// Page size
    pub limit: i64,
    /// Matching rows
    pub total: i64,
    /// Pages available
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// One page of activity entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPage {
    /// Entries, newest first
    pub logs: Vec<ActivityLog>,
    /// Page metadata
    pub pagination: Pagination,
}

/// Count of one action type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivityStat {
    /// Action performed
    pub action_type: String,
    /// Occurrences in the window
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_input_uses_type_key() {
        let input: JobInput = serde_json::from_value(serde_json::json!({
            "title": "Security Engineer",
            "department": "Engineering",
            "location": "Remote",
            "type": "Full-time",
            "description": "Build detections"
        }))
        .unwrap();
        assert_eq!(input.job_type, "Full-time");
        assert!(input.requirements.is_empty());
        assert!(input.is_active);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_job_input_rejects_blank_title() {
        let input: JobInput = serde_json::from_value(serde_json::json!({
            "title": " ",
            "department": "Engineering",
            "location": "Remote",
            "type": "Full-time",
            "description": "Build detections"
        }))
        .unwrap();
        assert!(input.validate().unwrap_err().message.contains("title"));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            ApplicationStatus::parse("interview").unwrap(),
            ApplicationStatus::Interview
        );
        assert!(ApplicationStatus::parse("ghosted").is_err());
        assert_eq!(ContactStatus::parse("replied").unwrap(), ContactStatus::Replied);
        assert!(ServiceCategory::parse("retail").is_err());
    }

    #[test]
    fn test_documentation_slug_rules() {
        let mut input = DocumentationInput {
            title: "Zero Trust".to_owned(),
            slug: "zero-trust-security".to_owned(),
            file_path: "/resources/documentation/zero-trust-security.html".to_owned(),
            category: None,
            description: None,
            display_order: 0,
            is_active: true,
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.category_or_default(), DEFAULT_DOC_CATEGORY);

        input.slug = "Zero Trust".to_owned();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_learning_center_catalog_is_valid_and_ordered() {
        let catalog = learning_center_catalog();
        assert_eq!(catalog.len(), 6);
        for (index, entry) in catalog.iter().enumerate() {
            assert!(entry.validate().is_ok(), "{} should validate", entry.slug);
            assert_eq!(entry.display_order, i64::try_from(index + 1).unwrap());
            assert!(entry.file_path.ends_with(&format!("{}.html", entry.slug)));
        }
    }

    #[test]
    fn test_pagination_serializes_total_pages_camel_case() {
        let json = serde_json::to_value(Pagination {
            page: 1,
            limit: 50,
            total: 0,
            total_pages: 0,
        })
        .unwrap();
        assert!(json.get("totalPages").is_some());
    }
}
