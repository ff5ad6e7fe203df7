// ABOUTME: Contact form validation with per-field error reporting
// ABOUTME: Enforces length limits, phone charset and the work-email rule before encoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! # Contact Form Validation
//!
//! Every field is checked and every failing field is reported, so the
//! frontend can mark all of them at once. Accepted input is trimmed and
//! HTML-encoded into a [`SanitizedContact`].

use crate::constants::{contact_limits, PERSONAL_EMAIL_DOMAINS};
use crate::errors::AppError;
use crate::models::{ContactInput, SanitizedContact};
use crate::utils::html::sanitize_text;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One failed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Request field name
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

/// All field failures of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Whether `field` failed
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::invalid_input("Validation failed")
            .with_details(serde_json::to_value(errors.0).unwrap_or_default())
    }
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").ok())
        .as_ref()
}

/// Syntactic email check
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= contact_limits::EMAIL_MAX && email_pattern().is_some_and(|re| re.is_match(email))
}

/// Whether the address belongs to a free consumer mail provider
#[must_use]
pub fn is_personal_email(email: &str) -> bool {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_ascii_lowercase())
        .is_some_and(|domain| PERSONAL_EMAIL_DOMAINS.contains(&domain.as_str()))
}

fn is_valid_phone(phone: &str) -> bool {
    phone.chars().count() <= contact_limits::PHONE_MAX
        && phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')'))
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &str,
    label: &str,
    value: &str,
    (min, max): (usize, usize),
) {
    let length = value.chars().count();
    if length == 0 {
        errors.push(FieldError::new(field, format!("{label} is required")));
    } else if length < min || length > max {
        errors.push(FieldError::new(
            field,
            format!("{label} must be between {min} and {max} characters"),
        ));
    }
}

/// Validate a contact submission and encode it for storage
///
/// # Errors
///
/// Returns every failing field
pub fn validate_contact(input: &ContactInput) -> Result<SanitizedContact, ValidationErrors> {
    let name = input.name.trim();
    let email = input.email.trim();
    let company = input.company.trim();
    let phone = input.phone.trim();
    let subject = input.subject.trim();
    let message = input.message.trim();

    let mut errors = Vec::new();

    check_length(&mut errors, "name", "Name", name, contact_limits::NAME);

    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Please provide a valid email address"));
    } else if is_personal_email(email) {
        errors.push(FieldError::new(
            "email",
            "Please use your work email address. Personal email addresses (Gmail, Yahoo, etc.) are not allowed.",
        ));
    }

    check_length(
        &mut errors,
        "company",
        "Company name",
        company,
        contact_limits::COMPANY,
    );

    if phone.is_empty() {
        errors.push(FieldError::new("phone", "Phone number is required"));
    } else if !is_valid_phone(phone) {
        errors.push(FieldError::new("phone", "Please provide a valid phone number"));
    }

    check_length(&mut errors, "subject", "Subject", subject, contact_limits::SUBJECT);
    check_length(&mut errors, "message", "Message", message, contact_limits::MESSAGE);

    if !errors.is_empty() {
        tracing::debug!(fields = errors.len(), "Contact submission failed validation");
        return Err(ValidationErrors(errors));
    }

    Ok(SanitizedContact {
        name: sanitize_text(name),
        email: sanitize_text(email),
        company: sanitize_text(company),
        phone: sanitize_text(phone),
        subject: sanitize_text(subject),
        message: sanitize_text(message),
    })
}
