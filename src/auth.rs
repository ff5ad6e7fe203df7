// ABOUTME: Admin auth gate: password login and HS256 session token issue/verify
// ABOUTME: Every failure surfaces as one generic error while the precise reason is logged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! # Authentication and Session Tokens
//!
//! Login checks a username/password pair against the stored bcrypt hash and
//! issues a signed token `{sub, iat, exp}`. Protected requests present that
//! token as `Authorization: Bearer <token>`; it is checked for signature and
//! expiry on every request. Nothing is persisted server-side.
//!
//! Callers only ever see "invalid credentials" or "unauthorized". The exact
//! reason is carried in an [`AuthFailure`] tag for logs.

use crate::constants::hashing::BCRYPT_COST;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::utils::auth::BearerError;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Precise reason an authentication attempt failed, for logs only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Username or password was blank
    EmptyCredentials,
    /// No admin with that username
    UnknownUser,
    /// Password did not match the stored hash
    WrongPassword,
    /// No `Authorization` header
    MissingHeader,
    /// Header present but not `Bearer <token>`
    MalformedHeader,
    /// Token signed with another secret or tampered with
    BadSignature,
    /// Token expiry has passed
    Expired,
    /// Token is not a decodable JWT
    MalformedToken,
}

impl AuthFailure {
    /// Short tag used in log lines
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyCredentials => "empty_credentials",
            Self::UnknownUser => "unknown_user",
            Self::WrongPassword => "wrong_password",
            Self::MissingHeader => "missing_header",
            Self::MalformedHeader => "malformed_header",
            Self::BadSignature => "bad_signature",
            Self::Expired => "expired",
            Self::MalformedToken => "malformed_token",
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BearerError> for AuthFailure {
    fn from(error: BearerError) -> Self {
        match error {
            BearerError::Missing => Self::MissingHeader,
            BearerError::InvalidFormat | BearerError::Empty => Self::MalformedHeader,
        }
    }
}

/// Authentication error as seen by API callers
///
/// Display output never depends on the wrapped [`AuthFailure`].
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login rejected
    #[error("Invalid credentials")]
    InvalidCredentials(AuthFailure),
    /// Request authorization rejected
    #[error("Unauthorized")]
    Unauthorized(AuthFailure),
    /// Storage or hashing failed while checking credentials
    #[error(transparent)]
    Backend(#[from] AppError),
}

impl AuthError {
    /// Internal reason, if this is a rejection
    #[must_use]
    pub const fn failure(&self) -> Option<AuthFailure> {
        match self {
            Self::InvalidCredentials(failure) | Self::Unauthorized(failure) => Some(*failure),
            Self::Backend(_) => None,
        }
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Backend(inner) => inner,
            rejection => Self::auth_invalid(rejection.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

/// Session token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin username
    pub sub: String,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

impl Claims {
    /// Expiry as a timestamp
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT
    pub token: String,
    /// Claims embedded in the token
    pub claims: Claims,
}

/// Issues and verifies HS256 session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager")
            .field("keys", &"[REDACTED]")
            .field("token_expiry_hours", &self.token_expiry_hours)
            .finish()
    }
}

impl AuthManager {
    /// Create a manager signing with `secret`; lifetimes below one hour are raised to one
    #[must_use]
    pub fn new(secret: &str, token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_hours: token_expiry_hours.max(1),
        }
    }

    /// Configured token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Sign a token for `username` issued now
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn issue_token(&self, username: &str) -> AppResult<IssuedToken> {
        self.issue_token_at(username, Utc::now())
    }

    /// Sign a token for `username` as if issued at `issued_at`
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn issue_token_at(&self, username: &str, issued_at: DateTime<Utc>) -> AppResult<IssuedToken> {
        let expiry = issued_at + Duration::hours(self.token_expiry_hours);
        let claims = Claims {
            sub: username.to_owned(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify signature and expiry against the current time
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] for any bad, tampered or expired token
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_token_at(token, Utc::now())
    }

    /// Verify signature and require `now` to precede the token's expiry
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] for any bad, tampered or expired token
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the caller's clock
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let failure = Self::convert_jwt_error(&e);
                warn!(reason = %failure, "Session token rejected: {e}");
                AuthError::Unauthorized(failure)
            })?;

        if now.timestamp() >= claims.exp {
            warn!(
                reason = %AuthFailure::Expired,
                subject = %claims.sub,
                "Session token expired at {}",
                claims
                    .expires_at()
                    .map_or_else(|| claims.exp.to_string(), |at| at.to_rfc3339())
            );
            return Err(AuthError::Unauthorized(AuthFailure::Expired));
        }

        debug!(subject = %claims.sub, "Session token verified");
        Ok(claims)
    }

    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> AuthFailure {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidSignature => AuthFailure::BadSignature,
            ErrorKind::ExpiredSignature => AuthFailure::Expired,
            _ => AuthFailure::MalformedToken,
        }
    }

    /// Check a username/password pair and issue a token on success
    ///
    /// Unknown usernames and wrong passwords produce the same error. The
    /// bcrypt comparison runs on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any mismatch and
    /// [`AuthError::Backend`] if storage or hashing fails
    pub async fn login(
        &self,
        database: &Database,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, AuthError> {
        if username.is_empty() || password.is_empty() {
            warn!(reason = %AuthFailure::EmptyCredentials, "Login rejected");
            return Err(AuthError::InvalidCredentials(AuthFailure::EmptyCredentials));
        }

        let Some(admin) = database.get_admin_by_username(username).await? else {
            warn!(reason = %AuthFailure::UnknownUser, username, "Login rejected");
            return Err(AuthError::InvalidCredentials(AuthFailure::UnknownUser));
        };

        let password = password.to_owned();
        let password_hash = admin.password_hash;
        let is_valid = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            warn!(reason = %AuthFailure::WrongPassword, username, "Login rejected");
            return Err(AuthError::InvalidCredentials(AuthFailure::WrongPassword));
        }

        let issued = self.issue_token(&admin.username)?;
        tracing::info!(username = %admin.username, "Admin logged in");
        Ok(issued)
    }
}

/// bcrypt-hash a password for storage
///
/// # Errors
///
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Random alphanumeric string for secrets and generated passwords
#[must_use]
pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
