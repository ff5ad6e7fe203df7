// ABOUTME: Bearer token extraction from the Authorization header
// ABOUTME: Shared by the admin session extractor and its tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use thiserror::Error;

/// Why a bearer token could not be taken from a header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    /// No `Authorization` header was sent
    #[error("Missing authorization header")]
    Missing,
    /// Header is not of the form `Bearer <token>`
    #[error("Invalid authorization header format")]
    InvalidFormat,
    /// Header is `Bearer` followed only by whitespace
    #[error("Empty bearer token")]
    Empty,
}

/// Extract bearer token from Authorization header string
///
/// # Errors
///
/// Returns an error if:
/// - Authorization header doesn't start with "Bearer "
/// - Token is empty after extraction and trimming
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, BearerError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(BearerError::InvalidFormat)?
        .trim();

    if token.is_empty() {
        return Err(BearerError::Empty);
    }

    Ok(token)
}

/// Extract bearer token from optional Authorization header
///
/// # Errors
///
/// Returns an error if the header is missing, malformed or empty
pub fn extract_bearer_token_from_option(auth_header: Option<&str>) -> Result<&str, BearerError> {
    extract_bearer_token(auth_header.ok_or(BearerError::Missing)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token_valid() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Ok("abc123"));
    }

    #[test]
    fn test_extract_bearer_token_with_whitespace() {
        assert_eq!(extract_bearer_token("Bearer   abc123   "), Ok("abc123"));
    }

    #[test]
    fn test_extract_bearer_token_invalid_prefix() {
        assert_eq!(
            extract_bearer_token("Basic abc123"),
            Err(BearerError::InvalidFormat)
        );
        assert_eq!(extract_bearer_token("abc123"), Err(BearerError::InvalidFormat));
        assert_eq!(
            extract_bearer_token("bearer abc123"),
            Err(BearerError::InvalidFormat)
        );
    }

    #[test]
    fn test_extract_bearer_token_empty_token() {
        assert_eq!(extract_bearer_token("Bearer "), Err(BearerError::Empty));
        assert_eq!(extract_bearer_token("Bearer   "), Err(BearerError::Empty));
    }

    #[test]
    fn test_extract_bearer_token_from_option() {
        assert_eq!(
            extract_bearer_token_from_option(Some("Bearer abc123")),
            Ok("abc123")
        );
        assert_eq!(
            extract_bearer_token_from_option(None),
            Err(BearerError::Missing)
        );
    }
}
