// ABOUTME: Admin request authentication: bearer token verification and session extraction
// ABOUTME: Rejects with a generic 401 before any protected handler runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use crate::auth::{AuthError, AuthFailure, AuthManager};
use crate::models::{ActivityAction, NewActivity, ResourceKind};
use crate::resources::ServerResources;
use crate::utils::auth::extract_bearer_token_from_option;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, Method};
use std::convert::Infallible;
use std::sync::Arc;

/// Verifies the `Authorization` header on admin requests
#[derive(Clone, Debug)]
pub struct AdminAuthMiddleware {
    auth_manager: AuthManager,
}

impl AdminAuthMiddleware {
    /// Create new admin auth middleware
    #[must_use]
    pub const fn new(auth_manager: AuthManager) -> Self {
        Self { auth_manager }
    }

    /// Authenticate a request from its headers
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] if the header is missing, malformed,
    /// or carries a token that fails verification
    pub fn authenticate_request_with_headers(
        &self,
        headers: &HeaderMap,
    ) -> Result<AdminSession, AuthError> {
        let auth_header = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        self.authenticate_request(auth_header)
    }

    /// Authenticate a raw `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthorized`] if the header is missing, malformed,
    /// or carries a token that fails verification
    pub fn authenticate_request(&self, auth_header: Option<&str>) -> Result<AdminSession, AuthError> {
        tracing::debug!("Auth header provided: {}", auth_header.is_some());

        let token = extract_bearer_token_from_option(auth_header).map_err(|e| {
            let failure = AuthFailure::from(e);
            tracing::warn!(reason = %failure, "Admin request rejected: {e}");
            AuthError::Unauthorized(failure)
        })?;

        let claims = self.auth_manager.verify_token(token)?;
        Ok(AdminSession {
            username: claims.sub,
        })
    }
}

/// An authenticated admin, available to handlers that take it as an argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Token subject
    pub username: String,
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AdminSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        resources
            .auth_middleware
            .authenticate_request_with_headers(&parts.headers)
    }
}

/// Caller address and user agent for the activity log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// First `x-forwarded-for` hop, or "unknown"
    pub ip_address: String,
    /// `User-Agent` header, or "unknown"
    pub user_agent: String,
}

impl ClientInfo {
    /// Read client details from request headers
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let ip_address = read("x-forwarded-for")
            .and_then(|forwarded| forwarded.split(',').next())
            .map(str::trim)
            .or_else(|| read("x-real-ip"))
            .unwrap_or("unknown")
            .to_owned();
        let user_agent = read(header::USER_AGENT.as_str())
            .unwrap_or("unknown")
            .to_owned();

        Self {
            ip_address,
            user_agent,
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Authenticated admin request plus what the activity log records about it
#[derive(Debug, Clone)]
pub struct AdminRequest {
    /// Verified session
    pub session: AdminSession,
    /// Caller details
    pub client: ClientInfo,
    /// HTTP method
    pub method: Method,
    /// Request path
    pub path: String,
}

impl AdminRequest {
    /// Activity entry describing this request
    #[must_use]
    pub fn activity(
        &self,
        action: ActivityAction,
        resource: ResourceKind,
        resource_id: Option<i64>,
    ) -> NewActivity {
        NewActivity {
            admin_username: self.session.username.clone(),
            action,
            resource,
            resource_id,
            details: serde_json::json!({
                "method": self.method.as_str(),
                "path": self.path,
            }),
            ip_address: self.client.ip_address.clone(),
            user_agent: self.client.user_agent.clone(),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AdminRequest {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        let session = AdminSession::from_request_parts(parts, resources).await?;
        Ok(Self {
            session,
            client: ClientInfo::from_headers(&parts.headers),
            method: parts.method.clone(),
            path: parts.uri.path().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCD";

    #[test]
    fn test_missing_and_malformed_headers() {
        let middleware = AdminAuthMiddleware::new(AuthManager::new(SECRET, 24));

        let missing = middleware.authenticate_request(None).unwrap_err();
        assert_eq!(missing.failure(), Some(AuthFailure::MissingHeader));

        let basic = middleware.authenticate_request(Some("Basic abc")).unwrap_err();
        assert_eq!(basic.failure(), Some(AuthFailure::MalformedHeader));

        let garbage = middleware
            .authenticate_request(Some("Bearer garbage"))
            .unwrap_err();
        assert_eq!(garbage.failure(), Some(AuthFailure::MalformedToken));
    }

    #[test]
    fn test_valid_token_yields_subject() {
        let manager = AuthManager::new(SECRET, 24);
        let issued = manager.issue_token("admin").unwrap();
        let middleware = AdminAuthMiddleware::new(manager);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", issued.token)).unwrap(),
        );
        let session = middleware.authenticate_request_with_headers(&headers).unwrap();
        assert_eq!(session.username, "admin");
    }

    #[test]
    fn test_client_info_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.0"));
        let info = ClientInfo::from_headers(&headers);
        assert_eq!(info.ip_address, "203.0.113.7");
        assert_eq!(info.user_agent, "curl/8.0");

        let empty = ClientInfo::from_headers(&HeaderMap::new());
        assert_eq!(empty.ip_address, "unknown");
    }
}
