// ABOUTME: CORS middleware configuration for the public and admin API
// ABOUTME: Production allows only configured origins, other modes allow any origin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

use crate::config::ServerConfig;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS settings for the site API
///
/// In production the comma-separated `CORS_ORIGIN` list is the whole allow
/// list; an unset or wildcard value allows no cross-origin caller (the
/// validator warns about this at startup). Development and testing allow
/// any origin so a local frontend dev server can reach the API.
///
/// Credentials are never allowed; the admin token travels in the
/// `Authorization` header, not in cookies.
///
/// # Examples
///
/// ```bash
/// export ENVIRONMENT=production
/// export CORS_ORIGIN="https://www.example.com,https://example.com"
/// ```
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let allow_origin = if config.environment.is_production() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins()
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        AllowOrigin::list(origins)
    } else {
        AllowOrigin::any()
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}
