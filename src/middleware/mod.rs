// ABOUTME: HTTP middleware for admin authentication and cross-origin policy
// ABOUTME: Provides the admin request extractors and the CORS layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

pub mod auth;
pub mod cors;

// Authentication middleware
pub use auth::{AdminAuthMiddleware, AdminRequest, AdminSession, ClientInfo};

// CORS configuration
pub use cors::setup_cors;
