// ABOUTME: Main library entry point for the Shield marketing site backend
// ABOUTME: Exposes configuration, admin auth gate, content storage and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

#![deny(unsafe_code)]

//! # Shield Site Server
//!
//! Backend for the Shield marketing site. It serves public content (jobs,
//! services, documentation), accepts contact and job-application
//! submissions, and protects the admin surface behind a username/password
//! login that issues short-lived bearer tokens.
//!
//! ## Startup order
//!
//! 1. [`config::ServerConfig`] is parsed once from the environment.
//! 2. [`config::EnvironmentValidator`] checks it and either returns a
//!    [`config::ValidationReport`] or an aggregate [`config::ConfigError`].
//! 3. The [`database::Database`] is opened and its schema bootstrapped.
//! 4. [`server::build_router`] assembles the routes and the listener binds.

/// Admin auth gate: password login and bearer token verification
pub mod auth;

/// Configuration parsing and startup validation
pub mod config;

/// Environment variable names, defaults and fixed limits
pub mod constants;

/// `SQLite` storage for admins and site content
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware: admin session extraction and CORS
pub mod middleware;

/// Domain models shared by storage and routes
pub mod models;

/// Shared server state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Security response headers
pub mod security;

/// Router assembly and listener lifecycle
pub mod server;

/// Small helpers for header parsing and input sanitizing
pub mod utils;

/// Public form validation
pub mod validation;
