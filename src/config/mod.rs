// ABOUTME: Configuration management module for server settings and startup validation
// ABOUTME: Parses the environment once and checks it before anything binds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! Configuration module
//!
//! - **Environment**: [`ServerConfig`] parsed from environment variables
//! - **Validation**: [`EnvironmentValidator`] startup checks producing a
//!   [`ValidationReport`] or an aggregate [`ConfigError`]

/// Environment and server configuration
pub mod environment;
/// Startup configuration validation
pub mod validation;

pub use environment::{parse_port, Environment, PortError, ServerConfig};
pub use validation::{
    ConfigError, ConfigProblem, ConfigWarning, EnvironmentValidator, Platform, ValidationReport,
};
