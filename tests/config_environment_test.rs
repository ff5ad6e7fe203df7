// ABOUTME: Tests reading configuration from real process environment variables
// ABOUTME: Serialized because they mutate process-global state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use shield_site_server::config::{Environment, ServerConfig};
use shield_site_server::constants::env_vars;
use shield_site_server::logging::LoggingConfig;
use std::env;

const ALL_VARS: &[&str] = &[
    env_vars::JWT_SECRET,
    env_vars::DATABASE_PATH,
    env_vars::PORT,
    env_vars::HOST,
    env_vars::ENVIRONMENT,
    env_vars::NODE_ENV,
    env_vars::CORS_ORIGIN,
    env_vars::JWT_EXPIRY_HOURS,
    env_vars::STATIC_DIR,
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = ServerConfig::from_env();
    assert_eq!(config.environment, Environment::Development);
    assert!(config.jwt_secret.is_none());
    assert_eq!(config.port, "5001");
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.database_path, "./data/database.sqlite");
    assert_eq!(config.jwt_expiry_hours, 24);
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_env();
    env::set_var(env_vars::NODE_ENV, "production");
    env::set_var(env_vars::JWT_SECRET, "from-the-environment-0123456789abc");
    env::set_var(env_vars::PORT, "8080");
    env::set_var(env_vars::CORS_ORIGIN, "https://shield.example");
    env::set_var(env_vars::JWT_EXPIRY_HOURS, "8");

    let config = ServerConfig::from_env();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(
        config.jwt_secret.as_deref(),
        Some("from-the-environment-0123456789abc")
    );
    assert_eq!(config.http_port().unwrap(), 8080);
    assert_eq!(config.allowed_origins(), vec!["https://shield.example".to_owned()]);
    assert_eq!(config.jwt_expiry_hours, 8);

    clear_env();
}

#[test]
#[serial]
fn test_from_env_ignores_invalid_expiry() {
    clear_env();
    env::set_var(env_vars::JWT_EXPIRY_HOURS, "forever");
    assert_eq!(ServerConfig::from_env().jwt_expiry_hours, 24);
    env::set_var(env_vars::JWT_EXPIRY_HOURS, "-3");
    assert_eq!(ServerConfig::from_env().jwt_expiry_hours, 24);
    clear_env();
}

#[test]
#[serial]
fn test_logging_detail_follows_environment_parsing() {
    clear_env();
    env::remove_var("LOG_INCLUDE_LOCATION");
    env::remove_var("LOG_INCLUDE_THREAD");

    for production in ["Prod", "PRODUCTION", "prod"] {
        env::set_var(env_vars::ENVIRONMENT, production);
        let logging = LoggingConfig::from_env();
        assert!(logging.include_location, "{production}");
        assert!(logging.include_thread, "{production}");
    }

    env::set_var(env_vars::ENVIRONMENT, "");
    env::set_var(env_vars::NODE_ENV, "prod");
    assert!(LoggingConfig::from_env().include_location);

    env::set_var(env_vars::ENVIRONMENT, "development");
    assert!(!LoggingConfig::from_env().include_location);

    clear_env();
}
