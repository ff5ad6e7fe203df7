// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, runtime mode and listener settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! Environment-based configuration, parsed once at startup and passed
//! explicitly to everything that needs it.

use crate::constants::{defaults, env_vars};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Runtime mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed site
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Why a port value was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// Value is not an integer
    #[error("PORT must be a number, got \"{0}\"")]
    NotANumber(String),
    /// Value is an integer outside 1-65535
    #[error("PORT must be between 1 and 65535, got {0}")]
    OutOfRange(i64),
}

/// Parse a port value the way the listener and validator both expect
///
/// # Errors
///
/// Returns [`PortError`] when the value is not an integer in 1-65535
pub fn parse_port(raw: &str) -> Result<u16, PortError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| PortError::NotANumber(trimmed.to_owned()))?;

    u16::try_from(value)
        .ok()
        .filter(|port| *port > 0)
        .ok_or(PortError::OutOfRange(value))
}

/// Server configuration
#[derive(Clone, Serialize)]
pub struct ServerConfig {
    /// Runtime mode
    pub environment: Environment,
    /// Token signing secret, absent when unset or empty
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
    /// Session token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// `SQLite` database file path
    pub database_path: String,
    /// Listen port exactly as configured; checked by the validator
    pub port: String,
    /// Listen address
    pub host: String,
    /// Allowed cross-origin caller(s), comma separated
    pub cors_origin: Option<String>,
    /// Built frontend served in production
    pub static_dir: PathBuf,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("environment", &self.environment)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("database_path", &self.database_path)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("cors_origin", &self.cors_origin)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// Binaries load `.env` before calling this so logging sees it too.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    ///
    /// Empty values are treated as unset so `PORT=` falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        let environment = get(env_vars::ENVIRONMENT)
            .or_else(|| get(env_vars::NODE_ENV))
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let jwt_expiry_hours = get(env_vars::JWT_EXPIRY_HOURS)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|hours| *hours > 0)
            .unwrap_or(defaults::JWT_EXPIRY_HOURS);

        Self {
            environment,
            jwt_secret: get(env_vars::JWT_SECRET),
            jwt_expiry_hours,
            database_path: get_or(env_vars::DATABASE_PATH, defaults::DATABASE_PATH),
            port: get_or(env_vars::PORT, defaults::PORT),
            host: get_or(env_vars::HOST, defaults::HOST),
            cors_origin: get(env_vars::CORS_ORIGIN),
            static_dir: PathBuf::from(get_or(env_vars::STATIC_DIR, defaults::STATIC_DIR)),
        }
    }

    /// Parsed listen port
    ///
    /// # Errors
    ///
    /// Returns [`PortError`] if the configured port is invalid; the validator
    /// reports the same condition as fatal before the listener is built
    pub fn http_port(&self) -> Result<u16, PortError> {
        parse_port(&self.port)
    }

    /// Connection string for the configured database file
    #[must_use]
    pub fn database_url(&self) -> String {
        if self.database_path.starts_with("sqlite:") {
            self.database_path.clone()
        } else {
            format!("sqlite:{}", self.database_path)
        }
    }

    /// Explicitly allowed origins, empty when any origin is accepted
    #[must_use]
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_origin
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty() && *origin != "*")
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// One-line summary for the startup log, never includes the secret
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} port={} database={} cors={} token_ttl={}h",
            self.environment,
            self.port,
            self.database_path,
            self.cors_origin.as_deref().unwrap_or("*"),
            self.jwt_expiry_hours
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.jwt_secret.is_none());
        assert_eq!(config.database_path, defaults::DATABASE_PATH);
        assert_eq!(config.port, "5001");
        assert_eq!(config.jwt_expiry_hours, 24);
        assert!(config.cors_origin.is_none());
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = config_from(&[("PORT", ""), ("JWT_SECRET", "  ")]);
        assert_eq!(config.port, "5001");
        assert!(config.jwt_secret.is_none());
    }

    #[test]
    fn test_environment_prefers_environment_over_node_env() {
        let config = config_from(&[("ENVIRONMENT", "production"), ("NODE_ENV", "development")]);
        assert!(config.environment.is_production());

        let legacy = config_from(&[("NODE_ENV", "production")]);
        assert!(legacy.environment.is_production());
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str_or_default("PRODUCTION"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("5001"), Ok(5001));
        assert_eq!(parse_port(" 80 "), Ok(80));
        assert_eq!(parse_port("65535"), Ok(65535));
        assert_eq!(parse_port("0"), Err(PortError::OutOfRange(0)));
        assert_eq!(parse_port("70000"), Err(PortError::OutOfRange(70000)));
        assert_eq!(parse_port("-1"), Err(PortError::OutOfRange(-1)));
        assert!(matches!(parse_port("abc"), Err(PortError::NotANumber(_))));
    }

    #[test]
    fn test_allowed_origins() {
        let config = config_from(&[("CORS_ORIGIN", "https://a.example, https://b.example,")]);
        assert_eq!(
            config.allowed_origins(),
            vec!["https://a.example".to_owned(), "https://b.example".to_owned()]
        );
        assert!(config_from(&[("CORS_ORIGIN", "*")]).allowed_origins().is_empty());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = config_from(&[("JWT_SECRET", "super-private-signing-material")]);
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-private"));
        assert!(debug.contains("REDACTED"));
        assert!(!config.summary().contains("super-private"));
    }

    #[test]
    fn test_database_url() {
        let config = config_from(&[("DATABASE_PATH", "./data/site.sqlite")]);
        assert_eq!(config.database_url(), "sqlite:./data/site.sqlite");
    }
}
