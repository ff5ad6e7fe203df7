// ABOUTME: Startup environment validator for signing secret, storage path, port and CORS
// ABOUTME: Runs every check, aggregates fatal problems and keeps warnings non-fatal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! Environment validation
//!
//! The validator runs exactly once before the listener is built. All four
//! checks always run so operators see every problem in one pass. Any fatal
//! problem turns into a single [`ConfigError`]; warnings are logged and
//! returned in the [`ValidationReport`].

use super::environment::{parse_port, PortError, ServerConfig};
use crate::constants::{network, secret_policy};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

/// Host platform, relevant for the privileged-port check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux, macOS and other Unix-likes
    Unix,
    /// Windows has no privileged port range
    Windows,
}

impl Platform {
    /// Platform this binary was compiled for
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// Non-fatal configuration finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Production secret contains a guessable substring
    WeakSecretPattern(&'static str),
    /// Development secret is shorter than recommended
    ShortSecret {
        /// Secret length in characters
        length: usize,
    },
    /// Storage path escapes the working directory or is absolute
    StoragePathOutsideProject(String),
    /// Port needs elevated privileges
    PrivilegedPort(u16),
    /// Production accepts requests from any origin
    PermissiveCors,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeakSecretPattern(pattern) => write!(
                f,
                "JWT_SECRET contains the weak pattern \"{pattern}\"; use a randomly generated secret"
            ),
            Self::ShortSecret { length } => write!(
                f,
                "JWT_SECRET is {length} characters; at least {} is recommended",
                secret_policy::DEVELOPMENT_MIN_LENGTH
            ),
            Self::StoragePathOutsideProject(path) => write!(
                f,
                "DATABASE_PATH \"{path}\" is absolute or contains '..'; make sure it points where you expect"
            ),
            Self::PrivilegedPort(port) => write!(
                f,
                "PORT {port} is below {} and may require elevated privileges",
                network::PRIVILEGED_PORT_CEILING
            ),
            Self::PermissiveCors => write!(
                f,
                "CORS_ORIGIN is unset or \"*\" in production; any site may call the API"
            ),
        }
    }
}

/// Fatal configuration finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    /// `JWT_SECRET` is unset or empty
    MissingSecret,
    /// Production secret is below the minimum length
    ShortProductionSecret {
        /// Secret length in characters
        length: usize,
    },
    /// `PORT` is not a valid port number
    InvalidPort(PortError),
}

impl fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSecret => write!(f, "JWT_SECRET environment variable is required"),
            Self::ShortProductionSecret { length } => write!(
                f,
                "JWT_SECRET must be at least {} characters in production (got {length})",
                secret_policy::PRODUCTION_MIN_LENGTH
            ),
            Self::InvalidPort(err) => write!(f, "{err}"),
        }
    }
}

/// Aggregate of every fatal problem found in one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ConfigError {
    /// Problems in check order, never empty
    pub problems: Vec<ConfigProblem>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment validation failed")?;
        for (index, problem) in self.problems.iter().enumerate() {
            write!(f, "\n  {}. {problem}", index + 1)?;
        }
        Ok(())
    }
}

/// Successful validation outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Non-fatal findings in check order
    pub warnings: Vec<ConfigWarning>,
    /// Validated listen port
    pub port: u16,
}

#[derive(Default)]
struct Findings {
    problems: Vec<ConfigProblem>,
    warnings: Vec<ConfigWarning>,
}

/// Validates a [`ServerConfig`] before the server starts
pub struct EnvironmentValidator<'a> {
    config: &'a ServerConfig,
    platform: Platform,
}

impl<'a> EnvironmentValidator<'a> {
    /// Validator for the current platform
    #[must_use]
    pub const fn new(config: &'a ServerConfig) -> Self {
        Self {
            config,
            platform: Platform::current(),
        }
    }

    /// Override the platform used by the privileged-port check
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Run every check
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] listing every fatal problem when at least one
    /// check failed. Warnings never cause an error.
    pub fn validate(&self) -> Result<ValidationReport, ConfigError> {
        info!("Validating environment configuration");

        let mut findings = Findings::default();
        self.check_signing_secret(&mut findings);
        self.check_storage_path(&mut findings);
        let port = self.check_port(&mut findings);
        self.check_cors(&mut findings);

        for warning in &findings.warnings {
            warn!("{warning}");
        }

        match port {
            Some(port) if findings.problems.is_empty() => {
                info!(
                    warnings = findings.warnings.len(),
                    "Environment validation passed"
                );
                Ok(ValidationReport {
                    warnings: findings.warnings,
                    port,
                })
            }
            _ => {
                for (index, problem) in findings.problems.iter().enumerate() {
                    error!("{}. {problem}", index + 1);
                }
                error!("Environment validation failed");
                Err(ConfigError {
                    problems: findings.problems,
                })
            }
        }
    }

    fn check_signing_secret(&self, findings: &mut Findings) {
        let Some(secret) = self.config.jwt_secret.as_deref() else {
            findings.problems.push(ConfigProblem::MissingSecret);
            return;
        };

        let length = secret.chars().count();
        if self.config.environment.is_production() {
            if length < secret_policy::PRODUCTION_MIN_LENGTH {
                findings
                    .problems
                    .push(ConfigProblem::ShortProductionSecret { length });
                return;
            }

            let lowered = secret.to_lowercase();
            findings.warnings.extend(
                secret_policy::WEAK_PATTERNS
                    .iter()
                    .copied()
                    .filter(|pattern| lowered.contains(*pattern))
                    .map(ConfigWarning::WeakSecretPattern),
            );
        } else if length < secret_policy::DEVELOPMENT_MIN_LENGTH {
            findings.warnings.push(ConfigWarning::ShortSecret { length });
        }
    }

    fn check_storage_path(&self, findings: &mut Findings) {
        let path = self.config.database_path.as_str();
        if path.contains("..") || path.starts_with('/') || Path::new(path).is_absolute() {
            findings
                .warnings
                .push(ConfigWarning::StoragePathOutsideProject(path.to_owned()));
        }
    }

    fn check_port(&self, findings: &mut Findings) -> Option<u16> {
        match parse_port(&self.config.port) {
            Ok(port) => {
                if port < network::PRIVILEGED_PORT_CEILING && self.platform != Platform::Windows {
                    findings.warnings.push(ConfigWarning::PrivilegedPort(port));
                }
                Some(port)
            }
            Err(err) => {
                findings.problems.push(ConfigProblem::InvalidPort(err));
                None
            }
        }
    }

    fn check_cors(&self, findings: &mut Findings) {
        if !self.config.environment.is_production() {
            return;
        }
        let permissive = self
            .config
            .cors_origin
            .as_deref()
            .map_or(true, |origin| origin.trim().is_empty() || origin.trim() == "*");
        if permissive {
            findings.warnings.push(ConfigWarning::PermissiveCors);
        }
    }
}
