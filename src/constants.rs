// ABOUTME: Application constants for environment variable names, defaults and limits
// ABOUTME: Single place for values shared between config, validator, auth and routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! Constants module

/// Environment variable names
pub mod env_vars {
    /// Token signing secret
    pub const JWT_SECRET: &str = "JWT_SECRET";
    /// `SQLite` database file location
    pub const DATABASE_PATH: &str = "DATABASE_PATH";
    /// HTTP listen port
    pub const PORT: &str = "PORT";
    /// Listen address
    pub const HOST: &str = "HOST";
    /// Runtime mode, checked first
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Runtime mode, legacy name kept for existing deployments
    pub const NODE_ENV: &str = "NODE_ENV";
    /// Allowed cross-origin caller(s), comma separated
    pub const CORS_ORIGIN: &str = "CORS_ORIGIN";
    /// Session token lifetime in hours
    pub const JWT_EXPIRY_HOURS: &str = "JWT_EXPIRY_HOURS";
    /// Built frontend directory served in production
    pub const STATIC_DIR: &str = "STATIC_DIR";
}

/// Default values applied when a variable is unset
pub mod defaults {
    /// Default database file, relative to the working directory
    pub const DATABASE_PATH: &str = "./data/database.sqlite";
    /// Default HTTP port
    pub const PORT: &str = "5001";
    /// Default listen address
    pub const HOST: &str = "0.0.0.0";
    /// Default session lifetime
    pub const JWT_EXPIRY_HOURS: i64 = 24;
    /// Default frontend build directory
    pub const STATIC_DIR: &str = "./dist";
    /// Default admin username used by the CLI
    pub const ADMIN_USERNAME: &str = "admin";
}

/// Signing secret policy
pub mod secret_policy {
    /// Minimum secret length in production, fatal below this
    pub const PRODUCTION_MIN_LENGTH: usize = 32;
    /// Recommended minimum outside production, warning below this
    pub const DEVELOPMENT_MIN_LENGTH: usize = 16;
    /// Substrings that mark a guessable secret (matched case-insensitively)
    pub const WEAK_PATTERNS: &[&str] = &[
        "secret",
        "password",
        "admin",
        "123456",
        "test",
        "development",
        "fallback",
    ];
    /// Length of secrets produced by `site-admin generate-secret`
    pub const GENERATED_LENGTH: usize = 64;
}

/// Network limits
pub mod network {
    /// Ports below this need elevated privileges on Unix-like systems
    pub const PRIVILEGED_PORT_CEILING: u16 = 1024;
    /// Request timeout for all routes
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Maximum accepted request body
    pub const MAX_BODY_BYTES: usize = 1024 * 1024;
}

/// Password hashing
pub mod hashing {
    /// bcrypt work factor for admin passwords
    pub const BCRYPT_COST: u32 = 10;
    /// Length of generated admin passwords
    pub const GENERATED_PASSWORD_LENGTH: usize = 20;
}

/// Contact form field limits, in characters
pub mod contact_limits {
    /// Name length bounds
    pub const NAME: (usize, usize) = (2, 100);
    /// Company length bounds
    pub const COMPANY: (usize, usize) = (2, 100);
    /// Subject length bounds
    pub const SUBJECT: (usize, usize) = (3, 200);
    /// Message length bounds
    pub const MESSAGE: (usize, usize) = (10, 5000);
    /// Email maximum length
    pub const EMAIL_MAX: usize = 254;
    /// Phone maximum length
    pub const PHONE_MAX: usize = 20;
}

/// Email domains rejected by the contact form
pub const PERSONAL_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
    "mail.com",
    "protonmail.com",
    "zoho.com",
    "yandex.com",
    "gmx.com",
    "inbox.com",
    "live.com",
    "msn.com",
    "me.com",
];

/// Activity log pagination
pub mod pagination {
    /// Default page size
    pub const DEFAULT_LIMIT: i64 = 50;
    /// Largest page size a caller may request
    pub const MAX_LIMIT: i64 = 200;
    /// Window used by the activity statistics endpoint
    pub const STATS_WINDOW_DAYS: i64 = 30;
}

/// Service identity used in logs
pub mod service_names {
    /// Server binary
    pub const SHIELD_SITE_SERVER: &str = "shield-site-server";
}
