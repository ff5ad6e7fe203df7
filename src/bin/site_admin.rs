// ABOUTME: Administrative CLI for the Shield site: admin credentials, seed content and env checks
// ABOUTME: Talks to the same SQLite database and configuration as the server binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! Operator commands that do not belong on the HTTP surface.
//!
//! Usage:
//! ```bash
//! # Create or reset the admin account, printing a generated password
//! cargo run --bin site-admin -- reset-admin --username admin
//!
//! # Reset with an explicit password
//! cargo run --bin site-admin -- reset-admin --username admin --password 'correct horse battery'
//!
//! # Replace the documentation index with the learning center catalog
//! cargo run --bin site-admin -- seed-content
//!
//! # Print a value suitable for JWT_SECRET
//! cargo run --bin site-admin -- generate-secret
//!
//! # Validate the current environment without starting the server
//! cargo run --bin site-admin -- check-env
//! ```

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use shield_site_server::{
    auth::{generate_random_string, hash_password},
    config::{EnvironmentValidator, ServerConfig},
    constants::{defaults, hashing, secret_policy},
    database::Database,
    logging::LoggingConfig,
    models::learning_center_catalog,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "site-admin",
    about = "Shield site administration",
    long_about = "Manage the admin account, seed site content and check the server environment."
)]
struct SiteAdminArgs {
    #[command(subcommand)]
    command: SiteAdminCommand,

    /// Database path override (defaults to DATABASE_PATH)
    #[arg(long)]
    database_path: Option<String>,
}

#[derive(Subcommand)]
enum SiteAdminCommand {
    /// Create the admin account or replace its password
    ResetAdmin {
        /// Admin username
        #[arg(long, default_value = defaults::ADMIN_USERNAME)]
        username: String,

        /// New password; a random one is generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Replace the documentation index with the default learning center catalog
    SeedContent,

    /// Print a random secret for JWT_SECRET
    GenerateSecret,

    /// Run the environment validator and exit non-zero on failure
    CheckEnv,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = SiteAdminArgs::parse();
    dotenvy::dotenv().ok();
    LoggingConfig::for_cli().init()?;

    let mut config = ServerConfig::from_env();
    if let Some(path) = args.database_path {
        config.database_path = path;
    }

    match args.command {
        SiteAdminCommand::ResetAdmin { username, password } => {
            reset_admin_command(&config, &username, password).await
        }
        SiteAdminCommand::SeedContent => seed_content_command(&config).await,
        SiteAdminCommand::GenerateSecret => {
            generate_secret_command();
            Ok(())
        }
        SiteAdminCommand::CheckEnv => check_env_command(&config),
    }
}

async fn reset_admin_command(
    config: &ServerConfig,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let username = username.trim();
    if username.is_empty() {
        return Err(anyhow!("Username must not be empty"));
    }

    let (password, generated) = match password {
        Some(password) if !password.is_empty() => (password, false),
        Some(_) => return Err(anyhow!("Password must not be empty")),
        None => (
            generate_random_string(hashing::GENERATED_PASSWORD_LENGTH),
            true,
        ),
    };

    let database = Database::new(&config.database_url()).await?;
    let password_hash = hash_password(&password)?;
    let admin_id = database.upsert_admin(username, &password_hash).await?;
    info!(admin_id, username, "Admin credentials updated");

    if generated {
        warn!("Store this password now, it is not shown again");
        println!("{password}");
    }
    Ok(())
}

async fn seed_content_command(config: &ServerConfig) -> Result<()> {
    let database = Database::new(&config.database_url()).await?;
    let catalog = learning_center_catalog();
    let count = database.replace_documentation(&catalog).await?;
    info!("Seeded {count} documentation entries");
    Ok(())
}

fn generate_secret_command() {
    println!("{}", generate_random_string(secret_policy::GENERATED_LENGTH));
}

fn check_env_command(config: &ServerConfig) -> Result<()> {
    let report = EnvironmentValidator::new(config).validate()?;
    info!(
        port = report.port,
        warnings = report.warnings.len(),
        "Environment is valid: {}",
        config.summary()
    );
    Ok(())
}
