// ABOUTME: Server binary for the Shield marketing site backend
// ABOUTME: Loads .env, initializes logging and hands the validated config to the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! # Shield Site Server Binary
//!
//! Starts the content API, contact inbox and admin gate. Configuration comes
//! from the process environment, optionally seeded from a `.env` file in the
//! working directory. Invalid configuration exits non-zero before the
//! listener binds.

use anyhow::Result;
use clap::Parser;
use shield_site_server::{config::ServerConfig, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "shield-site-server")]
#[command(about = "Shield marketing site backend - content API, contact inbox and admin gate")]
pub struct Args {
    /// Override PORT
    #[arg(long)]
    port: Option<String>,

    /// Override HOST
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // A missing .env is normal in containers
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    info!(
        environment = %config.environment,
        dotenv = dotenv_loaded,
        "Starting Shield site server"
    );

    if let Err(e) = server::start(config).await {
        error!("Server failed: {e:#}");
        return Err(e);
    }

    Ok(())
}
