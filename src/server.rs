// ABOUTME: Router assembly with tower-http layers and the HTTP listener lifecycle
// ABOUTME: Validation runs before the database opens and before anything binds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shield Security Solutions

//! # Server
//!
//! [`start`] is the whole boot sequence after logging: validate the
//! configuration, open the database, build [`ServerResources`], bind and
//! serve until a shutdown signal arrives. A [`crate::config::ConfigError`]
//! returns before any socket is opened.

use crate::config::{EnvironmentValidator, ServerConfig};
use crate::constants::network::{MAX_BODY_BYTES, REQUEST_TIMEOUT_SECS};
use crate::database::Database;
use crate::middleware::setup_cors;
use crate::resources::ServerResources;
use crate::routes::{
    ActivityLogRoutes, ApplicationRoutes, AuthRoutes, ContactRoutes, DocumentationRoutes,
    HealthRoutes, JobRoutes, ServiceRoutes,
};
use crate::security::{apply_security_headers, SecurityConfig};
use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Assemble every route and cross-cutting layer
///
/// In production, requests that match no API route fall through to the
/// built frontend in `STATIC_DIR`, with `index.html` answering client-side
/// routes.
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let config = Arc::clone(&resources.config);

    let mut app = Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(AuthRoutes::routes(Arc::clone(resources)))
        .merge(JobRoutes::routes(Arc::clone(resources)))
        .merge(ApplicationRoutes::routes(Arc::clone(resources)))
        .merge(ContactRoutes::routes(Arc::clone(resources)))
        .merge(ServiceRoutes::routes(Arc::clone(resources)))
        .merge(DocumentationRoutes::routes(Arc::clone(resources)))
        .merge(ActivityLogRoutes::routes(Arc::clone(resources)));

    if config.environment.is_production() {
        let index = config.static_dir.join("index.html");
        app = app.fallback_service(
            ServeDir::new(&config.static_dir).not_found_service(ServeFile::new(index)),
        );
    }

    let app = apply_security_headers(app, &SecurityConfig::for_environment(config.environment));

    app.layer(setup_cors(&config))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Validate, open storage, bind and serve until shutdown
///
/// # Errors
///
/// Returns the aggregate [`crate::config::ConfigError`] if validation fails,
/// or an error if the database cannot be opened or the address cannot be bound
pub async fn start(config: ServerConfig) -> Result<()> {
    let report = EnvironmentValidator::new(&config).validate()?;
    info!("Configuration: {}", config.summary());

    let database = Database::new(&config.database_url())
        .await
        .with_context(|| format!("Failed to open database at {}", config.database_path))?;

    if database.count_admins().await? == 0 {
        warn!("No admin account exists; create one with `site-admin reset-admin`");
    }

    let address = format!("{}:{}", config.host, report.port);
    let resources = Arc::new(ServerResources::new(database, config)?);
    let app = build_router(&resources);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
