#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use atom_server::handler::routes;
use atom_server::middleware::{
    RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt, RouterSecurityExt,
    SecurityHeadersConfig,
};
use atom_server::service::{Collaborators, ServiceConfig, ServiceState};
use axum::Router;

use crate::config::{Cli, MiddlewareConfig};
use crate::server::ServerError;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "atom_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "atom_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "atom_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );

        if let Some(suggestion) = error
            .downcast_ref::<ServerError>()
            .and_then(ServerError::suggestion)
        {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                suggestion,
                "recovery suggestion"
            );
        }
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting atom server"
    );

    cli.validate()?;
    cli.log();

    let state = create_service_state(&cli.service)?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the service state from configuration.
///
/// The standalone binary has no in-process engine or speech collaborators,
/// so those subsystems report as offline. The vector store and embedding
/// server are reached over HTTP.
fn create_service_state(config: &ServiceConfig) -> anyhow::Result<ServiceState> {
    ServiceState::from_config(config, Collaborators::new())
        .context("failed to create service state")
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs, tracing spans, and timing
/// 3. Security - CORS, security headers, compression
/// 4. Routes (innermost) - handlers and the OpenAPI document
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    let api_routes: Router = routes()
        .with_state::<()>(state)
        .with_open_api(&middleware.openapi);

    api_routes
        .with_security(&middleware.cors, &SecurityHeadersConfig::default())
        .with_timing()
        .with_observability()
        .with_recovery(&middleware.recovery)
}
