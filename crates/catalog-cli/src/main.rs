#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use catalog_server::handler::{CustomRoutes, routes};
use catalog_server::middleware::{
    RouterObservabilityExt, RouterOpenApiExt, RouterRecoveryExt, RouterSecurityExt,
    SecurityHeadersConfig,
};
use catalog_server::service::ServiceState;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "catalog_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "catalog_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "catalog_cli::config";

/// Headroom above the upload limit for multipart framing and headers.
const REQUEST_OVERHEAD: usize = 1024 * 1024;

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "Application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "Application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();

    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service)
        .await
        .context("failed to create service state")?;
    let router = create_router(state, &cli);

    server::serve(router, cli.server).await?;
    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Layers added last wrap outermost: recovery, then observability, then
/// security, then the documented API routes.
fn create_router(state: ServiceState, cli: &Cli) -> Router {
    let middleware = &cli.middleware;
    let max_request_size = cli.service.max_upload_size.saturating_add(REQUEST_OVERHEAD);

    routes(CustomRoutes::new(), state.clone())
        .with_open_api(&middleware.openapi)
        .with_state(state)
        .with_security(
            &middleware.cors,
            &SecurityHeadersConfig::default(),
            max_request_size,
        )
        .with_observability()
        .with_recovery(&middleware.recovery)
}
