//! Plain HTTP listener with bounded graceful shutdown.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::lifecycle::serve_with_shutdown;
use super::shutdown::shutdown_signal;
use super::{ServerError, ServerResult};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app`.
///
/// After a shutdown signal the listener stops accepting connections and
/// in-flight requests get `shutdown_timeout` to finish.
pub async fn serve_http(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    server_config
        .validate()
        .map_err(|e| ServerError::invalid_config(&e))?;

    let server_addr = server_config.server_addr();
    let listener = TcpListener::bind(server_addr).await.map_err(|e| {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %e,
            "Failed to bind to address"
        );
        ServerError::bind_error(server_addr, e)
    })?;

    let shutdown_timeout = server_config.shutdown_timeout();
    serve_with_shutdown(&server_config, || async move {
        run_until_drained(listener, app, shutdown_timeout).await
    })
    .await
}

async fn run_until_drained(
    listener: TcpListener,
    app: Router,
    shutdown_timeout: Duration,
) -> std::io::Result<()> {
    let draining = Arc::new(Notify::new());

    let graceful = {
        let draining = draining.clone();
        async move { draining.notified().await }
    };
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();

    let deadline = async {
        shutdown_signal().await;
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            timeout_secs = shutdown_timeout.as_secs(),
            "Graceful shutdown initiated"
        );
        // Stores a permit, so the server sees it even if not yet waiting.
        draining.notify_one();
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => result,
        () = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "Shutdown timeout elapsed, dropping open connections"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    #[tokio::test]
    async fn privileged_port_is_rejected_before_binding() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };

        let error = serve_http(Router::new(), config).await.unwrap_err();
        assert!(matches!(error, ServerError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() {
        let occupied = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = occupied.local_addr().unwrap().port();
        if port < 1024 {
            return;
        }

        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            ..ServerConfig::default()
        };

        let error = serve_http(Router::new(), config).await.unwrap_err();
        assert!(matches!(error, ServerError::BindError { .. }));
        assert_eq!(error.error_code(), "E002");
    }
}
