//! Health check handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::Json;
use crate::handler::Result;
use crate::handler::response::{MonitorStatus, ServiceStatus};
use crate::service::{ProductService, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "catalog_server::handler::monitors";

/// Reports liveness and database pool statistics.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(products): State<ProductService>,
) -> Result<(StatusCode, Json<MonitorStatus>)> {
    let (status_code, status) = match products.ping().await {
        Ok(()) => (StatusCode::OK, ServiceStatus::Healthy),
        Err(error) => {
            tracing::warn!(target: TRACING_TARGET, error = %error, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, ServiceStatus::Unhealthy)
        }
    };

    let response = MonitorStatus::new(status, products.pool_status());

    tracing::debug!(
        target: TRACING_TARGET,
        status = %response.status,
        status_code = status_code.as_u16(),
        "Health status prepared"
    );

    Ok((status_code, Json(response)))
}

fn health_status_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health status")
        .description("Pings the database and returns connection pool statistics.")
        .response_with::<200, Json<MonitorStatus>, _>(|res| res.description("Service is healthy"))
        .response_with::<503, Json<MonitorStatus>, _>(|res| {
            res.description("Database is unreachable")
        })
}

/// Returns the health monitoring routes.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/health", get_with(health_status, health_status_docs))
        .with_path_items(|item| item.tag("Health"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_app;

    #[tokio::test]
    async fn healthy_store() -> anyhow::Result<()> {
        let app = create_test_app(|_| routes()).await?;

        let response = app.server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<MonitorStatus>();
        assert!(status.is_healthy());
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
        assert!(status.pool.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_store() -> anyhow::Result<()> {
        let app = create_test_app(|_| routes()).await?;
        app.store.set_unreachable(true);

        let response = app.server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<MonitorStatus>().status, ServiceStatus::Unhealthy);
        Ok(())
    }
}
