//! Request ids and HTTP tracing.

use axum::Router;
use axum::http::{HeaderName, header};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Assigns each request an id, traces it and echoes the id in the response.
    ///
    /// An id sent by the client is kept.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        self.layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(SetSensitiveRequestHeadersLayer::new([
                header::AUTHORIZATION,
                header::COOKIE,
            ]))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    fn server() -> TestServer {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_observability();
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn generates_request_id() {
        let response = server().get("/").await;
        let id = response.header(REQUEST_ID_HEADER);
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn keeps_client_request_id() {
        let response = server()
            .get("/")
            .add_header(
                HeaderName::from_static(REQUEST_ID_HEADER),
                HeaderValue::from_static("req-42"),
            )
            .await;
        assert_eq!(response.header(REQUEST_ID_HEADER), "req-42");
    }
}
