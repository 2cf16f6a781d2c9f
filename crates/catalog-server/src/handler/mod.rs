//! All `aide::axum::`[`ApiRouter`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use aide::axum::ApiRouter;
//! use aide::axum::routing::get;
//! use catalog_server::handler::{CustomRoutes, routes};
//! use catalog_server::service::{ServiceConfig, ServiceState};
//!
//! async fn custom_handler() -> &'static str {
//!     "Hello from custom route!"
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::builder().build()?;
//! let state = ServiceState::from_config(&config).await?;
//!
//! let custom_routes =
//!     CustomRoutes::new().add_routes(ApiRouter::new().route("/custom", get(custom_handler)));
//!
//! // Everything is served under `/api/v1`.
//! let router = routes(custom_routes, state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod products;
pub mod request;
pub mod response;
mod uploads;
mod utility;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::ErrorResponse;
pub use crate::handler::utility::{CustomRoutes, RouterMapFn};
use crate::service::ServiceState;

/// Prefix of every API route.
pub const API_PREFIX: &str = "/api/v1";

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns an [`ApiRouter`] with all routes nested under [`API_PREFIX`].
pub fn routes(custom_routes: CustomRoutes, state: ServiceState) -> ApiRouter<ServiceState> {
    let mut router = ApiRouter::new()
        .merge(monitors::routes())
        .merge(products::routes())
        .merge(uploads::routes(&state));

    if let Some(additional) = custom_routes.routes.clone() {
        router = router.merge(additional);
    }

    ApiRouter::new()
        .nest(API_PREFIX, custom_routes.map(router))
        .fallback(fallback)
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;

    use aide::axum::ApiRouter;
    use axum_test::TestServer;
    use tempfile::TempDir;

    use crate::handler::{CustomRoutes, routes};
    use crate::service::{MemoryStore, ServiceConfig, ServiceState};

    /// A test server over an in-memory store.
    pub struct TestApp {
        pub server: TestServer,
        pub store: MemoryStore,
        _upload_dir: TempDir,
    }

    /// Returns state over `store` with a small page floor and upload limit.
    pub async fn create_test_state(
        store: &MemoryStore,
        upload_dir: &TempDir,
    ) -> anyhow::Result<ServiceState> {
        let config = ServiceConfig::builder()
            .with_min_page_size(2)
            .with_max_upload_size(1024usize)
            .with_upload_dir(upload_dir.path())
            .build()?;

        let state = ServiceState::with_store(Arc::new(store.clone()), &config).await?;
        Ok(state)
    }

    /// Returns a new [`TestApp`] with the given router.
    pub async fn create_test_app(
        router: impl Fn(ServiceState) -> ApiRouter<ServiceState>,
    ) -> anyhow::Result<TestApp> {
        let store = MemoryStore::new();
        let upload_dir = tempfile::tempdir()?;
        let state = create_test_state(&store, &upload_dir).await?;
        let server = create_test_server_with_state(router(state.clone()), state)?;

        Ok(TestApp {
            server,
            store,
            _upload_dir: upload_dir,
        })
    }

    /// Returns a new [`TestServer`] with the given router and state.
    pub fn create_test_server_with_state(
        router: ApiRouter<ServiceState>,
        state: ServiceState,
    ) -> anyhow::Result<TestServer> {
        let app: axum::Router = router.with_state(state).into();
        let server = TestServer::new(app)?;
        Ok(server)
    }

    #[tokio::test]
    async fn routes_are_versioned() -> anyhow::Result<()> {
        let app = create_test_app(|state| routes(CustomRoutes::new(), state)).await?;

        app.server.get("/api/v1/health").await.assert_status_ok();
        app.server.get("/health").await.assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_answer_with_error_document() -> anyhow::Result<()> {
        let app = create_test_app(|state| routes(CustomRoutes::new(), state)).await?;

        let response = app.server.get("/api/v1/nothing-here").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<serde_json::Value>()["name"], "not_found");
        Ok(())
    }

    #[tokio::test]
    async fn custom_routes_are_merged() -> anyhow::Result<()> {
        async fn ping() -> &'static str {
            "pong"
        }

        let app = create_test_app(|state| {
            let custom = CustomRoutes::new()
                .add_routes(ApiRouter::new().route("/ping", axum::routing::get(ping)));
            routes(custom, state)
        })
        .await?;

        app.server.get("/api/v1/ping").await.assert_text("pong");
        Ok(())
    }
}
