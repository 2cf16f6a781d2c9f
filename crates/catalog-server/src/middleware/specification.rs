//! OpenAPI document generation with a Scalar reference UI.

use aide::axum::ApiRouter;
use aide::openapi::{Info, License, OpenApi, Tag};
use aide::scalar::Scalar;
use axum::routing::{Router, get};
use axum::{Extension, Json};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Paths the OpenAPI document and UI are served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    /// Path of the OpenAPI JSON document.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    /// Path of the Scalar API reference UI.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

/// Extension trait for [`ApiRouter`] to serve its OpenAPI document.
pub trait RouterOpenApiExt<S> {
    /// Finishes the router, serving the document and UI under the configured paths.
    fn with_open_api(self, config: &OpenApiConfig) -> Router<S>;

    /// Same as [`with_open_api`](Self::with_open_api) with custom [`Info`].
    fn with_open_api_info(self, config: &OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: &OpenApiConfig) -> Router<S> {
        let info = Info {
            title: "Catalog API".to_owned(),
            summary: Some("Product catalog with cursor pagination".to_owned()),
            description: Some(
                "Create, read, update and delete products, list them page by page with \
                 opaque cursors or page numbers, and upload product images."
                    .to_owned(),
            ),
            license: Some(License {
                name: "MIT".to_owned(),
                identifier: Some("MIT".to_owned()),
                ..License::default()
            }),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: &OpenApiConfig, info: Info) -> Router<S> {
        async fn serve_openapi(Extension(api): Extension<OpenApi>) -> Json<OpenApi> {
            Json(api)
        }

        let tags = ["Products", "Uploads", "Health"]
            .into_iter()
            .map(|name| Tag {
                name: name.to_owned(),
                ..Tag::default()
            })
            .collect();

        let mut api = OpenApi {
            info,
            tags,
            ..OpenApi::default()
        };

        let scalar = Scalar::new(&config.open_api_json);
        let router = self
            .route(&config.scalar_ui, scalar.axum_route())
            .route(&config.open_api_json, get(serve_openapi));

        router.finish_api(&mut api).layer(Extension(api))
    }
}

#[cfg(test)]
mod tests {
    use aide::axum::routing::get_with;
    use axum_test::TestServer;

    use super::*;

    async fn ping() -> &'static str {
        "pong"
    }

    #[tokio::test]
    async fn serves_document_with_routes() {
        let config = OpenApiConfig::default();
        let router = ApiRouter::new()
            .api_route("/api/v1/ping", get_with(ping, |op| op.summary("Ping")))
            .with_open_api(&config);
        let server = TestServer::new(router).unwrap();

        let document = server.get(&config.open_api_json).await.json::<serde_json::Value>();
        assert_eq!(document["info"]["title"], "Catalog API");
        assert!(document["paths"].get("/api/v1/ping").is_some());

        server.get(&config.scalar_ui).await.assert_status_ok();
    }
}
