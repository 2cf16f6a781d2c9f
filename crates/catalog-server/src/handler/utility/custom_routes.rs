//! Extension point for routes defined outside this crate.

use aide::axum::ApiRouter;

use crate::service::ServiceState;

/// Function transforming a router, e.g. to add a layer.
pub type RouterMapFn = fn(ApiRouter<ServiceState>) -> ApiRouter<ServiceState>;

/// Extra routes merged into the versioned API router.
///
/// ```rust
/// use catalog_server::handler::CustomRoutes;
///
/// let custom = CustomRoutes::new();
/// assert!(custom.is_empty());
/// ```
#[derive(Default, Clone)]
pub struct CustomRoutes {
    /// Routes merged next to the built-in ones.
    pub routes: Option<ApiRouter<ServiceState>>,
    /// Applied to the merged router before it is nested under `/api/v1`.
    pub map_fn: Option<RouterMapFn>,
}

impl CustomRoutes {
    /// Creates an empty set of custom routes.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds routes, merging with any added before.
    pub fn add_routes(mut self, routes: ApiRouter<ServiceState>) -> Self {
        self.routes = Some(match self.routes {
            Some(existing) => existing.merge(routes),
            None => routes,
        });
        self
    }

    /// Sets the function applied to the merged router.
    pub fn with_map_fn(mut self, map_fn: RouterMapFn) -> Self {
        self.map_fn = Some(map_fn);
        self
    }

    /// Returns true if no custom routes are configured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.routes.is_none()
    }

    /// Applies the map function, if any.
    pub(crate) fn map(&self, router: ApiRouter<ServiceState>) -> ApiRouter<ServiceState> {
        match self.map_fn {
            Some(map_fn) => map_fn(router),
            None => router,
        }
    }
}
