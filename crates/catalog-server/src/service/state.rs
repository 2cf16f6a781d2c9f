//! Application state and dependency injection.

use std::sync::Arc;

use crate::service::{
    ImageStorage, Paginator, ProductService, ProductStore, Result, ServiceConfig,
};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    products: ProductService,
    paginator: Paginator,
    image_storage: ImageStorage,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres, applies migrations and prepares the upload
    /// directory.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let pg_client = config.connect_postgres().await?;
        Self::with_store(Arc::new(pg_client), config).await
    }

    /// Initializes application state over an already constructed store.
    pub async fn with_store(store: Arc<dyn ProductStore>, config: &ServiceConfig) -> Result<Self> {
        let deadline = config.store_timeout();
        let service_state = Self {
            products: ProductService::new(store.clone(), deadline),
            paginator: Paginator::new(store, config.page_size_policy()?, deadline),
            image_storage: config.open_image_storage().await?,
        };

        Ok(service_state)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(products: ProductService);
impl_di!(paginator: Paginator);
impl_di!(image_storage: ImageStorage);
