//! Application state, configuration and the product use cases.

mod config;
mod product;
mod state;
mod storage;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::product::{
    PageSizePolicy, Paginator, ProductDraft, ProductService, ProductStore,
};
#[cfg(test)]
pub(crate) use crate::service::product::MemoryStore;
pub use crate::service::state::ServiceState;
pub use crate::service::storage::{ImageFormat, ImageStorage, StoredImage};
// Re-export error types from crate root for convenience
pub use crate::{Error, ErrorKind, Result};
