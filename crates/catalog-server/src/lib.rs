#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for product use cases and pagination.
pub const TRACING_TARGET_SERVICE: &str = "catalog_server::service";

/// Tracing target for uploaded image storage.
pub const TRACING_TARGET_STORAGE: &str = "catalog_server::storage";

mod error;

pub mod extract;
pub mod handler;
pub mod middleware;
pub mod service;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
