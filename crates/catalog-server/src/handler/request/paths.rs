//! Path parameter types for HTTP handlers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for single product operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProductPathParams {
    /// Unique identifier of the product.
    pub product_id: Uuid,
}

/// Path parameters for lookups by product name.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProductNamePathParams {
    /// Exact product name.
    pub name: String,
}

/// Path parameters for stored image downloads.
#[must_use]
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ImagePathParams {
    /// Stored file name as returned by the upload route.
    pub file_name: String,
}
