//! Upload response types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::service::StoredImage;

/// A stored image.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UploadedImage {
    /// Name the file was stored under.
    pub file_name: String,
    /// Size in bytes.
    pub size: usize,
    /// Download link, suitable as a product `image_src`.
    pub url: String,
}

impl From<StoredImage> for UploadedImage {
    fn from(image: StoredImage) -> Self {
        Self {
            file_name: image.file_name,
            size: image.size,
            url: image.url,
        }
    }
}
