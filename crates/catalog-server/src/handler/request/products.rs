//! Product request types.

use catalog_postgres::model::UpdateProduct as UpdateProductModel;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validations::not_blank;
use crate::service::ProductDraft;

/// Request payload for creating a product.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct CreateProduct {
    /// Display name, 1 to 255 characters.
    #[validate(
        length(min = 1, max = 255, message = "name must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,

    /// Description, 1 to 255 characters.
    #[validate(
        length(min = 1, max = 255, message = "description must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub description: String,

    /// Link to the product image, usually returned by the upload route.
    #[serde(default)]
    #[validate(length(max = 2048, message = "image_src must be at most 2048 characters"))]
    pub image_src: String,
}

impl CreateProduct {
    /// Converts the request into service input.
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            image_src: self.image_src.trim().to_owned(),
        }
    }
}

/// Request payload for a partial product update.
///
/// Omitted fields keep their stored value.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, Validate)]
pub struct UpdateProduct {
    /// New display name.
    #[validate(
        length(min = 1, max = 255, message = "name must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub name: Option<String>,

    /// New description.
    #[validate(
        length(min = 1, max = 255, message = "description must be 1 to 255 characters"),
        custom(function = "not_blank")
    )]
    pub description: Option<String>,

    /// New image link; an empty string clears it.
    #[validate(length(max = 2048, message = "image_src must be at most 2048 characters"))]
    pub image_src: Option<String>,
}

impl UpdateProduct {
    /// Converts the request into the changeset applied by the store.
    pub fn into_model(self) -> UpdateProductModel {
        UpdateProductModel {
            name: self.name.map(|name| name.trim().to_owned()),
            description: self.description.map(|d| d.trim().to_owned()),
            image_src: self.image_src.map(|src| src.trim().to_owned()),
            updated_at: None,
        }
    }
}
