//! Products table constraint violations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ConstraintCategory;

/// Products table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(into = "String", try_from = "String")]
pub enum ProductConstraints {
    // Product validation constraints
    #[strum(serialize = "products_name_length")]
    NameLength,
    #[strum(serialize = "products_description_length")]
    DescriptionLength,
    #[strum(serialize = "products_image_src_length")]
    ImageSrcLength,

    // Product chronological constraints
    #[strum(serialize = "products_updated_after_created")]
    UpdatedAfterCreated,
}

impl ProductConstraints {
    /// Creates a new [`ProductConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ProductConstraints::NameLength
            | ProductConstraints::DescriptionLength
            | ProductConstraints::ImageSrcLength => ConstraintCategory::Validation,

            ProductConstraints::UpdatedAfterCreated => ConstraintCategory::Chronological,
        }
    }

    /// Returns the column the constraint guards.
    pub fn column(&self) -> &'static str {
        match self {
            ProductConstraints::NameLength => "name",
            ProductConstraints::DescriptionLength => "description",
            ProductConstraints::ImageSrcLength => "image_src",
            ProductConstraints::UpdatedAfterCreated => "updated_at",
        }
    }
}

impl From<ProductConstraints> for String {
    #[inline]
    fn from(val: ProductConstraints) -> Self {
        val.to_string()
    }
}

impl TryFrom<String> for ProductConstraints {
    type Error = strum::ParseError;

    #[inline]
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
