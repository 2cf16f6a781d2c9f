//! Product model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::products;
use crate::types::Cursor;

/// Product model representing a row of the catalog.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// Human-readable product name.
    pub name: String,
    /// Short product description.
    pub description: String,
    /// Reference to the product image, usually a download URL.
    pub image_src: String,
    /// Timestamp when this product was created.
    pub created_at: Timestamp,
    /// Timestamp when this product was last modified.
    pub updated_at: Timestamp,
}

/// Data structure for creating a new product.
///
/// The identifier and both timestamps are assigned by the service layer.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProduct {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Human-readable product name.
    pub name: String,
    /// Short product description.
    pub description: String,
    /// Reference to the product image.
    pub image_src: String,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Initial modification timestamp, equal to `created_at`.
    pub updated_at: Timestamp,
}

/// Data structure for updating an existing product.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateProduct {
    /// Updated name.
    pub name: Option<String>,
    /// Updated description.
    pub description: Option<String>,
    /// Updated image reference.
    pub image_src: Option<String>,
    /// Refreshed modification timestamp.
    pub updated_at: Option<Timestamp>,
}

impl Product {
    /// Returns the creation timestamp.
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }

    /// Returns the last modification timestamp.
    #[inline]
    pub fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at.into()
    }

    /// Returns the pagination ordering key of this product.
    #[inline]
    pub fn ordering_key(&self) -> (jiff::Timestamp, Uuid) {
        (self.created_at(), self.id)
    }

    /// Returns the cursor that resumes listing right after this product.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.created_at(), self.id)
    }

    /// Returns whether the product has been modified since creation.
    pub fn is_modified(&self) -> bool {
        self.updated_at() > self.created_at()
    }

    /// Returns whether the product references an image.
    pub fn has_image(&self) -> bool {
        !self.image_src.is_empty()
    }
}

impl NewProduct {
    /// Creates a new product stamped with the given identifier and time.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        image_src: impl Into<String>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            image_src: image_src.into(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    /// Converts the insert payload into the row it produces.
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            image_src: self.image_src,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl UpdateProduct {
    /// Returns whether no user-facing field is being changed.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.image_src.is_none()
    }

    /// Sets the modification timestamp.
    pub fn touched_at(mut self, now: jiff::Timestamp) -> Self {
        self.updated_at = Some(now.into());
        self
    }

    /// Applies the changes to an in-memory product.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(image_src) = &self.image_src {
            product.image_src.clone_from(image_src);
        }
        if let Some(updated_at) = self.updated_at {
            product.updated_at = updated_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_has_equal_timestamps() {
        let now = jiff::Timestamp::now();
        let product = NewProduct::new(Uuid::now_v7(), "Lamp", "Desk lamp", "", now).into_product();

        assert_eq!(product.created_at(), now);
        assert_eq!(product.updated_at(), now);
        assert!(!product.is_modified());
        assert!(!product.has_image());
    }

    #[test]
    fn update_applies_only_present_fields() {
        let created = jiff::Timestamp::from_second(1_700_000_000).unwrap();
        let later = jiff::Timestamp::from_second(1_700_000_100).unwrap();
        let mut product = NewProduct::new(Uuid::nil(), "Lamp", "Desk lamp", "", created).into_product();

        let changes = UpdateProduct {
            name: Some("Floor lamp".into()),
            ..Default::default()
        }
        .touched_at(later);
        assert!(!changes.is_empty());
        changes.apply_to(&mut product);

        assert_eq!(product.name, "Floor lamp");
        assert_eq!(product.description, "Desk lamp");
        assert_eq!(product.updated_at(), later);
        assert!(product.is_modified());
        assert_eq!(product.cursor(), Cursor::new(created, Uuid::nil()));
    }
}
