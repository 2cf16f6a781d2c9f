//! Single-product create, read, update and delete.

use std::sync::Arc;
use std::time::Duration;

use catalog_postgres::PgPoolStatus;
use catalog_postgres::model::{NewProduct, Product, UpdateProduct};
use jiff::Timestamp;
use uuid::Uuid;

use super::{ProductStore, with_deadline};
use crate::{Error, Result, TRACING_TARGET_SERVICE};

/// Caller-supplied fields of a new product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub image_src: String,
}

/// Product use cases over a [`ProductStore`].
///
/// Identifiers and timestamps are assigned here, never by the caller.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    deadline: Duration,
}

impl ProductService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn ProductStore>, deadline: Duration) -> Self {
        Self { store, deadline }
    }

    /// Stores a new product with a fresh identifier.
    pub async fn create(&self, draft: ProductDraft) -> Result<Product> {
        let new_product = NewProduct::new(
            Uuid::now_v7(),
            draft.name,
            draft.description,
            draft.image_src,
            Timestamp::now(),
        );

        let product = with_deadline(
            self.deadline,
            "product insert",
            self.store.insert(new_product),
        )
        .await?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            product_id = %product.id,
            "Product created"
        );

        Ok(product)
    }

    /// Fetches a product by identifier.
    pub async fn get(&self, product_id: Uuid) -> Result<Product> {
        with_deadline(
            self.deadline,
            "product lookup",
            self.store.get_by_id(product_id),
        )
        .await?
        .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))
    }

    /// Fetches the oldest product with exactly the given name.
    pub async fn get_by_name(&self, name: &str) -> Result<Product> {
        with_deadline(
            self.deadline,
            "product lookup by name",
            self.store.get_by_name(name),
        )
        .await?
        .ok_or_else(|| Error::not_found(format!("product named '{name}' not found")))
    }

    /// Applies a partial update and refreshes the modification time.
    ///
    /// An update that changes no field is rejected as bad input.
    pub async fn update(&self, product_id: Uuid, changes: UpdateProduct) -> Result<Product> {
        if changes.is_empty() {
            return Err(Error::bad_input("update must change at least one field"));
        }

        let changes = changes.touched_at(Timestamp::now());
        let product = with_deadline(
            self.deadline,
            "product update",
            self.store.update_by_id(product_id, changes),
        )
        .await?
        .ok_or_else(|| Error::not_found(format!("product {product_id} not found")))?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            product_id = %product.id,
            "Product updated"
        );

        Ok(product)
    }

    /// Deletes exactly one product.
    pub async fn delete(&self, product_id: Uuid) -> Result<()> {
        let deleted = with_deadline(
            self.deadline,
            "product delete",
            self.store.delete_by_id(product_id),
        )
        .await?;

        if !deleted {
            return Err(Error::not_found(format!("product {product_id} not found")));
        }

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            %product_id,
            "Product deleted"
        );

        Ok(())
    }

    /// Checks that the store answers within the deadline.
    pub async fn ping(&self) -> Result<()> {
        with_deadline(self.deadline, "store ping", self.store.ping()).await
    }

    /// Returns connection pool statistics when available.
    pub fn pool_status(&self) -> Option<PgPoolStatus> {
        self.store.pool_status()
    }
}
