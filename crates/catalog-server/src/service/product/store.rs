use async_trait::async_trait;
use catalog_postgres::model::{NewProduct, Product, UpdateProduct};
use catalog_postgres::query::ProductRepository;
use catalog_postgres::types::{CursorPage, CursorPagination, OffsetPage, OffsetPagination};
use catalog_postgres::{PgClient, PgPoolStatus};
use uuid::Uuid;

use crate::Result;

/// Persistence seam consumed by [`Paginator`] and [`ProductService`].
///
/// Every call is a single bounded round trip; deadlines are applied by the
/// caller. Implementations must keep `(created_at, id)` unique and order
/// range results ascending by it.
///
/// [`Paginator`]: super::Paginator
/// [`ProductService`]: super::ProductService
#[async_trait]
pub trait ProductStore: Send + Sync + 'static {
    /// Returns at most `pagination.limit` rows strictly after the cursor.
    async fn range_query(&self, pagination: CursorPagination) -> Result<CursorPage<Product>>;

    /// Returns one page by limit and offset with an approximate total.
    async fn list_offset(&self, pagination: OffsetPagination) -> Result<OffsetPage<Product>>;

    /// Finds a product by identifier.
    async fn get_by_id(&self, product_id: Uuid) -> Result<Option<Product>>;

    /// Finds the oldest product with exactly the given name.
    async fn get_by_name(&self, name: &str) -> Result<Option<Product>>;

    /// Inserts a new product.
    async fn insert(&self, new_product: NewProduct) -> Result<Product>;

    /// Applies changes to a product, returning `None` when it does not exist.
    async fn update_by_id(
        &self,
        product_id: Uuid,
        changes: UpdateProduct,
    ) -> Result<Option<Product>>;

    /// Deletes a product, returning whether a row was removed.
    async fn delete_by_id(&self, product_id: Uuid) -> Result<bool>;

    /// Verifies the backing store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Returns connection pool statistics when the store is pooled.
    fn pool_status(&self) -> Option<PgPoolStatus> {
        None
    }
}

#[async_trait]
impl ProductStore for PgClient {
    async fn range_query(&self, pagination: CursorPagination) -> Result<CursorPage<Product>> {
        let mut conn = self.get_connection().await?;
        Ok(conn.cursor_list_products(pagination).await?)
    }

    async fn list_offset(&self, pagination: OffsetPagination) -> Result<OffsetPage<Product>> {
        let mut conn = self.get_connection().await?;
        Ok(conn.offset_list_products(pagination).await?)
    }

    async fn get_by_id(&self, product_id: Uuid) -> Result<Option<Product>> {
        let mut conn = self.get_connection().await?;
        Ok(conn.find_product_by_id(product_id).await?)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Product>> {
        let mut conn = self.get_connection().await?;
        Ok(conn.find_product_by_name(name).await?)
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product> {
        let mut conn = self.get_connection().await?;
        Ok(conn.create_product(new_product).await?)
    }

    async fn update_by_id(
        &self,
        product_id: Uuid,
        changes: UpdateProduct,
    ) -> Result<Option<Product>> {
        let mut conn = self.get_connection().await?;
        Ok(conn.update_product(product_id, changes).await?)
    }

    async fn delete_by_id(&self, product_id: Uuid) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        Ok(conn.delete_product(product_id).await?)
    }

    async fn ping(&self) -> Result<()> {
        Ok(PgClient::ping(self).await?)
    }

    fn pool_status(&self) -> Option<PgPoolStatus> {
        Some(PgClient::pool_status(self))
    }
}
