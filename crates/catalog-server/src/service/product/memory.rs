//! In-memory [`ProductStore`] for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use catalog_postgres::model::{NewProduct, Product, UpdateProduct};
use catalog_postgres::types::{CursorPage, CursorPagination, OffsetPage, OffsetPagination};
use jiff::Timestamp;
use uuid::Uuid;

use super::ProductStore;
use crate::{Error, Result};

#[derive(Default)]
struct Inner {
    rows: Mutex<Vec<Product>>,
    queries: AtomicUsize,
    unreachable: AtomicBool,
}

/// Vector backed store that mirrors the Postgres ordering rules.
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    inner: Arc<Inner>,
    delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays every store call by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes `ping` fail.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.inner.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Inserts a product created at `created_at` and returns it.
    pub fn seed(&self, name: impl Into<String>, created_at: Timestamp) -> Product {
        let product =
            NewProduct::new(Uuid::new_v4(), name, "seeded", "", created_at).into_product();
        self.rows().push(product.clone());
        product
    }

    /// Returns how many store calls were made.
    pub fn query_count(&self) -> usize {
        self.inner.queries.load(Ordering::SeqCst)
    }

    /// Returns how many products are stored.
    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    fn rows(&self) -> MutexGuard<'_, Vec<Product>> {
        self.inner
            .rows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn enter(&self) {
        self.inner.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn sorted(&self) -> Vec<Product> {
        let mut rows = self.rows().clone();
        rows.sort_by_key(Product::ordering_key);
        rows
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn range_query(&self, pagination: CursorPagination) -> Result<CursorPage<Product>> {
        self.enter().await;

        let items: Vec<_> = self
            .sorted()
            .into_iter()
            .filter(|product| match pagination.after {
                Some(cursor) => cursor.precedes(product.created_at(), product.id),
                None => true,
            })
            .take(pagination.limit as usize)
            .collect();

        Ok(CursorPage::new(
            items,
            pagination.limit,
            Product::ordering_key,
        ))
    }

    async fn list_offset(&self, pagination: OffsetPagination) -> Result<OffsetPage<Product>> {
        self.enter().await;

        let rows = self.sorted();
        let total_rows = rows.len() as i64;
        let items = rows
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect();

        Ok(OffsetPage::new(items, total_rows, pagination))
    }

    async fn get_by_id(&self, product_id: Uuid) -> Result<Option<Product>> {
        self.enter().await;
        Ok(self.rows().iter().find(|p| p.id == product_id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Product>> {
        self.enter().await;
        Ok(self.sorted().into_iter().find(|p| p.name == name))
    }

    async fn insert(&self, new_product: NewProduct) -> Result<Product> {
        self.enter().await;

        let product = new_product.into_product();
        let mut rows = self.rows();
        if rows.iter().any(|p| p.id == product.id) {
            return Err(Error::bad_input("duplicate product identifier"));
        }
        rows.push(product.clone());
        Ok(product)
    }

    async fn update_by_id(
        &self,
        product_id: Uuid,
        changes: UpdateProduct,
    ) -> Result<Option<Product>> {
        self.enter().await;

        let mut rows = self.rows();
        let Some(product) = rows.iter_mut().find(|p| p.id == product_id) else {
            return Ok(None);
        };
        changes.apply_to(product);
        Ok(Some(product.clone()))
    }

    async fn delete_by_id(&self, product_id: Uuid) -> Result<bool> {
        self.enter().await;

        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|p| p.id != product_id);
        Ok(rows.len() != before)
    }

    async fn ping(&self) -> Result<()> {
        if self.inner.unreachable.load(Ordering::SeqCst) {
            return Err(Error::internal("memory", "store is unreachable"));
        }
        Ok(())
    }
}
