//! Product repository for catalog operations.

use std::future::Future;

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewProduct, Product, UpdateProduct};
use crate::types::{CursorPage, CursorPagination, OffsetPage, OffsetPagination};
use crate::{PgConnection, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Row returned by the relation cardinality estimate.
#[derive(QueryableByName)]
struct RowEstimate {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    estimate: i64,
}

/// Builds the keyset range query: rows strictly after the cursor key,
/// ascending by `(created_at, id)`, at most `pagination.limit` of them.
fn range_query(pagination: &CursorPagination) -> schema::products::BoxedQuery<'static, Pg> {
    use schema::products::{self, dsl};

    let mut query = products::table.into_boxed();
    if let Some(cursor) = &pagination.after {
        let cursor_time = jiff_diesel::Timestamp::from(cursor.timestamp);
        query = query.filter(
            dsl::created_at
                .gt(cursor_time)
                .or(dsl::created_at.eq(cursor_time).and(dsl::id.gt(cursor.id))),
        );
    }

    query
        .order((dsl::created_at.asc(), dsl::id.asc()))
        .limit(pagination.limit)
}

/// Repository for product database operations.
pub trait ProductRepository {
    /// Inserts a new product and returns the stored row.
    fn create_product(
        &mut self,
        new_product: NewProduct,
    ) -> impl Future<Output = PgResult<Product>> + Send;

    /// Finds a product by identifier.
    fn find_product_by_id(
        &mut self,
        product_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<Product>>> + Send;

    /// Finds the oldest product with exactly the given name.
    fn find_product_by_name(
        &mut self,
        product_name: &str,
    ) -> impl Future<Output = PgResult<Option<Product>>> + Send;

    /// Lists products ascending by `(created_at, id)` strictly after the cursor.
    fn cursor_list_products(
        &mut self,
        pagination: CursorPagination,
    ) -> impl Future<Output = PgResult<CursorPage<Product>>> + Send;

    /// Lists products ascending by `created_at` using limit and offset.
    fn offset_list_products(
        &mut self,
        pagination: OffsetPagination,
    ) -> impl Future<Output = PgResult<OffsetPage<Product>>> + Send;

    /// Returns the planner's approximate row count for the products table.
    fn estimate_product_count(&mut self) -> impl Future<Output = PgResult<i64>> + Send;

    /// Updates a product, returning `None` when it does not exist.
    fn update_product(
        &mut self,
        product_id: Uuid,
        changes: UpdateProduct,
    ) -> impl Future<Output = PgResult<Option<Product>>> + Send;

    /// Deletes a product, returning whether exactly one row was removed.
    fn delete_product(&mut self, product_id: Uuid)
    -> impl Future<Output = PgResult<bool>> + Send;
}

impl ProductRepository for PgConnection {
    async fn create_product(&mut self, new_product: NewProduct) -> PgResult<Product> {
        use schema::products;

        let product = diesel::insert_into(products::table)
            .values(&new_product)
            .returning(Product::as_returning())
            .get_result(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            product_id = %product.id,
            "Product created"
        );

        Ok(product)
    }

    async fn find_product_by_id(&mut self, product_id: Uuid) -> PgResult<Option<Product>> {
        use schema::products::dsl::*;

        let product = products
            .filter(id.eq(product_id))
            .select(Product::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(product)
    }

    async fn find_product_by_name(&mut self, product_name: &str) -> PgResult<Option<Product>> {
        use schema::products::dsl::*;

        let product = products
            .filter(name.eq(product_name))
            .order((created_at.asc(), id.asc()))
            .select(Product::as_select())
            .first(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(product)
    }

    async fn cursor_list_products(
        &mut self,
        pagination: CursorPagination,
    ) -> PgResult<CursorPage<Product>> {
        let items = range_query(&pagination)
            .select(Product::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            limit = pagination.limit,
            has_cursor = pagination.has_cursor(),
            returned = items.len(),
            "Products range query completed"
        );

        Ok(CursorPage::new(items, pagination.limit, Product::ordering_key))
    }

    async fn offset_list_products(
        &mut self,
        pagination: OffsetPagination,
    ) -> PgResult<OffsetPage<Product>> {
        use schema::products::{self, dsl};

        let items = products::table
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Product::as_select())
            .load(self)
            .await
            .map_err(PgError::from)?;

        let total_rows = self.estimate_product_count().await?;
        Ok(OffsetPage::new(items, total_rows, pagination))
    }

    async fn estimate_product_count(&mut self) -> PgResult<i64> {
        let row: Option<RowEstimate> = diesel::sql_query(
            "SELECT reltuples::bigint AS estimate FROM pg_class WHERE relname = 'products'",
        )
        .get_result(self)
        .await
        .optional()
        .map_err(PgError::from)?;

        // Tables that were never analyzed report -1.
        Ok(row.map_or(0, |row| row.estimate.max(0)))
    }

    async fn update_product(
        &mut self,
        product_id: Uuid,
        changes: UpdateProduct,
    ) -> PgResult<Option<Product>> {
        use schema::products::dsl::*;

        let product = diesel::update(products)
            .filter(id.eq(product_id))
            .set(&changes)
            .returning(Product::as_returning())
            .get_result(self)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(product)
    }

    async fn delete_product(&mut self, product_id: Uuid) -> PgResult<bool> {
        use schema::products::dsl::*;

        let affected = diesel::delete(products.filter(id.eq(product_id)))
            .execute(self)
            .await
            .map_err(PgError::from)?;

        if affected > 1 {
            tracing::error!(
                target: TRACING_TARGET_QUERY,
                product_id = %product_id,
                affected,
                "Delete removed more than one product"
            );
        }

        Ok(affected == 1)
    }
}

#[cfg(test)]
mod tests {
    use diesel::debug_query;
    use jiff::Timestamp;

    use super::*;
    use crate::types::Cursor;

    #[test]
    fn first_page_has_no_key_predicate() {
        let sql = debug_query::<Pg, _>(&range_query(&CursorPagination::new(10))).to_string();

        assert!(!sql.contains("WHERE"), "{sql}");
        assert!(
            sql.contains(r#"ORDER BY "products"."created_at" ASC, "products"."id" ASC"#),
            "{sql}"
        );
        assert!(sql.contains("LIMIT $1"), "{sql}");
    }

    #[test]
    fn cursor_page_filters_strictly_after_key() {
        let at: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
        let cursor = Cursor::new(at, Uuid::from_u128(7));
        let pagination = CursorPagination::after(10, cursor);

        let sql = debug_query::<Pg, _>(&range_query(&pagination)).to_string();
        let (query, binds) = sql.split_once("-- binds:").unwrap();

        let created_after = query.find(r#""products"."created_at" > $1"#).unwrap();
        let or = query.find(" OR ").unwrap();
        let same_instant = query.find(r#""products"."created_at" = $2"#).unwrap();
        let id_after = query.find(r#""products"."id" > $3"#).unwrap();
        assert!(created_after < or && or < same_instant && same_instant < id_after);
        assert!(query.contains(" AND "), "{query}");
        assert!(!query.contains(">="), "{query}");

        assert!(
            query.contains(r#"ORDER BY "products"."created_at" ASC, "products"."id" ASC"#),
            "{query}"
        );
        assert!(query.contains("LIMIT $4"), "{query}");
        assert!(binds.contains("00000000-0000-0000-0000-000000000007"), "{binds}");
    }
}
