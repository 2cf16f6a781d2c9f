//! Product response types.

use catalog_postgres::model;
use catalog_postgres::types::{CursorPage, OffsetPage};
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Product {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Image link, empty when the product has no image.
    pub image_src: String,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last modification time.
    pub updated_at: Timestamp,
}

impl From<model::Product> for Product {
    fn from(product: model::Product) -> Self {
        Self {
            created_at: product.created_at(),
            updated_at: product.updated_at(),
            id: product.id,
            name: product.name,
            description: product.description,
            image_src: product.image_src,
        }
    }
}

/// One page of the cursor listing.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProductsPage {
    /// Products ordered by creation time, then id.
    pub items: Vec<Product>,
    /// Token for the following page; `null` on the last one.
    pub next_cursor: Option<String>,
}

impl From<CursorPage<model::Product>> for ProductsPage {
    fn from(page: CursorPage<model::Product>) -> Self {
        Self {
            next_cursor: page.next_cursor.map(|cursor| cursor.encode()),
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// One page of the offset listing.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NumberedProductsPage {
    /// Products ordered by creation time, then id.
    pub items: Vec<Product>,
    /// 1-based page number.
    pub page: i64,
    /// Page size applied.
    pub limit: i64,
    /// Estimated number of products; may lag behind concurrent writes.
    pub total_rows: i64,
    /// Number of pages at this limit.
    pub total_pages: i64,
}

impl From<OffsetPage<model::Product>> for NumberedProductsPage {
    fn from(page: OffsetPage<model::Product>) -> Self {
        Self {
            page: page.pagination.page_number(),
            limit: page.pagination.limit,
            total_rows: page.total_rows,
            total_pages: page.total_pages(),
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use catalog_postgres::types::{Cursor, OffsetPagination};
    use jiff::ToSpan;

    use super::*;

    fn product(seconds: i64) -> model::Product {
        model::NewProduct::new(
            Uuid::now_v7(),
            "lamp".to_owned(),
            "brass".to_owned(),
            String::new(),
            Timestamp::from_second(1_700_000_000).unwrap() + seconds.seconds(),
        )
        .into_product()
    }

    #[test]
    fn cursor_page_serializes_snake_case() {
        let items = vec![product(0), product(1)];
        let page = CursorPage::new(items, 2, model::Product::ordering_key);
        let last = page.items[1].cursor();

        let json = serde_json::to_value(ProductsPage::from(page)).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 2);
        assert!(json["items"][0].get("image_src").is_some());
        assert_eq!(
            Cursor::decode(json["next_cursor"].as_str().unwrap()).unwrap(),
            last
        );
    }

    #[test]
    fn last_cursor_page_has_null_next_cursor() {
        let page = CursorPage::new(vec![product(0)], 5, model::Product::ordering_key);
        let json = serde_json::to_value(ProductsPage::from(page)).unwrap();
        assert_eq!(json.get("next_cursor"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn offset_page_reports_totals() {
        let page = OffsetPage::new(vec![product(0)], 21, OffsetPagination::from_page(3, 10));
        let body = NumberedProductsPage::from(page);
        assert_eq!(body.page, 3);
        assert_eq!(body.limit, 10);
        assert_eq!(body.total_rows, 21);
        assert_eq!(body.total_pages, 3);
    }
}
