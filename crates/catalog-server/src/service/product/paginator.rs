//! Cursor and offset listing over a [`ProductStore`].

use std::sync::Arc;
use std::time::Duration;

use catalog_postgres::model::Product;
use catalog_postgres::types::{
    Cursor, CursorPage, CursorPagination, MAX_PAGE_SIZE, OffsetPage, OffsetPagination,
};

use super::{ProductStore, with_deadline};
use crate::{Error, Result, TRACING_TARGET_SERVICE};

/// Bounds applied to requested page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizePolicy {
    floor: i64,
    ceiling: i64,
}

impl PageSizePolicy {
    /// Creates a policy raising requests to `floor` and capping them at `ceiling`.
    pub fn new(floor: i64, ceiling: i64) -> Result<Self> {
        if floor < 1 || ceiling > MAX_PAGE_SIZE || floor > ceiling {
            return Err(Error::config(format!(
                "page size bounds must satisfy 1 <= floor <= ceiling <= {MAX_PAGE_SIZE}, \
                 got floor {floor} and ceiling {ceiling}"
            )));
        }

        Ok(Self { floor, ceiling })
    }

    /// Returns the page size actually used for a request.
    ///
    /// Zero and negative sizes are raised to the floor like any other small
    /// request.
    #[inline]
    pub fn effective(&self, requested: i64) -> i64 {
        requested.clamp(self.floor, self.ceiling)
    }
}

impl Default for PageSizePolicy {
    fn default() -> Self {
        Self {
            floor: 10,
            ceiling: MAX_PAGE_SIZE,
        }
    }
}

/// Translates `(cursor, page size)` requests into bounded range queries.
///
/// Cloning is cheap; clones share the store.
#[derive(Clone)]
pub struct Paginator {
    store: Arc<dyn ProductStore>,
    policy: PageSizePolicy,
    deadline: Duration,
}

impl Paginator {
    /// Creates a paginator over the given store.
    pub fn new(store: Arc<dyn ProductStore>, policy: PageSizePolicy, deadline: Duration) -> Self {
        Self {
            store,
            policy,
            deadline,
        }
    }

    /// Lists the page that follows `cursor`.
    ///
    /// An empty `cursor` starts from the beginning. A malformed cursor fails
    /// with [`ErrorKind::InvalidCursor`] before the store is queried, and an
    /// empty page is reported as [`ErrorKind::NotFound`].
    ///
    /// [`ErrorKind::InvalidCursor`]: crate::ErrorKind::InvalidCursor
    /// [`ErrorKind::NotFound`]: crate::ErrorKind::NotFound
    pub async fn list(&self, cursor: &str, page_size: i64) -> Result<CursorPage<Product>> {
        let limit = self.policy.effective(page_size);
        let pagination = if cursor.is_empty() {
            CursorPagination::new(limit)
        } else {
            CursorPagination::after(limit, Cursor::decode(cursor)?)
        };

        tracing::debug!(
            target: TRACING_TARGET_SERVICE,
            requested = page_size,
            limit,
            has_cursor = pagination.has_cursor(),
            "Listing products"
        );

        let page = with_deadline(
            self.deadline,
            "product range query",
            self.store.range_query(pagination),
        )
        .await?;

        if page.is_empty() {
            return Err(Error::not_found("no products found"));
        }

        Ok(page)
    }

    /// Lists a 1-based page by number.
    ///
    /// Totals in the result are approximate. Page numbers below one are
    /// treated as the first page and limits are bounded like cursor page
    /// sizes. A page past the end is reported as [`ErrorKind::NotFound`].
    ///
    /// [`ErrorKind::NotFound`]: crate::ErrorKind::NotFound
    pub async fn list_offset(&self, page: i64, limit: i64) -> Result<OffsetPage<Product>> {
        let pagination = OffsetPagination::from_page(page, self.policy.effective(limit));

        tracing::debug!(
            target: TRACING_TARGET_SERVICE,
            page = pagination.page_number(),
            limit = pagination.limit,
            "Listing products by page"
        );

        let page = with_deadline(
            self.deadline,
            "product offset query",
            self.store.list_offset(pagination),
        )
        .await?;

        if page.is_empty() {
            return Err(Error::not_found("no products found"));
        }

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use uuid::Uuid;

    use super::*;
    use crate::ErrorKind;
    use crate::service::MemoryStore;

    fn paginator(store: &MemoryStore, floor: i64) -> Paginator {
        let policy = PageSizePolicy::new(floor, MAX_PAGE_SIZE).unwrap();
        Paginator::new(Arc::new(store.clone()), policy, Duration::from_secs(1))
    }

    #[test]
    fn policy_raises_small_requests_to_floor() {
        let policy = PageSizePolicy::default();
        assert_eq!(policy.effective(1), 10);
        assert_eq!(policy.effective(0), 10);
        assert_eq!(policy.effective(-5), 10);
        assert_eq!(policy.effective(25), 25);
        assert_eq!(policy.effective(1_000), MAX_PAGE_SIZE);
    }

    #[test]
    fn policy_rejects_invalid_bounds() {
        assert!(PageSizePolicy::new(0, 10).is_err());
        assert!(PageSizePolicy::new(20, 10).is_err());
        assert!(PageSizePolicy::new(1, MAX_PAGE_SIZE + 1).is_err());
    }

    #[tokio::test]
    async fn two_pages_then_exhaustion() {
        let store = MemoryStore::new();
        let t1 = Timestamp::from_second(1_700_000_000).unwrap();
        let first = store.seed("first", t1);
        let second = store.seed("second", t1 + 1.second());
        let third = store.seed("third", t1 + 2.seconds());

        let paginator = paginator(&store, 2);

        let page = paginator.list("", 2).await.unwrap();
        let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        let next = page.next_cursor.expect("full page carries a cursor");
        assert_eq!(next, second.cursor());

        let page = paginator.list(&next.encode(), 2).await.unwrap();
        let ids: Vec<_> = page.items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![third.id]);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn full_page_iff_next_cursor() {
        let store = MemoryStore::new();
        let start = Timestamp::from_second(1_700_000_000).unwrap();
        for offset in 0..7 {
            store.seed(format!("product-{offset}"), start + offset.seconds());
        }

        let paginator = paginator(&store, 3);
        let mut cursor = String::new();
        let mut sizes = Vec::new();

        loop {
            let page = paginator.list(&cursor, 3).await.unwrap();
            assert_eq!(page.items.len() == 3, page.next_cursor.is_some());
            sizes.push(page.items.len());
            match page.next_cursor {
                Some(next) => cursor = next.encode(),
                None => break,
            }
        }

        assert_eq!(sizes, vec![3, 3, 1]);
    }

    #[tokio::test]
    async fn traversal_is_complete_and_ordered_with_shared_timestamps() {
        let store = MemoryStore::new();
        let instant = Timestamp::from_second(1_700_000_000).unwrap();
        let mut expected: Vec<_> = (0..9)
            .map(|n| store.seed(format!("tied-{n}"), instant).ordering_key())
            .collect();
        expected.sort();

        let paginator = paginator(&store, 2);
        let mut seen = Vec::new();
        let mut cursor = String::new();

        loop {
            let page = match paginator.list(&cursor, 2).await {
                Ok(page) => page,
                Err(error) if error.kind() == ErrorKind::NotFound => break,
                Err(error) => panic!("unexpected error: {error}"),
            };
            seen.extend(page.items.iter().map(|p| p.ordering_key()));
            match page.next_cursor {
                Some(next) => cursor = next.encode(),
                None => break,
            }
        }

        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn rows_inserted_before_the_cursor_are_skipped() {
        let store = MemoryStore::new();
        let start = Timestamp::from_second(1_700_000_000).unwrap();
        for offset in [10, 20, 30, 40] {
            store.seed(format!("product-{offset}"), start + offset.seconds());
        }

        let paginator = paginator(&store, 2);
        let page = paginator.list("", 2).await.unwrap();
        let cursor = page.next_cursor.unwrap().encode();

        let late_but_older = store.seed("backdated", start + 15.seconds());

        let page = paginator.list(&cursor, 2).await.unwrap();
        assert!(page.items.iter().all(|p| p.id != late_but_older.id));
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn cursor_past_the_end_is_not_found() {
        let store = MemoryStore::new();
        let start = Timestamp::from_second(1_700_000_000).unwrap();
        store.seed("only", start);

        let beyond = Cursor::new(start + 1.hour(), Uuid::nil());
        let error = paginator(&store, 2)
            .list(&beyond.encode(), 2)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn malformed_cursor_never_reaches_the_store() {
        let store = MemoryStore::new();
        store.seed("only", Timestamp::from_second(1_700_000_000).unwrap());

        let error = paginator(&store, 2)
            .list("not-base64!!", 2)
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidCursor);
        assert_eq!(store.query_count(), 0);
    }

    #[tokio::test]
    async fn small_page_size_uses_floor() {
        let store = MemoryStore::new();
        let start = Timestamp::from_second(1_700_000_000).unwrap();
        for offset in 0..15 {
            store.seed(format!("product-{offset}"), start + offset.seconds());
        }

        let page = paginator(&store, 10).list("", 1).await.unwrap();
        assert_eq!(page.items.len(), 10);
        assert!(page.next_cursor.is_some());
    }

    #[tokio::test]
    async fn slow_store_times_out() {
        let store = MemoryStore::new().with_delay(Duration::from_millis(200));
        store.seed("slow", Timestamp::from_second(1_700_000_000).unwrap());

        let policy = PageSizePolicy::new(2, MAX_PAGE_SIZE).unwrap();
        let paginator = Paginator::new(Arc::new(store), policy, Duration::from_millis(20));

        let error = paginator.list("", 2).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Internal);
        assert!(error.message().contains("did not complete"));
    }

    #[tokio::test]
    async fn offset_listing_reports_totals() {
        let store = MemoryStore::new();
        let start = Timestamp::from_second(1_700_000_000).unwrap();
        for offset in 0..25 {
            store.seed(format!("product-{offset}"), start + offset.seconds());
        }

        let page = paginator(&store, 10).list_offset(3, 10).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_rows, 25);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.pagination.page_number(), 3);

        let error = paginator(&store, 10).list_offset(4, 10).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
