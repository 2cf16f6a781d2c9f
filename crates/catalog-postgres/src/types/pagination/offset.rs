//! Offset-based pagination for database queries.
//!
//! Offset pagination allows jumping to arbitrary page numbers. Its totals come
//! from the planner's row estimate rather than an exact `COUNT(*)`, so they
//! are approximate: accurate after `ANALYZE`, drifting under concurrent writes.

use super::MAX_PAGE_SIZE;

/// Offset-based pagination parameters for database queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetPagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl OffsetPagination {
    /// Creates a new pagination instance.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            offset: offset.max(0),
        }
    }

    /// Creates pagination from a 1-based page number and a page size.
    pub fn from_page(page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        let limit = page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }

    /// Gets the current page number (1-based).
    #[inline]
    pub fn page_number(&self) -> i64 {
        (self.offset / self.limit) + 1
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self::from_page(1, 10)
    }
}

/// Result of an offset-paginated query.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetPage<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Approximate number of rows in the whole table.
    pub total_rows: i64,
    /// The pagination the page was fetched with.
    pub pagination: OffsetPagination,
}

impl<T> OffsetPage<T> {
    /// Creates a new offset page. Negative estimates are clamped to zero.
    pub fn new(items: Vec<T>, total_rows: i64, pagination: OffsetPagination) -> Self {
        Self {
            items,
            total_rows: total_rows.max(0),
            pagination,
        }
    }

    /// Returns the approximate total number of pages.
    pub fn total_pages(&self) -> i64 {
        let limit = self.pagination.limit.max(1);
        (self.total_rows + limit - 1) / limit
    }

    /// Returns whether the page holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
