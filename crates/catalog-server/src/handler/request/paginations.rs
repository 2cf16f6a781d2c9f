//! Listing query parameters.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Query of the cursor listing, `?cursor=&num=`.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CursorQuery {
    /// Token from `next_cursor` of the previous page; omit for the first page.
    pub cursor: Option<String>,
    /// Requested page size. Values below the server floor are raised to it.
    pub num: Option<i64>,
}

impl CursorQuery {
    /// Returns the cursor, empty for the first page.
    pub fn cursor(&self) -> &str {
        self.cursor.as_deref().unwrap_or_default()
    }

    /// Returns the requested page size, `0` when absent.
    pub fn num(&self) -> i64 {
        self.num.unwrap_or_default()
    }
}

/// Query of the offset listing, `?page=&limit=`.
#[must_use]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
}

impl PageQuery {
    const DEFAULT_PAGE: i64 = 1;

    /// Returns the page number, defaulting to the first page.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }

    /// Returns the requested page size, `0` when absent.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or_default()
    }
}
