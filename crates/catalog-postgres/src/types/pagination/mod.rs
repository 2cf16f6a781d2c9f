//! Pagination types for database queries.
//!
//! Keyset (cursor) pagination is the primary listing mode. Offset pagination
//! is a separate, simpler mode with approximate totals.

mod cursor;
mod offset;

pub use cursor::{Cursor, CursorError, CursorPage, CursorPagination, MAX_PAGE_SIZE};
pub use offset::{OffsetPage, OffsetPagination};
