//! Contains constraints, pagination and other custom types.

mod constraint;
mod pagination;

pub use constraint::{ConstraintCategory, ConstraintViolation, ProductConstraints};
pub use pagination::{
    Cursor, CursorError, CursorPage, CursorPagination, MAX_PAGE_SIZE, OffsetPage,
    OffsetPagination,
};
