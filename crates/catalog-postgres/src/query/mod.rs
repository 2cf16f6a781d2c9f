//! Database query repositories.
//!
//! Repositories are extension traits implemented for [`PgConnection`], so any
//! pooled connection can run them directly.
//!
//! [`PgConnection`]: crate::PgConnection

mod product;

pub use product::ProductRepository;
