//! Embedded schema migrations.
//!
//! Migrations are compiled into the binary and applied through the
//! [`PgClientExt`] extension trait.

mod client_ext;
mod migrate_result;
mod run_migration;

pub use self::client_ext::PgClientExt;
pub use self::migrate_result::MigrationResult;
