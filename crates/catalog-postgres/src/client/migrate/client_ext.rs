//! Extension trait adding migration support to [`PgClient`].

use std::future::Future;

use super::MigrationResult;
use super::run_migration::{pending_migrations, run_pending_migrations};
use crate::{PgClient, PgResult};

/// Extension trait providing migration functionality for [`PgClient`].
pub trait PgClientExt {
    /// Applies all pending migrations.
    ///
    /// Safe to call repeatedly; an up-to-date schema yields a no-op result.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;

    /// Lists versions of embedded migrations not yet applied.
    fn pending_migrations(&self) -> impl Future<Output = PgResult<Vec<String>>> + Send;
}

impl PgClientExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        run_pending_migrations(self).await
    }

    async fn pending_migrations(&self) -> PgResult<Vec<String>> {
        pending_migrations(self).await
    }
}
