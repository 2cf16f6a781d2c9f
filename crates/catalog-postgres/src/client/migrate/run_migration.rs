use std::time::Instant;

use diesel::migration::{Migration, MigrationName};
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use super::MigrationResult;
use crate::{
    BoxError, MIGRATIONS, PgClient, PgError, PgResult, PooledConnection, TRACING_TARGET_MIGRATION,
};

/// Synchronous view of a pooled connection used by the migration harness.
type HarnessConnection = AsyncConnectionWrapper<PooledConnection>;

/// Runs `f` against a pooled connection on the blocking thread pool.
///
/// [`MigrationHarness`] is synchronous, so the async connection is wrapped
/// and moved off the runtime worker threads.
async fn with_harness<T, F>(pg: &PgClient, f: F) -> PgResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut HarnessConnection) -> Result<T, BoxError> + Send + 'static,
{
    let conn = pg.get_connection().await?.into_inner();
    let mut conn: HarnessConnection = conn.into();

    spawn_blocking(move || f(&mut conn))
        .await
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                error = %err,
                "Migration task panicked or was cancelled"
            );
            PgError::Migration(err.into())
        })?
        .map_err(PgError::Migration)
}

/// Lists versions of embedded migrations that are not applied yet.
pub(super) async fn pending_migrations(pg: &PgClient) -> PgResult<Vec<String>> {
    with_harness(pg, |harness| {
        let pending = harness.pending_migrations(MIGRATIONS)?;
        Ok(pending
            .iter()
            .map(|migration| migration.name().version().to_string())
            .collect())
    })
    .await
}

/// Applies all pending migrations.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub(super) async fn run_pending_migrations(pg: &PgClient) -> PgResult<MigrationResult> {
    tracing::info!(target: TRACING_TARGET_MIGRATION, "Starting database migration");
    let start_time = Instant::now();

    let versions = with_harness(pg, |harness| {
        let versions = harness.run_pending_migrations(MIGRATIONS)?;
        Ok(versions
            .into_iter()
            .map(|version| version.to_string())
            .collect::<Vec<_>>())
    })
    .await
    .inspect_err(|err| {
        tracing::error!(
            target: TRACING_TARGET_MIGRATION,
            error = %err,
            "Database migration failed"
        );
    })?;

    let result = MigrationResult::new(start_time.elapsed(), versions);
    if result.is_no_op() {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            "Database schema is already up to date"
        );
    } else {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?result.duration,
            applied = result.applied_versions.len(),
            last_version = result.last_applied_version(),
            "Database migration completed"
        );
    }

    Ok(result)
}
