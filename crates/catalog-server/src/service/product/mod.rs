//! Product use cases: the store seam, the paginator and single-row CRUD.

#[cfg(test)]
mod memory;
mod paginator;
mod store;
mod usecase;

use std::future::Future;
use std::time::Duration;

#[cfg(test)]
pub(crate) use self::memory::MemoryStore;
pub use self::paginator::{PageSizePolicy, Paginator};
pub use self::store::ProductStore;
pub use self::usecase::{ProductDraft, ProductService};
use crate::{Error, Result, TRACING_TARGET_SERVICE};

/// Runs a single store call under a deadline.
///
/// An expired deadline drops the call and yields [`ErrorKind::Internal`]; no
/// partial result is returned.
///
/// [`ErrorKind::Internal`]: crate::ErrorKind::Internal
pub(crate) async fn with_deadline<T, F>(
    deadline: Duration,
    operation: &'static str,
    call: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(elapsed) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVICE,
                operation,
                deadline_ms = deadline.as_millis() as u64,
                "Store call exceeded its deadline"
            );
            Err(Error::internal(
                "store",
                format!("{operation} did not complete within {deadline:?}"),
            )
            .with_source(elapsed))
        }
    }
}
