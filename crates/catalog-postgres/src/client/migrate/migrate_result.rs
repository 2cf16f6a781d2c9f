//! Outcome of a migration run.

use std::time::Duration;

/// Migration operation result information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Total duration of the migration operation
    pub duration: Duration,
    /// Migration versions applied during this run, in order
    pub applied_versions: Vec<String>,
}

impl MigrationResult {
    /// Creates a new migration result.
    pub fn new(duration: Duration, applied_versions: Vec<String>) -> Self {
        Self {
            duration,
            applied_versions,
        }
    }

    /// Returns whether the run applied nothing.
    #[inline]
    pub fn is_no_op(&self) -> bool {
        self.applied_versions.is_empty()
    }

    /// Returns the last applied migration version, if any.
    pub fn last_applied_version(&self) -> Option<&str> {
        self.applied_versions.last().map(String::as_str)
    }
}
