//! Monitor response types.

use catalog_postgres::PgPoolStatus;
use jiff::Timestamp;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Overall health of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[derive(Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    /// The database answered.
    Healthy,
    /// The database did not answer.
    Unhealthy,
}

/// Connection pool statistics.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PoolStatus {
    /// Maximum number of connections.
    pub max_size: usize,
    /// Open connections.
    pub size: usize,
    /// Idle connections.
    pub available: usize,
    /// Requests waiting for a connection.
    pub waiting: usize,
    /// Share of the pool in use, between 0 and 1.
    pub utilization: f64,
}

impl From<PgPoolStatus> for PoolStatus {
    fn from(status: PgPoolStatus) -> Self {
        Self {
            max_size: status.max_size,
            size: status.size,
            available: status.available,
            waiting: status.waiting,
            utilization: status.utilization(),
        }
    }
}

/// System monitoring status response.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MonitorStatus {
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    /// Overall system health status.
    pub status: ServiceStatus,
    /// Application version.
    pub version: String,
    /// Pool statistics; absent when the store has no pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolStatus>,
}

impl MonitorStatus {
    /// Creates a status stamped with the current time.
    pub fn new(status: ServiceStatus, pool: Option<PgPoolStatus>) -> Self {
        Self {
            checked_at: Timestamp::now(),
            status,
            version: env!("CARGO_PKG_VERSION").to_owned(),
            pool: pool.map(Into::into),
        }
    }

    /// Returns whether the service is healthy.
    #[inline]
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_matches_json() {
        assert_eq!(ServiceStatus::Unhealthy.to_string(), "unhealthy");
        assert_eq!(
            serde_json::to_value(ServiceStatus::Healthy).unwrap(),
            ServiceStatus::Healthy.as_ref()
        );
    }

    #[test]
    fn pool_status_reports_utilization() {
        let status = MonitorStatus::new(
            ServiceStatus::Healthy,
            Some(PgPoolStatus {
                max_size: 10,
                size: 4,
                available: 1,
                waiting: 0,
            }),
        );

        assert!(status.is_healthy());
        let pool = status.pool.unwrap();
        assert_eq!(pool.max_size, 10);
        assert!(pool.utilization > 0.0);
    }
}
