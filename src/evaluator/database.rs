use serde::{Deserialize, Serialize};

use super::ConditionEvaluator;

/// Health check result for a SQL database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlDatabaseMetrics {
    /// Round-trip time of the health-check query, in milliseconds.
    pub response_time_ms: u64,
    /// Whether the database host was reachable.
    pub network_up: bool,
}

/// Holds when `response_time_ms <= max_response_time_ms` and the network
/// status equals the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthyDatabase {
    max_response_time_ms: u64,
    expected_network_status: bool,
}

impl HealthyDatabase {
    /// Healthy at or under `max_response_time_ms` with the expected network status.
    #[must_use]
    pub const fn new(max_response_time_ms: u64, expected_network_status: bool) -> Self {
        Self {
            max_response_time_ms,
            expected_network_status,
        }
    }
}

impl ConditionEvaluator<SqlDatabaseMetrics> for HealthyDatabase {
    fn test(&self, metric: &SqlDatabaseMetrics) -> bool {
        metric.response_time_ms <= self.max_response_time_ms
            && metric.network_up == self.expected_network_status
    }
}

/// Holds when `response_time_ms > max_response_time_ms` or the network status
/// differs from the expected one.
///
/// Not the exact negation of a [`HealthyDatabase`] configured with a
/// different bound: between the two bounds neither holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnhealthyDatabase {
    max_response_time_ms: u64,
    expected_network_status: bool,
}

impl UnhealthyDatabase {
    /// Unhealthy over `max_response_time_ms` or off the expected network status.
    #[must_use]
    pub const fn new(max_response_time_ms: u64, expected_network_status: bool) -> Self {
        Self {
            max_response_time_ms,
            expected_network_status,
        }
    }
}

impl ConditionEvaluator<SqlDatabaseMetrics> for UnhealthyDatabase {
    fn test(&self, metric: &SqlDatabaseMetrics) -> bool {
        metric.response_time_ms > self.max_response_time_ms
            || metric.network_up != self.expected_network_status
    }
}
