//! Data Transfer Objects
//!
//! Response types for the endpoints that are not plain widget models.

use serde::Serialize;

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Number of configured news feeds
    pub feeds: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
