//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Number of mounted proxy routes.
    pub proxy_routes: usize,
}

/// Bare acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`.
    pub success: bool,
}

impl SuccessResponse {
    /// `{"success": true}`.
    pub fn ok() -> Self {
        Self { success: true }
    }
}
