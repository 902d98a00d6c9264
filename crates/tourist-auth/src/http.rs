//! Shared outbound HTTP client.

use reqwest::Client;

use tourist_core::config::BackendConfig;
use tourist_core::error::{AppError, ErrorKind};

/// Builds the connection-pooled client used for every backend call.
///
/// One client is created at startup and cloned into handlers; clones
/// share the same pool.
pub fn build_http_client(config: &BackendConfig) -> Result<Client, AppError> {
    Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.timeout())
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .user_agent(concat!("tourist-admin/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to build HTTP client: {e}"),
                e,
            )
        })
}
