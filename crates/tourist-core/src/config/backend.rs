//! Upstream backend API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where and how the gateway reaches the backend REST API.
///
/// Every proxy route and the session manager resolve their paths against
/// the single `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total timeout for one outbound request, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// TCP/TLS connect timeout, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl BackendConfig {
    /// Joins a backend path (starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Outbound request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Outbound connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

fn default_base_url() -> String {
    "https://api.rustedshader.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}
