//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default, so the gateway starts with no
//! configuration file at all.

pub mod app;
pub mod auth;
pub mod backend;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::backend::BackendConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment prefix for `TOURIST__SECTION__KEY` overrides.
const ENV_PREFIX: &str = "TOURIST";

/// Backend URL variables inherited from the dashboard's deployment
/// environment, in precedence order.
pub const LEGACY_BACKEND_URL_VARS: [&str; 2] = ["NEXT_PUBLIC_BACKEND_API_URL", "BACKEND_API_URL"];

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream backend API settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Session and credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Sources, lowest precedence first:
    /// 1. `config_path` (e.g. `config/default.toml`), optional
    /// 2. `<dir of config_path>/<env>.toml`, optional
    /// 3. `TOURIST__SECTION__KEY` environment variables
    /// 4. `NEXT_PUBLIC_BACKEND_API_URL` / `BACKEND_API_URL` for `backend.base_url`
    pub fn load(config_path: &str, env: &str) -> Result<Self, AppError> {
        let overlay = Path::new(config_path).with_file_name(env);

        let builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::File::from(overlay).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("backend.base_url", legacy_backend_url())
            .map_err(|e| AppError::configuration(format!("Failed to apply overrides: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        let url = self.backend.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::configuration(format!(
                "backend.base_url must be an http(s) URL, got '{url}'"
            )));
        }

        if self.auth.session_secret.len() < 16 {
            return Err(AppError::configuration(
                "auth.session_secret must be at least 16 bytes",
            ));
        }

        if self.auth.session_secret == auth::DEFAULT_SESSION_SECRET {
            tracing::warn!("auth.session_secret is the built-in default; set it in production");
        }

        Ok(())
    }
}

/// The first non-empty legacy backend URL variable, if any.
fn legacy_backend_url() -> Option<String> {
    LEGACY_BACKEND_URL_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.base_url, "https://api.rustedshader.com");
        assert_eq!(config.auth.required_role, "admin");
    }

    #[test]
    fn test_rejects_non_http_backend() {
        let mut config = AppConfig::default();
        config.backend.base_url = "api.rustedshader.com".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_rejects_short_session_secret() {
        let mut config = AppConfig::default();
        config.auth.session_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[backend]\nbase_url = \"http://localhost:9000\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.backend.base_url, "http://localhost:9000");
        assert_eq!(config.backend.timeout_seconds, 30);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.cookie_name, "admin_session");
    }
}
