//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use tourist_auth::http::build_http_client;
use tourist_auth::{AuthBackend, HttpAuthBackend, SessionManager, SessionSealer};
use tourist_core::config::AppConfig;
use tourist_core::error::AppError;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// Cloning is cheap; every field is shared.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Outbound HTTP connection pool used for every backend call
    pub http: reqwest::Client,
    /// Login and refresh flows
    pub sessions: Arc<SessionManager>,
    /// Session cookie signer
    pub sealer: Arc<SessionSealer>,
    /// Server start time, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Builds state that talks to the configured backend over HTTP.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let http = build_http_client(&config.backend)?;
        let backend = Arc::new(HttpAuthBackend::new(
            http.clone(),
            config.backend.clone(),
            config.auth.clone(),
        ));
        Ok(Self::with_auth_backend(config, http, backend))
    }

    /// Builds state around an explicit credential service.
    pub fn with_auth_backend(
        config: AppConfig,
        http: reqwest::Client,
        backend: Arc<dyn AuthBackend>,
    ) -> Self {
        let sessions = Arc::new(SessionManager::new(backend, &config.auth));
        let sealer = Arc::new(SessionSealer::new(&config.auth));

        Self {
            config: Arc::new(config),
            http,
            sessions,
            sealer,
            started_at: Instant::now(),
        }
    }
}
