//! Credential exchange with the backend's auth endpoints.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tourist_core::config::{AuthConfig, BackendConfig};
use tourist_core::error::{AppError, ErrorKind};

/// Login credentials submitted by an admin.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Tokens returned by a login or refresh exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    /// New access token.
    pub access_token: String,
    /// New refresh token; refresh responses may omit it.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// The external credential/token issuance service.
#[async_trait]
pub trait AuthBackend: Send + Sync + std::fmt::Debug {
    /// Exchanges credentials for a token grant.
    async fn login(&self, credentials: &Credentials) -> Result<TokenGrant, AppError>;

    /// Exchanges a refresh token for a new grant.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AppError>;

    /// Fetches the profile of the user owning `access_token`.
    async fn profile(&self, access_token: &str) -> Result<serde_json::Value, AppError>;
}

/// [`AuthBackend`] over the backend REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    http: Client,
    backend: BackendConfig,
    auth: AuthConfig,
}

impl HttpAuthBackend {
    /// Creates a backend client sharing the given connection pool.
    pub fn new(http: Client, backend: BackendConfig, auth: AuthConfig) -> Self {
        Self {
            http,
            backend,
            auth,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T, AppError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(what, e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), operation = what, "Backend rejected auth request");
            return Err(rejection(what, status));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Malformed {what} response: {e}"),
                e,
            )
        })
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<TokenGrant, AppError> {
        debug!(email = %credentials.email, "Exchanging credentials with backend");
        let response = self
            .http
            .post(self.backend.url(&self.auth.login_path))
            .json(credentials)
            .send()
            .await
            .map_err(|e| transport_error("login", e))?;

        Self::read_json(response, "login").await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenGrant, AppError> {
        let response = self
            .http
            .post(self.backend.url(&self.auth.refresh_path))
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| transport_error("refresh", e))?;

        Self::read_json(response, "refresh").await
    }

    async fn profile(&self, access_token: &str) -> Result<serde_json::Value, AppError> {
        let response = self
            .http
            .get(self.backend.url(&self.auth.profile_path))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| transport_error("profile", e))?;

        Self::read_json(response, "profile").await
    }
}

fn transport_error(what: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::ExternalService,
        format!("Backend {what} request failed: {err}"),
        err,
    )
}

fn rejection(what: &str, status: StatusCode) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::BAD_REQUEST => {
            AppError::authentication(format!("Backend rejected {what} ({status})"))
        }
        _ => AppError::external(format!("Backend {what} failed ({status})")),
    }
}
