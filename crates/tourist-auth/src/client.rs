//! Backend client for signed-in callers.
//!
//! Every call checks the session's refresh-failure flag first, and a 401
//! from the backend triggers exactly one refresh-and-retry before the
//! caller is signed out.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode, Url};
use tracing::{debug, warn};

use tourist_core::config::BackendConfig;
use tourist_core::error::{AppError, ErrorKind};

use crate::session::{SessionContext, SessionManager, SessionState};

/// One outbound backend call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Backend path, starting with `/`.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A request with any method and no query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Adds a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Backend reply: status plus body (JSON, a JSON string for plain text,
/// or null when empty).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status returned by the backend.
    pub status: StatusCode,
    /// Parsed body.
    pub body: serde_json::Value,
}

/// Sends authenticated requests on behalf of a [`SessionContext`].
#[derive(Debug, Clone)]
pub struct AuthorizedClient {
    http: Client,
    backend: BackendConfig,
    sessions: Arc<SessionManager>,
}

impl AuthorizedClient {
    /// Creates a client sharing the given connection pool.
    pub fn new(http: Client, backend: BackendConfig, sessions: Arc<SessionManager>) -> Self {
        Self {
            http,
            backend,
            sessions,
        }
    }

    /// Sends `request` with the context's bearer token.
    ///
    /// - flagged (expired) session: signed out, no request made
    /// - 401: one refresh, one retry with the new token
    /// - refresh failure or a second 401: signed out
    ///
    /// Other statuses are returned to the caller as-is.
    pub async fn send(
        &self,
        ctx: &mut SessionContext,
        request: &ApiRequest,
    ) -> Result<ApiResponse, AppError> {
        if ctx.state() == SessionState::Expired {
            ctx.sign_out();
            return Err(AppError::authentication("Session expired; sign in again"));
        }

        let token = ctx
            .access_token()
            .ok_or_else(|| AppError::authentication("Not signed in"))?
            .to_string();

        let response = self.dispatch(request, &token).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        debug!(path = %request.path, "Backend returned 401, refreshing session");
        let Some(session) = ctx.session().cloned() else {
            return Err(AppError::authentication("Not signed in"));
        };

        match self.sessions.refresh(&session).await {
            Ok(refreshed) => ctx.replace(refreshed),
            Err(e) => {
                warn!(error = %e, "Session refresh failed, signing out");
                ctx.mark_expired();
                ctx.sign_out();
                return Err(AppError::authentication("Session expired; sign in again"));
            }
        }

        let token = ctx
            .access_token()
            .ok_or_else(|| AppError::authentication("Not signed in"))?
            .to_string();
        let retried = self.dispatch(request, &token).await?;

        if retried.status == StatusCode::UNAUTHORIZED {
            warn!(path = %request.path, "Backend still returned 401 after refresh, signing out");
            ctx.sign_out();
            return Err(AppError::authentication("Unauthorized after token refresh"));
        }

        Ok(retried)
    }

    async fn dispatch(&self, request: &ApiRequest, token: &str) -> Result<ApiResponse, AppError> {
        let mut url = Url::parse(&self.backend.url(&request.path)).map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Invalid backend URL for '{}': {e}", request.path),
                e,
            )
        })?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Backend request failed: {e}"),
                e,
            )
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Failed to read backend response: {e}"),
                e,
            )
        })?;

        let body = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };

        Ok(ApiResponse { status, body })
    }
}
