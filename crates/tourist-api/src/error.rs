//! Maps domain and proxy errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use tourist_core::error::{AppError, ErrorKind};

/// Message returned for every local failure.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Error envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable error.
    pub error: String,
    /// Backend body for relayed failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorResponse {
    /// An envelope without details.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

/// HTTP-facing wrapper around [`AppError`] for the gateway's own endpoints.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code returned to the caller.
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::ExternalService => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal
            | ErrorKind::Configuration
            | ErrorKind::Session
            | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Internal server error");
            return (status, Json(ApiErrorResponse::new(INTERNAL_ERROR))).into_response();
        }

        (status, Json(ApiErrorResponse::new(self.0.message))).into_response()
    }
}

/// Failures of a proxied call.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// No bearer credential on the inbound request.
    #[error("Authorization header missing")]
    MissingAuthorization,

    /// An integer path identifier did not parse.
    #[error("Invalid {entity} ID")]
    InvalidIdentifier {
        /// Entity name, e.g. `place`.
        entity: &'static str,
    },

    /// The inbound query string is not valid percent-encoded UTF-8.
    #[error("Invalid query parameters")]
    InvalidQuery,

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Upstream {
        /// Backend status, mirrored to the caller.
        status: StatusCode,
        /// Route's fixed error string.
        message: String,
        /// Parsed backend body.
        details: serde_json::Value,
    },

    /// Transport failure, unreadable body or unexpected payload shape.
    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    /// A local failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Status code returned to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingAuthorization => StatusCode::UNAUTHORIZED,
            Self::InvalidIdentifier { .. } | Self::InvalidQuery => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Internal(format!("Backend request failed: {err}"))
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Upstream {
                message, details, ..
            } => ApiErrorResponse {
                error: message,
                details: Some(details),
            },
            Self::Internal(reason) => {
                tracing::error!(error = %reason, "Proxy request failed");
                ApiErrorResponse::new(INTERNAL_ERROR)
            }
            other => ApiErrorResponse::new(other.to_string()),
        };

        (status, Json(body)).into_response()
    }
}
