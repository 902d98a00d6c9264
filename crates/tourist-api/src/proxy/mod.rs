//! Authenticated reverse proxy.
//!
//! Every backend resource route shares one handler, [`forward`], driven by
//! a [`RouteSpec`] from the [`catalog`]. A request is checked for a bearer
//! credential, its path identifiers are validated, its query string is
//! filtered against the route's allow-list, and the backend's answer is
//! relayed (or wrapped in the error envelope).

pub mod catalog;
pub mod params;
pub mod spec;
pub mod transform;

use axum::Json;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ProxyError;
use crate::state::AppState;

pub use spec::{ParamKind, PathParam, RouteSpec, Transform, Verb};

/// Forwards one inbound request to the backend as described by `spec`.
pub async fn forward(
    state: &AppState,
    spec: &RouteSpec,
    headers: &HeaderMap,
    uri: &Uri,
    path_params: &[(String, String)],
    body: Bytes,
) -> Result<Response, ProxyError> {
    let authorization = bearer_header(headers)?;

    let query = params::parse_query(uri.query())?;
    let url = params::backend_url(&state.config.backend, spec, path_params, &query)?;

    let mut request = state
        .http
        .request(spec.verb.method(), url.clone())
        .header(AUTHORIZATION, authorization)
        .header(CONTENT_TYPE, "application/json");

    if spec.verb.has_body() && !body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_slice::<Value>(&body)
            .map_err(|e| ProxyError::internal(format!("Unreadable request body: {e}")))?;
        request = request.body(body);
    }

    debug!(method = %spec.verb, route = spec.path, url = %url, "Forwarding to backend");
    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        warn!(
            method = %spec.verb,
            route = spec.path,
            status = status.as_u16(),
            "Backend returned an error"
        );
        return Err(ProxyError::Upstream {
            status,
            message: spec.error_message.clone(),
            details: error_details(status, &bytes),
        });
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(spec.success_status.into_response());
    }

    let payload: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ProxyError::internal(format!("Backend sent a non-JSON body: {e}")))?;
    let payload = transform::apply(spec.transform, payload)?;

    Ok((spec.success_status, Json(payload)).into_response())
}

/// The inbound `Authorization` header, when present and non-blank.
fn bearer_header(headers: &HeaderMap) -> Result<HeaderValue, ProxyError> {
    headers
        .get(AUTHORIZATION)
        .filter(|value| {
            value
                .to_str()
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false)
        })
        .cloned()
        .ok_or(ProxyError::MissingAuthorization)
}

/// Parses a backend error body: JSON, else the text, else a synthesized
/// `{"error": "HTTP <status>"}`.
pub fn error_details(status: StatusCode, body: &[u8]) -> Value {
    if let Ok(json) = serde_json::from_slice::<Value>(body) {
        return json;
    }
    match std::str::from_utf8(body) {
        Ok(text) if !text.trim().is_empty() => Value::String(text.to_string()),
        _ => serde_json::json!({ "error": format!("HTTP {}", status.as_u16()) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_details_prefers_json() {
        let details = error_details(StatusCode::NOT_FOUND, br#"{"detail":"not found"}"#);
        assert_eq!(details, serde_json::json!({"detail": "not found"}));
    }

    #[test]
    fn test_error_details_falls_back_to_text() {
        let details = error_details(StatusCode::BAD_GATEWAY, b"upstream exploded");
        assert_eq!(details, Value::String("upstream exploded".to_string()));
    }

    #[test]
    fn test_error_details_synthesized_when_empty() {
        let details = error_details(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(details, serde_json::json!({"error": "HTTP 503"}));
    }

    #[test]
    fn test_blank_authorization_counts_as_missing() {
        let mut headers = HeaderMap::new();
        assert!(bearer_header(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("   "));
        assert!(bearer_header(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_header(&headers).unwrap(), "Bearer abc");
    }
}
