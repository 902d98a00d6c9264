//! Session data carried between the gateway and the signed-in admin.

use serde::{Deserialize, Serialize};

use crate::jwt::AccessClaims;

/// Error flag attached to a session whose refresh failed.
///
/// Serialized as the bare variant name (`"RefreshAccessTokenError"`), which
/// is what dashboard clients test for before forcing a sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionFlag {
    /// The refresh token was rejected or the refresh call failed.
    RefreshAccessTokenError,
}

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Backend access token, forwarded as the bearer credential.
    pub access_token: String,
    /// Backend refresh token.
    pub refresh_token: String,
    /// Role claim read from the access token.
    pub role: String,
    /// Opaque user profile returned by the backend.
    #[serde(default)]
    pub user_info: serde_json::Value,
    /// Access token expiry (seconds since epoch), when the token carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_expires_at: Option<i64>,
    /// Set once a refresh has failed; the session must then be discarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionFlag>,
}

impl Session {
    /// Builds a fresh session from a token pair, its inspected claims, and the profile.
    pub fn new(
        access_token: String,
        refresh_token: String,
        claims: &AccessClaims,
        user_info: serde_json::Value,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            role: claims.role.clone().unwrap_or_default(),
            user_info,
            access_token_expires_at: claims.exp,
            error: None,
        }
    }

    /// Whether the access token expires within `leeway_seconds`.
    pub fn needs_refresh(&self, leeway_seconds: i64) -> bool {
        AccessClaims {
            exp: self.access_token_expires_at,
            ..AccessClaims::default()
        }
        .expires_within(leeway_seconds)
    }

    /// Whether a refresh has failed for this session.
    pub fn is_flagged(&self) -> bool {
        self.error.is_some()
    }

    /// The client-facing projection of this session.
    pub fn view(&self) -> SessionView {
        SessionView {
            access_token: self.access_token.clone(),
            role: self.role.clone(),
            user_info: self.user_info.clone(),
            error: self.error,
        }
    }
}

/// What the dashboard sees of a session. The refresh token is left out; it
/// travels only in the signed (not encrypted) HttpOnly cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Backend access token for `Authorization: Bearer` headers.
    pub access_token: String,
    /// Role claim.
    pub role: String,
    /// Backend user profile.
    pub user_info: serde_json::Value,
    /// Refresh failure flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionFlag>,
}
