//! Session and credential configuration.

use serde::{Deserialize, Serialize};

/// Built-in session secret; [`super::AppConfig::validate`] warns when it is used.
pub const DEFAULT_SESSION_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Session sealing and backend credential-exchange settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret used to sign session cookies.
    #[serde(default = "default_session_secret")]
    pub session_secret: String,
    /// Lifetime of a sealed session, in hours.
    #[serde(default = "default_session_max_age")]
    pub session_max_age_hours: u64,
    /// Name of the session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the session cookie carries the `Secure` attribute.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    /// Access tokens expiring within this many seconds are refreshed early.
    #[serde(default = "default_refresh_leeway")]
    pub refresh_leeway_seconds: i64,
    /// Role claim value required to sign in (compared case-insensitively).
    #[serde(default = "default_required_role")]
    pub required_role: String,
    /// Backend path for the credential exchange.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Backend path for the refresh-token exchange.
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
    /// Backend path returning the signed-in user's profile.
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: default_session_secret(),
            session_max_age_hours: default_session_max_age(),
            cookie_name: default_cookie_name(),
            cookie_secure: default_true(),
            refresh_leeway_seconds: default_refresh_leeway(),
            required_role: default_required_role(),
            login_path: default_login_path(),
            refresh_path: default_refresh_path(),
            profile_path: default_profile_path(),
        }
    }
}

fn default_session_secret() -> String {
    DEFAULT_SESSION_SECRET.to_string()
}

fn default_session_max_age() -> u64 {
    24
}

fn default_cookie_name() -> String {
    "admin_session".to_string()
}

fn default_true() -> bool {
    true
}

fn default_refresh_leeway() -> i64 {
    30
}

fn default_required_role() -> String {
    "admin".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_refresh_path() -> String {
    "/auth/refresh".to_string()
}

fn default_profile_path() -> String {
    "/auth/me".to_string()
}
