//! Claims read from backend-issued access tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The subset of an access token's payload the gateway cares about.
///
/// Every field is optional: the backend owns the token format and the
/// gateway only reads what it needs for the role gate and refresh timing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject, numeric or string depending on the backend.
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    /// Role claim, e.g. `"admin"` or `"tourist"`.
    #[serde(default)]
    pub role: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    #[serde(default)]
    pub exp: Option<i64>,
}

impl AccessClaims {
    /// Case-insensitive role comparison. A token without a role claim
    /// never matches.
    pub fn has_role(&self, required: &str) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.trim().eq_ignore_ascii_case(required))
    }

    /// Whether the token expires within `leeway_seconds` from now.
    /// Tokens without `exp` are treated as non-expiring.
    pub fn expires_within(&self, leeway_seconds: i64) -> bool {
        self.exp
            .is_some_and(|exp| Utc::now().timestamp() + leeway_seconds >= exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_match_is_case_insensitive() {
        let claims = AccessClaims {
            role: Some("ADMIN".to_string()),
            ..Default::default()
        };
        assert!(claims.has_role("admin"));
        assert!(!claims.has_role("tourist"));
    }

    #[test]
    fn test_missing_role_never_matches() {
        assert!(!AccessClaims::default().has_role("admin"));
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc::now().timestamp();
        let soon = AccessClaims {
            exp: Some(now + 10),
            ..Default::default()
        };
        assert!(soon.expires_within(30));
        assert!(!soon.expires_within(0));
        assert!(!AccessClaims::default().expires_within(3600));
    }
}
