//! Access-token inspection.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use tourist_core::error::AppError;

use super::claims::AccessClaims;

/// Reads the claims of a backend-issued access token.
///
/// The backend signs its tokens with a key the gateway never sees, so only
/// the payload segment is decoded: no signature or expiry check happens
/// here. The backend re-verifies the token on every proxied call; the
/// result is only used to gate sign-in on the role claim and to schedule
/// refreshes.
pub fn inspect_access_token(token: &str) -> Result<AccessClaims, AppError> {
    let mut segments = token.trim().split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return Err(AppError::authentication("Access token is not a JWT")),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AppError::authentication(format!("Unreadable access token payload: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::authentication(format!("Unreadable access token claims: {e}")))
}
