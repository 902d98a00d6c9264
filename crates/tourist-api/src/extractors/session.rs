//! `SignedIn` extractor: reads and verifies the sealed session cookie.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use tourist_auth::Session;
use tourist_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Error returned when no valid session cookie is present.
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// The caller's session, unsealed from the session cookie.
#[derive(Debug, Clone)]
pub struct SignedIn(pub Session);

impl std::ops::Deref for SignedIn {
    type Target = Session;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for SignedIn {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(&state.config.auth.cookie_name)
            .ok_or_else(|| AppError::authentication(NOT_AUTHENTICATED))?;

        let session = state.sealer.unseal(cookie.value()).map_err(|e| {
            debug!(error = %e, "Rejected session cookie");
            AppError::authentication(NOT_AUTHENTICATED)
        })?;

        Ok(SignedIn(session))
    }
}
