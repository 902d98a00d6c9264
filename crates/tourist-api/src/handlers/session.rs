//! Session handlers: login, current session, refresh, logout.
//!
//! The session lives in a sealed HttpOnly cookie; the browser only ever
//! sees the [`SessionView`] projection.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use tourist_auth::{Session, SessionView};
use tourist_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::SuccessResponse;
use crate::error::ApiError;
use crate::extractors::SignedIn;
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<SessionView>), ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        AppError::validation(format!("Invalid login request: {}", rejection.body_text()))
    })?;
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid login request: {e}")))?;

    let session = state.sessions.login(&req.into()).await?;
    store(&state, jar, session)
}

/// GET /api/auth/session
///
/// Refreshes first when the access token is about to expire. A failed
/// refresh is reported through the view's `error` flag.
pub async fn current(
    State(state): State<AppState>,
    jar: CookieJar,
    SignedIn(session): SignedIn,
) -> Result<(CookieJar, Json<SessionView>), ApiError> {
    let fresh = state.sessions.ensure_fresh(&session).await;
    if fresh == session {
        return Ok((jar, Json(session.view())));
    }
    store(&state, jar, fresh)
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    SignedIn(session): SignedIn,
) -> Result<(CookieJar, Json<SessionView>), ApiError> {
    let refreshed = state.sessions.refresh_or_flag(&session).await;
    store(&state, jar, refreshed)
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SuccessResponse>) {
    let removal = Cookie::build((state.config.auth.cookie_name.clone(), "")).path("/");
    (jar.remove(removal), Json(SuccessResponse::ok()))
}

/// Seals `session` into the cookie jar and returns its view.
fn store(
    state: &AppState,
    jar: CookieJar,
    session: Session,
) -> Result<(CookieJar, Json<SessionView>), ApiError> {
    let sealed = state.sealer.seal(&session)?;
    let cookie = Cookie::build((state.config.auth.cookie_name.clone(), sealed))
        .http_only(true)
        .secure(state.config.auth.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/");

    Ok((jar.add(cookie), Json(session.view())))
}
