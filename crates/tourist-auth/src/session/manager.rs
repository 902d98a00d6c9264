//! Session lifecycle manager: login and refresh-token flows.

use std::sync::Arc;

use tracing::{info, warn};

use tourist_core::config::AuthConfig;
use tourist_core::error::AppError;

use crate::backend::{AuthBackend, Credentials};
use crate::jwt::inspect_access_token;

use super::model::{Session, SessionFlag};

/// Message returned for every rejected login, whatever the cause.
pub const LOGIN_REJECTED: &str = "Invalid credentials";

/// Creates and refreshes admin sessions against the backend.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Credential/token issuance service.
    backend: Arc<dyn AuthBackend>,
    /// Role claim required to sign in.
    required_role: String,
    /// Access tokens this close to expiry are refreshed early.
    refresh_leeway_seconds: i64,
}

impl SessionManager {
    /// Creates a session manager.
    pub fn new(backend: Arc<dyn AuthBackend>, config: &AuthConfig) -> Self {
        Self {
            backend,
            required_role: config.required_role.clone(),
            refresh_leeway_seconds: config.refresh_leeway_seconds,
        }
    }

    /// Performs the login flow:
    ///
    /// 1. Exchange credentials for tokens
    /// 2. Read the access token's role claim and require the admin role
    /// 3. Fetch the user's profile
    ///
    /// Every failure surfaces as the same authentication error, so a valid
    /// non-admin account is indistinguishable from a wrong password.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AppError> {
        let grant = self
            .backend
            .login(credentials)
            .await
            .map_err(|e| reject(&credentials.email, "credential exchange failed", &e))?;

        let claims = inspect_access_token(&grant.access_token)
            .map_err(|e| reject(&credentials.email, "access token unreadable", &e))?;

        if !claims.has_role(&self.required_role) {
            warn!(
                email = %credentials.email,
                role = claims.role.as_deref().unwrap_or("<none>"),
                "Login refused: role is not permitted to sign in"
            );
            return Err(AppError::authentication(LOGIN_REJECTED));
        }

        let refresh_token = grant.refresh_token.ok_or_else(|| {
            reject(
                &credentials.email,
                "no refresh token issued",
                &AppError::external("missing refresh_token"),
            )
        })?;

        let user_info = self
            .backend
            .profile(&grant.access_token)
            .await
            .map_err(|e| reject(&credentials.email, "profile fetch failed", &e))?;

        info!(email = %credentials.email, "Login successful");
        Ok(Session::new(
            grant.access_token,
            refresh_token,
            &claims,
            user_info,
        ))
    }

    /// Exchanges the session's refresh token for a new access token.
    ///
    /// The previous refresh token is kept when the backend does not rotate it.
    pub async fn refresh(&self, session: &Session) -> Result<Session, AppError> {
        let grant = self.backend.refresh(&session.refresh_token).await?;
        let claims = inspect_access_token(&grant.access_token)?;

        info!("Access token refreshed");
        Ok(Session {
            role: claims.role.clone().unwrap_or_else(|| session.role.clone()),
            access_token: grant.access_token,
            refresh_token: grant
                .refresh_token
                .unwrap_or_else(|| session.refresh_token.clone()),
            user_info: session.user_info.clone(),
            access_token_expires_at: claims.exp,
            error: None,
        })
    }

    /// Refreshes, or returns the session flagged with
    /// [`SessionFlag::RefreshAccessTokenError`] if the refresh fails.
    pub async fn refresh_or_flag(&self, session: &Session) -> Session {
        match self.refresh(session).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                warn!(error = %e, "Access token refresh failed; session flagged");
                Session {
                    error: Some(SessionFlag::RefreshAccessTokenError),
                    ..session.clone()
                }
            }
        }
    }

    /// Returns a session whose access token is usable: refreshed when it is
    /// about to expire, untouched otherwise. Flagged sessions are returned
    /// as they are.
    pub async fn ensure_fresh(&self, session: &Session) -> Session {
        if session.is_flagged() || !session.needs_refresh(self.refresh_leeway_seconds) {
            return session.clone();
        }
        self.refresh_or_flag(session).await
    }
}

fn reject(email: &str, reason: &str, cause: &AppError) -> AppError {
    warn!(email = %email, reason = reason, error = %cause, "Login refused");
    AppError::authentication(LOGIN_REJECTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TokenGrant;
    use async_trait::async_trait;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn token(role: &str, exp: i64) -> String {
        encode(
            &Header::default(),
            &serde_json::json!({ "sub": 1, "role": role, "exp": exp }),
            &EncodingKey::from_secret(b"backend"),
        )
        .unwrap()
    }

    #[derive(Debug)]
    struct FakeBackend {
        role: &'static str,
        accept_password: &'static str,
        refresh_ok: bool,
        profile_calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new(role: &'static str) -> Self {
            Self {
                role,
                accept_password: "secret",
                refresh_ok: true,
                profile_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AuthBackend for FakeBackend {
        async fn login(&self, credentials: &Credentials) -> Result<TokenGrant, AppError> {
            if credentials.password != self.accept_password {
                return Err(AppError::authentication("bad password"));
            }
            Ok(TokenGrant {
                access_token: token(self.role, 4_000_000_000),
                refresh_token: Some("refresh-1".to_string()),
            })
        }

        async fn refresh(&self, _refresh_token: &str) -> Result<TokenGrant, AppError> {
            if !self.refresh_ok {
                return Err(AppError::authentication("refresh rejected"));
            }
            Ok(TokenGrant {
                access_token: token(self.role, 4_100_000_000),
                refresh_token: None,
            })
        }

        async fn profile(&self, _access_token: &str) -> Result<serde_json::Value, AppError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::json!({ "id": 1, "email": "admin@example.com" }))
        }
    }

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: "admin@example.com".to_string(),
            password: password.to_string(),
        }
    }

    fn manager(backend: Arc<FakeBackend>) -> SessionManager {
        SessionManager::new(backend, &AuthConfig::default())
    }

    #[tokio::test]
    async fn test_admin_login_creates_session() {
        let backend = Arc::new(FakeBackend::new("Admin"));
        let session = manager(backend.clone())
            .login(&credentials("secret"))
            .await
            .unwrap();

        assert_eq!(session.role, "Admin");
        assert_eq!(session.refresh_token, "refresh-1");
        assert_eq!(session.user_info["email"], "admin@example.com");
        assert_eq!(session.access_token_expires_at, Some(4_000_000_000));
        assert_eq!(backend.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_admin_rejected_like_bad_password() {
        let backend = Arc::new(FakeBackend::new("tourist"));
        let mgr = manager(backend.clone());

        let wrong_role = mgr.login(&credentials("secret")).await.unwrap_err();
        let wrong_password = mgr.login(&credentials("nope")).await.unwrap_err();

        assert_eq!(wrong_role.kind, wrong_password.kind);
        assert_eq!(wrong_role.message, wrong_password.message);
        assert_eq!(backend.profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_keeps_unrotated_refresh_token() {
        let backend = Arc::new(FakeBackend::new("admin"));
        let mgr = manager(backend);
        let session = mgr.login(&credentials("secret")).await.unwrap();

        let refreshed = mgr.refresh(&session).await.unwrap();
        assert_ne!(refreshed.access_token, session.access_token);
        assert_eq!(refreshed.refresh_token, "refresh-1");
        assert_eq!(refreshed.access_token_expires_at, Some(4_100_000_000));
    }

    #[tokio::test]
    async fn test_failed_refresh_flags_session() {
        let mut backend = FakeBackend::new("admin");
        backend.refresh_ok = false;
        let mgr = manager(Arc::new(backend));
        let mut session = mgr.login(&credentials("secret")).await.unwrap();
        session.access_token_expires_at = Some(0);

        let flagged = mgr.ensure_fresh(&session).await;
        assert_eq!(flagged.error, Some(SessionFlag::RefreshAccessTokenError));
        assert_eq!(flagged.access_token, session.access_token);
    }

    #[tokio::test]
    async fn test_fresh_session_untouched() {
        let mgr = manager(Arc::new(FakeBackend::new("admin")));
        let session = mgr.login(&credentials("secret")).await.unwrap();
        assert_eq!(mgr.ensure_fresh(&session).await, session);
    }
}
