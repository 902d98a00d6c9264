//! Per-caller session state machine.

use tourist_core::error::AppError;

use crate::backend::Credentials;

use super::manager::SessionManager;
use super::model::{Session, SessionFlag};

/// Where a caller stands in the sign-in lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session.
    Unauthenticated,
    /// Credentials submitted, login in flight.
    Authenticating,
    /// Session established and usable.
    Authenticated,
    /// A refresh failed; the caller must sign out.
    Expired,
}

/// Explicit session holder passed to every outbound authenticated call.
///
/// Transitions:
/// - `Unauthenticated -> Authenticating -> Authenticated` on a successful [`sign_in`](Self::sign_in)
/// - `Authenticating -> Unauthenticated` on any login failure
/// - `Authenticated -> Expired` via [`mark_expired`](Self::mark_expired)
/// - any state `-> Unauthenticated` via [`sign_out`](Self::sign_out)
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: SessionState,
    session: Option<Session>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    /// An unauthenticated context.
    pub fn new() -> Self {
        Self {
            state: SessionState::Unauthenticated,
            session: None,
        }
    }

    /// A context resuming an existing session (e.g. one read from a cookie).
    pub fn resume(session: Session) -> Self {
        let state = if session.is_flagged() {
            SessionState::Expired
        } else {
            SessionState::Authenticated
        };
        Self {
            state,
            session: Some(session),
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Bearer token of the current session.
    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    /// Signs in through the session manager.
    pub async fn sign_in(
        &mut self,
        manager: &SessionManager,
        credentials: &Credentials,
    ) -> Result<(), AppError> {
        self.state = SessionState::Authenticating;
        self.session = None;

        match manager.login(credentials).await {
            Ok(session) => {
                self.session = Some(session);
                self.state = SessionState::Authenticated;
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Swaps in a refreshed session.
    pub fn replace(&mut self, session: Session) {
        *self = Self::resume(session);
    }

    /// Flags the session after a failed refresh.
    pub fn mark_expired(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.error = Some(SessionFlag::RefreshAccessTokenError);
            self.state = SessionState::Expired;
        }
    }

    /// Destroys the session.
    pub fn sign_out(&mut self) {
        self.session = None;
        self.state = SessionState::Unauthenticated;
    }
}
