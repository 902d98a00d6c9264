//! # tourist-auth
//!
//! Session/token management for the tourist admin gateway.
//!
//! ## Modules
//!
//! - `backend`: credential exchange against the backend's auth endpoints
//! - `jwt`: role-claim inspection of backend tokens and session sealing
//! - `session`: the session model, login/refresh flows, and the session state machine
//! - `client`: backend client that refreshes once on 401 before giving up
//! - `http`: shared outbound HTTP client construction

pub mod backend;
pub mod client;
pub mod http;
pub mod jwt;
pub mod session;

pub use backend::{AuthBackend, Credentials, HttpAuthBackend, TokenGrant};
pub use client::{ApiRequest, ApiResponse, AuthorizedClient};
pub use jwt::{AccessClaims, SessionSealer, inspect_access_token};
pub use session::{Session, SessionContext, SessionFlag, SessionManager, SessionState, SessionView};
