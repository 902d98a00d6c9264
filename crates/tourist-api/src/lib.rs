//! # tourist-api
//!
//! HTTP layer of the tourist admin gateway, built on Axum.
//!
//! Provides the catalogue-driven authenticated proxy, the session
//! endpoints backed by sealed cookies, middleware (CORS, compression,
//! request logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod proxy;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiErrorResponse, ProxyError};
pub use state::AppState;
