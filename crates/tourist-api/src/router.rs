//! Route definitions for the gateway HTTP API.
//!
//! Everything is mounted under `/api`: the proxy catalogue, the session
//! endpoints, and the health check.

use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Uri},
    middleware as axum_middleware,
    routing::{get, on, post},
};
use bytes::Bytes;
use tower_http::trace::TraceLayer;

use crate::extractors::PathParams;
use crate::handlers;
use crate::middleware;
use crate::proxy::{self, RouteSpec, catalog};
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(session_routes())
        .merge(health_routes())
        .merge(proxy_routes(catalog::routes()));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::compression::build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Mounts one generic proxy handler per catalogue entry.
pub fn proxy_routes(specs: Vec<RouteSpec>) -> Router<AppState> {
    specs.into_iter().fold(Router::new(), |router, spec| {
        let path = spec.path;
        let filter = spec.verb.filter();
        let spec = Arc::new(spec);

        router.route(
            path,
            on(
                filter,
                move |State(state): State<AppState>,
                      PathParams(params): PathParams,
                      headers: HeaderMap,
                      uri: Uri,
                      body: Bytes| {
                    let spec = Arc::clone(&spec);
                    async move { proxy::forward(&state, &spec, &headers, &uri, &params, body).await }
                },
            ),
        )
    })
}

/// Session endpoints: login, current session, refresh, logout
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::session::login))
        .route("/auth/session", get(handlers::session::current))
        .route("/auth/refresh", post(handlers::session::refresh))
        .route("/auth/logout", post(handlers::session::logout))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
