//! Silsila web front-end library.
//!
//! Server-rendered storefront, account area, and admin console for the
//! Silsila apparel shop. All data comes from the Silsila backend API;
//! this crate renders it and enforces cookie-based route access.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use state::AppState;

/// Build the application router with the full middleware stack.
///
/// Sentry layers are added in `main` so tests exercise the same router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::access_guard))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}
