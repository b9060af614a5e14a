//! Customer account service
//!
//! Registration, login, profile management and a per-customer wallet behind
//! an axum HTTP API backed by PostgreSQL.

pub mod auth;
pub mod config;
pub mod customer;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod wallet;

use axum::Router;

use middleware::RateLimiter;
use state::AppState;

/// Build the application router with its request middleware stack
///
/// CORS and HSTS are environment dependent and layered on by the binary.
pub fn build_router(app_state: AppState, rate_limiter: RateLimiter) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .with_state(app_state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
        .layer(axum::middleware::from_fn(move |req, next| {
            let limiter = rate_limiter.clone();
            middleware::rate_limit_layer(limiter)(req, next)
        }))
}
