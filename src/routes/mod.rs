//! Route definitions for the customer API

mod auth;
mod customer;
mod wallet;

pub use auth::auth_routes;
pub use customer::customer_routes;
pub use wallet::wallet_routes;

use axum::{routing::get, Router};

use crate::handlers::health;
use crate::state::AppState;

/// Prefix every customer API route is nested under
pub const API_PREFIX: &str = "/api/v1/customer";

/// Customer API routes nested under [`API_PREFIX`], plus `/health` at the root
pub fn api_routes() -> Router<AppState> {
    let api = Router::new()
        .merge(auth_routes())
        .merge(customer_routes())
        .merge(wallet_routes());

    Router::new()
        .route("/health", get(health::health_check))
        .nest(API_PREFIX, api)
}
