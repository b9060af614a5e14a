//! Wallet routes

use axum::{routing::put, Router};

use crate::handlers::wallet;
use crate::state::AppState;

/// Create wallet routes
pub fn wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/:customer_id/charge", put(wallet::charge_wallet))
        .route("/wallet/:customer_id/deduct", put(wallet::deduct_wallet))
}
