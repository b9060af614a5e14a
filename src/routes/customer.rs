//! Customer profile routes

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::handlers::customer;
use crate::state::AppState;

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/get", get(customer::list_customers))
        .route("/get/:customer_id", get(customer::get_customer))
        .route("/update/:customer_id", put(customer::update_customer))
        .route("/delete/:customer_id", delete(customer::delete_customer))
}
