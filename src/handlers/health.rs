use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::state::AppState;

/// GET /health - Service status and database connectivity
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let version = env!("CARGO_PKG_VERSION").to_string();

    match state.customer_service.count_customers().await {
        Ok(count) => Json(HealthResponse {
            status: "OK".to_string(),
            db_status: "connected".to_string(),
            customers_count: Some(count),
            error: None,
            version,
        }),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            Json(HealthResponse {
                status: "ERROR".to_string(),
                db_status: "disconnected".to_string(),
                customers_count: None,
                error: Some(e.to_string()),
                version,
            })
        }
    }
}
