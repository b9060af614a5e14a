//! Customer profile HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

use super::{AuthenticatedUser, StaffUser, ValidatedJson};
use crate::customer::UpdateOutcome;
use crate::error::ApiResult;
use crate::models::{ApiResponse, CustomerDetails, CustomerProfile, UpdateCustomerRequest};
use crate::state::AppState;

/// GET /get - All customers, each keyed by username
pub async fn list_customers(
    State(state): State<AppState>,
    StaffUser(_staff): StaffUser,
) -> ApiResult<Json<ApiResponse<Vec<HashMap<String, CustomerProfile>>>>> {
    let customers = state.customer_service.list_customers().await?;

    let data = customers
        .into_iter()
        .map(|profile| HashMap::from([(profile.username.clone(), profile)]))
        .collect();

    Ok(Json(ApiResponse::new("Retrieved customers successfully", data)))
}

/// GET /get/:customer_id - Profile and wallet
pub async fn get_customer(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(customer_id): Path<String>,
) -> ApiResult<Json<ApiResponse<CustomerDetails>>> {
    user.authorize(&customer_id)?;

    let details = state.customer_service.get_details(&customer_id).await?;

    Ok(Json(ApiResponse::new(
        format!("Retrieved customer '{}' successfully", customer_id),
        details,
    )))
}

/// PUT /update/:customer_id - Partial profile update
///
/// Responds 202 without writing anything when the body carries no fields.
pub async fn update_customer(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(customer_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateCustomerRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CustomerProfile>>)> {
    user.authorize(&customer_id)?;

    let outcome = state
        .customer_service
        .update_customer(&customer_id, req.into())
        .await?;

    let response = match outcome {
        UpdateOutcome::Unchanged => (
            StatusCode::ACCEPTED,
            Json(ApiResponse::message(format!(
                "Customer update request for '{}' processed, but no new data available",
                customer_id
            ))),
        ),
        UpdateOutcome::Updated(profile) => (
            StatusCode::OK,
            Json(ApiResponse::new(
                format!("Updated '{}' successfully", customer_id),
                profile,
            )),
        ),
    };

    Ok(response)
}

/// DELETE /delete/:customer_id - Remove a customer and its wallet
pub async fn delete_customer(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(customer_id): Path<String>,
) -> ApiResult<Json<ApiResponse<()>>> {
    user.authorize(&customer_id)?;

    state.customer_service.delete_customer(&customer_id).await?;

    Ok(Json(ApiResponse::message(format!(
        "Deleted '{}' successfully",
        customer_id
    ))))
}
