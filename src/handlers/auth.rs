//! Authentication HTTP handlers
//!
//! Registration, password login and the current-customer lookup.

use axum::{extract::State, http::StatusCode, Json};

use super::{AuthenticatedUser, ValidatedJson};
use crate::error::ApiResult;
use crate::models::{ApiResponse, CustomerProfile, LoginRequest, LoginResponse, RegisterRequest};
use crate::state::AppState;

/// POST /auth/register - Create a customer account and its wallet
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CustomerProfile>>)> {
    let profile = state.auth_service.register(req).await?;
    let message = format!("Registered '{}' successfully", profile.username);

    Ok((StatusCode::CREATED, Json(ApiResponse::new(message, profile))))
}

/// POST /auth/login - Exchange username and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let username = req.username.clone();
    let tokens = state.auth_service.login(req).await?;

    Ok(Json(ApiResponse::new(
        format!("User '{}' logged in successfully", username),
        tokens,
    )))
}

/// GET /auth/me - Profile of the authenticated customer
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ApiResponse<CustomerProfile>>> {
    let profile = state.customer_service.get_profile(&user.username).await?;

    Ok(Json(ApiResponse::new(
        format!("Retrieved customer '{}' successfully", user.username),
        profile,
    )))
}
