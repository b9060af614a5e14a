//! Wallet HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::{AuthenticatedUser, ValidatedJson};
use crate::error::ApiResult;
use crate::models::{ApiResponse, WalletAmountRequest, WalletBalanceResponse};
use crate::state::AppState;

/// PUT /wallet/:customer_id/charge - Add funds
pub async fn charge_wallet(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(customer_id): Path<String>,
    ValidatedJson(req): ValidatedJson<WalletAmountRequest>,
) -> ApiResult<Json<ApiResponse<WalletBalanceResponse>>> {
    user.authorize(&customer_id)?;

    let wallet = state
        .wallet_service
        .charge(&customer_id, req.amount)
        .await?;

    Ok(Json(ApiResponse::new(
        format!(
            "Wallet for customer '{}' charged with {:?}",
            customer_id, req.amount
        ),
        WalletBalanceResponse {
            customer_id,
            amount: req.amount,
            new_balance: wallet.amount,
        },
    )))
}

/// PUT /wallet/:customer_id/deduct - Withdraw funds; 400 when the balance is too low
pub async fn deduct_wallet(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(customer_id): Path<String>,
    ValidatedJson(req): ValidatedJson<WalletAmountRequest>,
) -> ApiResult<Json<ApiResponse<WalletBalanceResponse>>> {
    user.authorize(&customer_id)?;

    let wallet = state
        .wallet_service
        .deduct(&customer_id, req.amount)
        .await?;

    Ok(Json(ApiResponse::new(
        format!(
            "{:?} deducted from wallet for customer '{}'",
            req.amount, customer_id
        ),
        WalletBalanceResponse {
            customer_id,
            amount: req.amount,
            new_balance: wallet.amount,
        },
    )))
}
