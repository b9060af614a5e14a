//! Wallet request/response schemas

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of the charge and deduct endpoints: a bare JSON number such as `100.0`
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(transparent)]
pub struct WalletAmountRequest {
    #[validate(range(min = 0.0))]
    pub amount: f64,
}

/// Result of a balance change
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WalletBalanceResponse {
    pub customer_id: String,
    pub amount: f64,
    pub new_balance: f64,
}
