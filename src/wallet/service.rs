//! Charge and deduct against a customer's wallet

use std::sync::Arc;

use crate::customer::{CustomerError, CustomerRepository, RepositoryError};
use crate::models::Wallet;

#[derive(Clone)]
pub struct WalletService {
    repository: Arc<dyn CustomerRepository>,
}

impl WalletService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// Add `amount` to the wallet balance
    pub async fn charge(&self, customer_id: &str, amount: f64) -> Result<Wallet, CustomerError> {
        ensure_valid_amount(amount)?;
        let current = self.existing_wallet(customer_id).await?;

        if !(current.amount + amount).is_finite() {
            tracing::debug!(
                customer_id = %customer_id,
                balance = current.amount,
                requested = amount,
                "Rejected charge overflowing the balance"
            );
            return Err(CustomerError::InvalidAmount(amount));
        }

        let wallet = self
            .repository
            .adjust_wallet(customer_id, amount)
            .await?
            .ok_or_else(|| CustomerError::WalletNotFound(customer_id.to_string()))?;

        tracing::info!(
            customer_id = %customer_id,
            amount = amount,
            new_balance = wallet.amount,
            "Charged wallet"
        );
        Ok(wallet)
    }

    /// Subtract `amount` from the wallet balance. The balance never goes below zero.
    pub async fn deduct(&self, customer_id: &str, amount: f64) -> Result<Wallet, CustomerError> {
        ensure_valid_amount(amount)?;
        let current = self.existing_wallet(customer_id).await?;

        if current.amount < amount {
            tracing::debug!(
                customer_id = %customer_id,
                balance = current.amount,
                requested = amount,
                "Rejected deduction"
            );
            return Err(CustomerError::InsufficientFunds {
                balance: current.amount,
                requested: amount,
            });
        }

        let wallet = self
            .repository
            .adjust_wallet(customer_id, -amount)
            .await
            .map_err(|e| match e {
                // another deduction landed between the read and the update
                RepositoryError::ConstraintViolation(_) => CustomerError::InsufficientFunds {
                    balance: current.amount,
                    requested: amount,
                },
                other => CustomerError::Repository(other),
            })?
            .ok_or_else(|| CustomerError::WalletNotFound(customer_id.to_string()))?;

        tracing::info!(
            customer_id = %customer_id,
            amount = amount,
            new_balance = wallet.amount,
            "Deducted from wallet"
        );
        Ok(wallet)
    }

    async fn existing_wallet(&self, customer_id: &str) -> Result<Wallet, CustomerError> {
        self.repository
            .find_wallet(customer_id)
            .await?
            .ok_or_else(|| CustomerError::WalletNotFound(customer_id.to_string()))
    }
}

fn ensure_valid_amount(amount: f64) -> Result<(), CustomerError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CustomerError::InvalidAmount(amount));
    }
    Ok(())
}
