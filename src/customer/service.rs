//! Customer profile service

use std::sync::Arc;

use super::{CustomerError, CustomerRepository};
use crate::models::{CustomerDetails, CustomerProfile, CustomerRole, CustomerUpdate};

/// Result of a profile update request
#[derive(Debug, PartialEq)]
pub enum UpdateOutcome {
    /// The request carried no fields; nothing was written
    Unchanged,
    Updated(CustomerProfile),
}

#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    /// All accounts with the `customer` role, ordered by username
    pub async fn list_customers(&self) -> Result<Vec<CustomerProfile>, CustomerError> {
        let customers = self
            .repository
            .list_customers(CustomerRole::Customer)
            .await?;

        tracing::debug!(count = customers.len(), "Listed customers");
        Ok(customers.into_iter().map(CustomerProfile::from).collect())
    }

    pub async fn get_profile(&self, username: &str) -> Result<CustomerProfile, CustomerError> {
        self.repository
            .find_customer(username)
            .await?
            .map(CustomerProfile::from)
            .ok_or_else(|| CustomerError::NotFound(username.to_string()))
    }

    /// Profile plus wallet; both must exist
    pub async fn get_details(&self, username: &str) -> Result<CustomerDetails, CustomerError> {
        let user = self.get_profile(username).await?;

        let wallet = self
            .repository
            .find_wallet(username)
            .await?
            .ok_or_else(|| CustomerError::WalletNotFound(username.to_string()))?;

        Ok(CustomerDetails { user, wallet })
    }

    pub async fn update_customer(
        &self,
        username: &str,
        update: CustomerUpdate,
    ) -> Result<UpdateOutcome, CustomerError> {
        if self.repository.find_customer(username).await?.is_none() {
            return Err(CustomerError::NotFound(username.to_string()));
        }

        if update.is_empty() {
            return Ok(UpdateOutcome::Unchanged);
        }

        let updated = self
            .repository
            .update_customer(username, &update)
            .await?
            .ok_or_else(|| CustomerError::NotFound(username.to_string()))?;

        tracing::info!(username = %username, "Updated customer profile");
        Ok(UpdateOutcome::Updated(updated.into()))
    }

    pub async fn delete_customer(&self, username: &str) -> Result<(), CustomerError> {
        if !self.repository.delete_customer(username).await? {
            return Err(CustomerError::NotFound(username.to_string()));
        }

        tracing::info!(username = %username, "Deleted customer");
        Ok(())
    }

    /// Number of `customer`-role accounts; doubles as a database liveness probe
    pub async fn count_customers(&self) -> Result<usize, CustomerError> {
        Ok(self
            .repository
            .count_customers(CustomerRole::Customer)
            .await?)
    }
}
