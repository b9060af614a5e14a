//! In-process repository used by tests and database-less local runs

use async_trait::async_trait;
use chrono::Utc;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use super::repository::{CustomerRepository, RepositoryError};
use crate::models::{Customer, CustomerRole, CustomerUpdate, NewCustomer, Wallet};

#[derive(Default)]
struct Tables {
    customers: HashMap<String, Customer>,
    wallets: HashMap<String, Wallet>,
}

/// Repository backed by in-memory maps, mirroring the table constraints
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.customers.contains_key(&customer.username) {
            return Err(RepositoryError::UniqueViolation(format!(
                "customer '{}' already exists",
                customer.username
            )));
        }

        let now = Utc::now();
        let created = Customer {
            username: customer.username,
            password_hash: customer.password_hash,
            name: customer.name,
            age: customer.age,
            address: customer.address,
            gender: customer.gender,
            marital_status: customer.marital_status,
            role: customer.role,
            created_at: now,
            updated_at: now,
        };

        tables.wallets.insert(
            created.username.clone(),
            Wallet {
                customer_id: created.username.clone(),
                amount: 0.0,
                last_updated: now,
            },
        );
        tables
            .customers
            .insert(created.username.clone(), created.clone());

        Ok(created)
    }

    async fn find_customer(&self, username: &str) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.tables.read().await.customers.get(username).cloned())
    }

    async fn list_customers(&self, role: CustomerRole) -> Result<Vec<Customer>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut customers: Vec<Customer> = tables
            .customers
            .values()
            .filter(|c| c.role == role)
            .cloned()
            .collect();
        customers.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(customers)
    }

    async fn count_customers(&self, role: CustomerRole) -> Result<usize, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.customers.values().filter(|c| c.role == role).count())
    }

    async fn update_customer(
        &self,
        username: &str,
        update: &CustomerUpdate,
    ) -> Result<Option<Customer>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(customer) = tables.customers.get_mut(username) else {
            return Ok(None);
        };

        update.apply_to(customer);
        customer.updated_at = Utc::now();
        Ok(Some(customer.clone()))
    }

    async fn delete_customer(&self, username: &str) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        let removed = tables.customers.remove(username).is_some();
        tables.wallets.remove(username);
        Ok(removed)
    }

    async fn find_wallet(&self, customer_id: &str) -> Result<Option<Wallet>, RepositoryError> {
        Ok(self.tables.read().await.wallets.get(customer_id).cloned())
    }

    async fn adjust_wallet(
        &self,
        customer_id: &str,
        delta: f64,
    ) -> Result<Option<Wallet>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(wallet) = tables.wallets.get_mut(customer_id) else {
            return Ok(None);
        };

        let amount = wallet.amount + delta;
        if amount < 0.0 {
            return Err(RepositoryError::ConstraintViolation(
                "wallet amount must be non-negative".to_string(),
            ));
        }

        wallet.amount = amount;
        wallet.last_updated = Utc::now();
        Ok(Some(wallet.clone()))
    }
}
