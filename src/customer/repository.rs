//! Data-access layer for the `customer` and `wallet` tables

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::models::{Customer, CustomerRole, CustomerUpdate, NewCustomer, Wallet};

const CUSTOMER_COLUMNS: &str =
    "username, password_hash, name, age, address, gender, marital_status, role, created_at, updated_at";

/// Repository errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Duplicate key: {0}")]
    UniqueViolation(String),

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return RepositoryError::UniqueViolation(db_err.message().to_string());
            }
            if db_err.is_check_violation() {
                return RepositoryError::ConstraintViolation(db_err.message().to_string());
            }
        }
        RepositoryError::Database(e.to_string())
    }
}

/// CRUD access to customer records and their wallets
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer together with an empty wallet
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError>;

    async fn find_customer(&self, username: &str) -> Result<Option<Customer>, RepositoryError>;

    async fn list_customers(&self, role: CustomerRole) -> Result<Vec<Customer>, RepositoryError>;

    async fn count_customers(&self, role: CustomerRole) -> Result<usize, RepositoryError>;

    /// Returns `None` when no customer has this username
    async fn update_customer(
        &self,
        username: &str,
        update: &CustomerUpdate,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Delete a customer and its wallet. Returns whether a row was removed.
    async fn delete_customer(&self, username: &str) -> Result<bool, RepositoryError>;

    async fn find_wallet(&self, customer_id: &str) -> Result<Option<Wallet>, RepositoryError>;

    /// Add `delta` (possibly negative) to the stored balance in one row update
    async fn adjust_wallet(
        &self,
        customer_id: &str,
        delta: f64,
    ) -> Result<Option<Wallet>, RepositoryError>;
}

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgCustomerRepository {
    db_pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub fn db_pool(&self) -> &PgPool {
        &self.db_pool
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, RepositoryError> {
        let mut tx = self.db_pool.begin().await?;

        let created: Customer = sqlx::query_as(&format!(
            r#"
            INSERT INTO customer (username, password_hash, name, age, address, gender, marital_status, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(&customer.username)
        .bind(&customer.password_hash)
        .bind(&customer.name)
        .bind(customer.age)
        .bind(&customer.address)
        .bind(customer.gender)
        .bind(customer.marital_status)
        .bind(customer.role)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO wallet (customer_id, amount)
            VALUES ($1, 0)
            "#,
        )
        .bind(&created.username)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(username = %created.username, "Created customer and wallet");
        Ok(created)
    }

    async fn find_customer(&self, username: &str) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(customer)
    }

    async fn list_customers(&self, role: CustomerRole) -> Result<Vec<Customer>, RepositoryError> {
        let customers = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE role = $1 ORDER BY username"
        ))
        .bind(role)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(customers)
    }

    async fn count_customers(&self, role: CustomerRole) -> Result<usize, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customer WHERE role = $1")
            .bind(role)
            .fetch_one(&self.db_pool)
            .await?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn update_customer(
        &self,
        username: &str,
        update: &CustomerUpdate,
    ) -> Result<Option<Customer>, RepositoryError> {
        let customer = sqlx::query_as(&format!(
            r#"
            UPDATE customer
            SET name = COALESCE($2, name),
                age = COALESCE($3, age),
                address = COALESCE($4, address),
                gender = COALESCE($5, gender),
                marital_status = COALESCE($6, marital_status),
                updated_at = NOW()
            WHERE username = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(&update.name)
        .bind(update.age)
        .bind(&update.address)
        .bind(update.gender)
        .bind(update.marital_status)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(customer)
    }

    async fn delete_customer(&self, username: &str) -> Result<bool, RepositoryError> {
        // wallet rows go with the customer through ON DELETE CASCADE
        let rows_affected = sqlx::query("DELETE FROM customer WHERE username = $1")
            .bind(username)
            .execute(&self.db_pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn find_wallet(&self, customer_id: &str) -> Result<Option<Wallet>, RepositoryError> {
        let wallet = sqlx::query_as(
            r#"
            SELECT customer_id, amount, last_updated
            FROM wallet
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(wallet)
    }

    async fn adjust_wallet(
        &self,
        customer_id: &str,
        delta: f64,
    ) -> Result<Option<Wallet>, RepositoryError> {
        let wallet = sqlx::query_as(
            r#"
            UPDATE wallet
            SET amount = amount + $2, last_updated = NOW()
            WHERE customer_id = $1
            RETURNING customer_id, amount, last_updated
            "#,
        )
        .bind(customer_id)
        .bind(delta)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(wallet)
    }
}
