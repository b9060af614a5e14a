//! Authentication service
//!
//! Registration and password login, issuing bearer tokens for authenticated customers.

use std::sync::Arc;
use uuid::Uuid;

use super::jwt::generate_access_token;
use super::password::{hash_password, verify_password};
use super::AuthError;
use crate::customer::{CustomerError, CustomerRepository, RepositoryError};
use crate::models::{
    CustomerProfile, CustomerRole, LoginRequest, LoginResponse, NewCustomer, RegisterRequest,
};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn CustomerRepository>,
    jwt_secret: String,
    access_token_ttl_seconds: i64,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        repository: Arc<dyn CustomerRepository>,
        jwt_secret: String,
        access_token_ttl_seconds: i64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repository,
            jwt_secret,
            access_token_ttl_seconds,
            bcrypt_cost,
        }
    }

    /// Create a customer account (role `customer`) and its empty wallet
    pub async fn register(&self, req: RegisterRequest) -> Result<CustomerProfile, CustomerError> {
        if self.repository.find_customer(&req.username).await?.is_some() {
            return Err(CustomerError::UsernameTaken(req.username));
        }

        let password_hash =
            hash_password(&req.password, self.bcrypt_cost).map_err(AuthError::from)?;

        let username = req.username.clone();
        let created = self
            .repository
            .insert_customer(NewCustomer {
                username: req.username,
                password_hash,
                name: req.name,
                age: req.age,
                address: req.address,
                gender: req.gender,
                marital_status: req.marital_status,
                role: CustomerRole::Customer,
            })
            .await
            .map_err(|e| match e {
                // lost a race with a concurrent registration
                RepositoryError::UniqueViolation(_) => CustomerError::UsernameTaken(username),
                other => CustomerError::Repository(other),
            })?;

        tracing::info!(username = %created.username, "Registered customer");
        Ok(created.into())
    }

    /// Verify credentials and issue an access token
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, CustomerError> {
        let Some(customer) = self.repository.find_customer(&req.username).await? else {
            tracing::debug!(username = %req.username, "Login for unknown customer");
            return Err(CustomerError::InvalidCredentials);
        };

        if !verify_password(&req.password, &customer.password_hash).map_err(AuthError::from)? {
            tracing::debug!(username = %req.username, "Login with wrong password");
            return Err(CustomerError::InvalidCredentials);
        }

        let jti = Uuid::new_v4().to_string();
        let token = generate_access_token(
            &customer,
            &jti,
            &self.jwt_secret,
            self.access_token_ttl_seconds,
        )
        .map_err(AuthError::from)?;

        tracing::info!(username = %customer.username, "Customer logged in");
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_ttl_seconds,
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
