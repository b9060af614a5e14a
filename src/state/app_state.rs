//! Application state shared across handlers

use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::Config;
use crate::customer::{CustomerRepository, CustomerService};
use crate::wallet::WalletService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub customer_service: Arc<CustomerService>,
    pub wallet_service: Arc<WalletService>,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        customer_service: Arc<CustomerService>,
        wallet_service: Arc<WalletService>,
    ) -> Self {
        Self {
            auth_service,
            customer_service,
            wallet_service,
        }
    }

    /// Wire every service onto one repository
    pub fn from_repository(repository: Arc<dyn CustomerRepository>, config: &Config) -> Self {
        Self::with_auth_settings(
            repository,
            config.jwt_secret.clone(),
            config.jwt_access_token_ttl_seconds,
            config.bcrypt_cost,
        )
    }

    pub fn with_auth_settings(
        repository: Arc<dyn CustomerRepository>,
        jwt_secret: String,
        access_token_ttl_seconds: i64,
        bcrypt_cost: u32,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(
            repository.clone(),
            jwt_secret,
            access_token_ttl_seconds,
            bcrypt_cost,
        ));
        let customer_service = Arc::new(CustomerService::new(repository.clone()));
        let wallet_service = Arc::new(WalletService::new(repository));

        Self::new(auth_service, customer_service, wallet_service)
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<CustomerService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.customer_service.clone()
    }
}

impl FromRef<AppState> for Arc<WalletService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.wallet_service.clone()
    }
}
