//! Customer accounts: data access and profile operations

mod memory;
mod repository;
mod service;

pub use memory::InMemoryCustomerRepository;
pub use repository::{CustomerRepository, PgCustomerRepository, RepositoryError};
pub use service::{CustomerService, UpdateOutcome};

use thiserror::Error;

use crate::auth::AuthError;

/// Errors surfaced by customer and wallet operations
#[derive(Error, Debug)]
pub enum CustomerError {
    #[error("Customer '{0}' not found")]
    NotFound(String),

    #[error("Wallet for customer '{0}' not found")]
    WalletNotFound(String),

    #[error("Customer with username '{0}' already exists")]
    UsernameTaken(String),

    #[error("Username or password is invalid")]
    InvalidCredentials,

    #[error("Wallet balance {balance} is lower than the requested {requested}")]
    InsufficientFunds { balance: f64, requested: f64 },

    #[error("Amount must be a non-negative finite number, got {0}")]
    InvalidAmount(f64),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}
