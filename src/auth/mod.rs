//! Authentication module for the customer service
//!
//! - bcrypt password hashing
//! - JWT access token generation and validation
//! - Registration and login

mod jwt;
mod password;
mod service;

pub use jwt::{generate_access_token, verify_token, Claims, JwtError};
pub use password::{hash_password, verify_password, PasswordError};
pub use service::AuthService;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),
}
