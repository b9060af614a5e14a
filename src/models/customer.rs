//! Customer request/response schemas

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Customer, CustomerRole, CustomerUpdate, MaritalStatus, Wallet};

/// POST /auth/register body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(range(min = 0))]
    pub age: i32,
    #[validate(length(min = 1, max = 512))]
    pub address: String,
    pub gender: bool,
    pub marital_status: MaritalStatus,
}

/// POST /auth/login body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Issued bearer token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// PUT /update/:customer_id body
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub age: Option<i32>,
    #[validate(length(min = 1, max = 512))]
    pub address: Option<String>,
    pub gender: Option<bool>,
    pub marital_status: Option<MaritalStatus>,
}

impl From<UpdateCustomerRequest> for CustomerUpdate {
    fn from(req: UpdateCustomerRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            address: req.address,
            gender: req.gender,
            marital_status: req.marital_status,
        }
    }
}

/// Customer profile (sanitized for API)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CustomerProfile {
    pub username: String,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub gender: bool,
    pub marital_status: MaritalStatus,
    pub role: CustomerRole,
}

impl From<Customer> for CustomerProfile {
    fn from(customer: Customer) -> Self {
        Self {
            username: customer.username,
            name: customer.name,
            age: customer.age,
            address: customer.address,
            gender: customer.gender,
            marital_status: customer.marital_status,
            role: customer.role,
        }
    }
}

/// Customer profile together with its wallet
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub user: CustomerProfile,
    pub wallet: Wallet,
}
