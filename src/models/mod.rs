//! Data models for the customer service

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

pub mod customer;
pub mod wallet;

pub use customer::*;
pub use wallet::*;

/// Customer record as stored in the `customer` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Customer {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub gender: bool,
    pub marital_status: MaritalStatus,
    pub role: CustomerRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a customer row
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub gender: bool,
    pub marital_status: MaritalStatus,
    pub role: CustomerRole,
}

/// Partial profile update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
    pub gender: Option<bool>,
    pub marital_status: Option<MaritalStatus>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.address.is_none()
            && self.gender.is_none()
            && self.marital_status.is_none()
    }

    /// Apply the supplied fields to a customer record in place
    pub fn apply_to(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name = name.clone();
        }
        if let Some(age) = self.age {
            customer.age = age;
        }
        if let Some(address) = &self.address {
            customer.address = address.clone();
        }
        if let Some(gender) = self.gender {
            customer.gender = gender;
        }
        if let Some(marital_status) = self.marital_status {
            customer.marital_status = marital_status;
        }
    }
}

/// Wallet row, one per customer
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Wallet {
    pub customer_id: String,
    pub amount: f64,
    pub last_updated: DateTime<Utc>,
}

/// Marital status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "marital_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widows,
}

/// Customer roles
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "customer_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CustomerRole {
    Customer,
    Moderator,
    Admin,
}

impl CustomerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerRole::Customer => "customer",
            CustomerRole::Moderator => "moderator",
            CustomerRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "customer" => Some(CustomerRole::Customer),
            "moderator" => Some(CustomerRole::Moderator),
            "admin" => Some(CustomerRole::Admin),
            _ => None,
        }
    }

    /// Moderators and admins may act on any customer
    pub fn is_staff(&self) -> bool {
        matches!(self, CustomerRole::Moderator | CustomerRole::Admin)
    }
}

/// Envelope for successful API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub db_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub version: String,
}
