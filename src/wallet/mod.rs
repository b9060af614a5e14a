//! Wallet balance operations

mod service;

pub use service::WalletService;
