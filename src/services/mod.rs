// src/services/mod.rs
//
// Shared services: account storage, password hashing and token issuing

pub mod accounts;
pub mod password;
pub mod tokens;

// Re-export commonly used types for convenience
pub use accounts::{AccountStore, AccountStoreError};
pub use password::PasswordError;
pub use tokens::{TokenError, TokenIssuer};
