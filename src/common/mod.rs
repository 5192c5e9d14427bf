// Common module - shared types and utilities across all modules

pub mod config;
pub mod database;
pub mod error;
pub mod helpers;
pub mod migrations;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod testing;

// Re-export commonly used types for convenience
pub use config::{AppConfig, ConfigError};
pub use error::ApiError;
pub use helpers::safe_email_log;
pub use state::{AppState, SharedState};
pub use validation::{ValidationError, ValidationResult, Validator};
