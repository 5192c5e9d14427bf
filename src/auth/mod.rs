//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Account signup with hashed passwords
//! - Credential verification and JWT access/refresh pair issuing
//! - JSON body extraction with `{"detail": ...}` error bodies

pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use models::{Account, NewAccount, TokenPair};
pub use routes::auth_routes;
