//! Authentication data models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::common::helpers::string_or_none;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const USERNAME_TAKEN: &str = "Username already exists.";
pub const USER_CREATED: &str = "User created successfully.";
pub const NO_ACTIVE_ACCOUNT: &str = "No active account found with the given credentials";
pub const FIELD_REQUIRED: &str = "This field is required.";
pub const FIELD_BLANK: &str = "This field may not be blank.";

/// Account row from the `users` table
///
/// `password` holds the PHC hash string, never the plaintext.
#[derive(FromRow, Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub blood_group: Option<String>,
    pub is_active: bool,
    pub date_joined: String,
}

/// Everything needed to insert an account except the password hash
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub blood_group: Option<String>,
    pub is_active: bool,
}

impl NewAccount {
    /// Bare account as created by signup: no profile, active
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            age: None,
            height: None,
            weight: None,
            blood_group: None,
            is_active: true,
        }
    }
}

/// POST /signup/ body
///
/// Fields are optional at the type level so that a missing field produces
/// the signup validation message instead of a deserialization error.
#[derive(Deserialize, Default)]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub email: Option<String>,
}

/// POST /login/ body
#[derive(Deserialize, Default)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Strips surrounding whitespace from both credentials.
    /// A whitespace-only value becomes empty and is reported as blank.
    pub fn trimmed(self) -> Self {
        let trim = |value: Option<String>| value.map(|s| s.trim().to_string());
        Self {
            username: trim(self.username),
            password: trim(self.password),
        }
    }
}

/// Successful login response
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// `{"detail": "..."}` body used for plain success messages
#[derive(Serialize, Deserialize, Debug)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
    pub user_id: i64,
}
