//! Authentication handlers
//!
//! This module contains the handlers for:
//! - Account signup (username/password/email)
//! - Login: credential check and JWT pair issuing

use axum::{extract::Extension, http::StatusCode, Json};
use tracing::{debug, info, warn};

use super::extractors::DetailJson;
use super::models::{
    DetailResponse, LoginRequest, NewAccount, SignupRequest, TokenPair, ALL_FIELDS_REQUIRED,
    NO_ACTIVE_ACCOUNT, USERNAME_TAKEN, USER_CREATED,
};
use super::validators::{LoginValidator, SignupValidator};
use crate::common::helpers::{normalize_email, normalize_username};
use crate::common::{safe_email_log, ApiError, SharedState, Validator};
use crate::services::password;

/// POST /signup/
/// Creates a new account
///
/// # Request Body
/// ```json
/// { "username": "jane", "password": "...", "email": "jane@example.com" }
/// ```
///
/// # Response
/// 201 `{"detail": "User created successfully."}`; 400 with
/// `"All fields are required."` or `"Username already exists."`
#[axum::debug_handler]
pub async fn signup_handler(
    Extension(state_lock): Extension<SharedState>,
    DetailJson(payload): DetailJson<SignupRequest>,
) -> Result<(StatusCode, Json<DetailResponse>), ApiError> {
    let state = state_lock.read().await.clone();

    let validation = SignupValidator.validate(&payload);
    if !validation.is_valid {
        let missing: Vec<&str> = validation.errors.iter().map(|e| e.field.as_str()).collect();
        warn!(missing = ?missing, "Signup rejected: missing required fields");
        return Err(ApiError::ValidationError(ALL_FIELDS_REQUIRED.to_string()));
    }

    let username = normalize_username(&payload.username.unwrap_or_default());
    let password = payload.password.unwrap_or_default();
    let email = normalize_email(&payload.email.unwrap_or_default());

    // Pre-check only; the UNIQUE constraint settles concurrent signups.
    if state.accounts.username_exists(&username).await? {
        warn!(username = %username, "Signup rejected: username already exists");
        return Err(ApiError::Conflict(USERNAME_TAKEN.to_string()));
    }

    let password_hash = password::hash_password(password).await?;
    let account = state
        .accounts
        .create_account(&NewAccount::new(username, email), &password_hash)
        .await?;

    info!(
        user_id = account.id,
        username = %account.username,
        email = %safe_email_log(&account.email),
        "New account created via signup"
    );

    Ok((StatusCode::CREATED, Json(DetailResponse::new(USER_CREATED))))
}

/// POST /login/
/// Verifies credentials and returns a fresh token pair
///
/// # Request Body
/// ```json
/// { "username": "jane", "password": "..." }
/// ```
///
/// # Response
/// ```json
/// { "access": "eyJ...", "refresh": "eyJ..." }
/// ```
#[axum::debug_handler]
pub async fn login_handler(
    Extension(state_lock): Extension<SharedState>,
    DetailJson(payload): DetailJson<LoginRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let state = state_lock.read().await.clone();
    let payload = payload.trimmed();

    let validation = LoginValidator.validate(&payload);
    if !validation.is_valid {
        debug!("Login rejected: missing or blank credential fields");
        return Err(validation.into());
    }

    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let Some(account) = state.accounts.find_by_username(&username).await? else {
        // Same hashing cost as a real check
        password::hash_password(password).await?;
        warn!(username = %username, "Login failed: unknown username");
        return Err(ApiError::Unauthorized(NO_ACTIVE_ACCOUNT.to_string()));
    };

    if !password::verify_password(account.password.clone(), password).await? {
        warn!(user_id = account.id, "Login failed: wrong password");
        return Err(ApiError::Unauthorized(NO_ACTIVE_ACCOUNT.to_string()));
    }

    if !account.is_active {
        warn!(user_id = account.id, "Login failed: account is inactive");
        return Err(ApiError::Unauthorized(NO_ACTIVE_ACCOUNT.to_string()));
    }

    let pair = state.tokens.issue_pair(account.id)?;

    info!(
        user_id = account.id,
        username = %account.username,
        "User authentication successful"
    );

    Ok(Json(pair))
}
