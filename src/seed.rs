// src/seed.rs
//! Test account seeding used by the `populate_db` binary

use tracing::info;

use crate::auth::models::NewAccount;
use crate::services::{password, AccountStore};

pub const TEST_USERNAME: &str = "testuser";
const TEST_PASSWORD: &str = "testpassword123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyExists,
}

impl SeedOutcome {
    /// Status line printed by `populate_db`
    pub fn message(&self) -> &'static str {
        match self {
            SeedOutcome::Created => "Test user created successfully.",
            SeedOutcome::AlreadyExists => "Test user already exists.",
        }
    }
}

/// Fixed profile of the dashboard test account
pub fn test_account() -> NewAccount {
    NewAccount {
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        age: Some(25),
        height: Some(170.5),
        weight: Some(65.2),
        blood_group: Some("O+".to_string()),
        is_active: true,
        ..NewAccount::new(TEST_USERNAME, "test@example.com")
    }
}

/// Ensures the test account exists. An existing account is never modified.
pub async fn populate_test_user(store: &AccountStore) -> anyhow::Result<SeedOutcome> {
    if store.username_exists(TEST_USERNAME).await? {
        return Ok(SeedOutcome::AlreadyExists);
    }

    let password_hash = password::hash_password(TEST_PASSWORD.to_string()).await?;
    let outcome = if store.insert_if_absent(&test_account(), &password_hash).await? {
        SeedOutcome::Created
    } else {
        SeedOutcome::AlreadyExists
    };

    info!(username = TEST_USERNAME, outcome = ?outcome, "Seeding finished");
    Ok(outcome)
}
