// Shared fixtures for unit tests

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use super::config::AppConfig;
use super::migrations::run_migrations;
use super::state::AppState;

pub const TEST_JWT_SECRET: &str = "test_secret_key";

/// Fresh in-memory database with the schema applied.
/// A single connection keeps every query on the same in-memory database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    run_migrations(&pool, false).await.expect("migrations");
    pool
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    }
}

pub async fn test_state() -> AppState {
    AppState::new(memory_pool().await, &test_config())
}
