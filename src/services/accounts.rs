// src/services/accounts.rs
use chrono::{SecondsFormat, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::auth::models::{Account, NewAccount};

#[derive(Debug, thiserror::Error)]
pub enum AccountStoreError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistent account storage over the `users` table
///
/// Username uniqueness is ultimately enforced by the table's UNIQUE
/// constraint; `username_exists` is only a fast pre-check and can race.
#[derive(Debug, Clone)]
pub struct AccountStore {
    db_pool: SqlitePool,
}

impl AccountStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, AccountStoreError> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Account>, AccountStoreError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.db_pool)
            .await?;
        Ok(account)
    }

    /// Inserts a new account.
    /// Losing the race on the unique constraint yields `UsernameTaken`.
    pub async fn create_account(
        &self,
        new: &NewAccount,
        password_hash: &str,
    ) -> Result<Account, AccountStoreError> {
        let result = self.insert(new, password_hash, false).await;
        let rows = match result {
            Ok(rows) => rows,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(username = %new.username, "Unique constraint rejected duplicate username");
                return Err(AccountStoreError::UsernameTaken);
            }
            Err(e) => return Err(e.into()),
        };
        debug!(username = %new.username, rows, "Inserted account");

        self.fetch_existing(&new.username).await
    }

    /// Inserts the account unless the username is already taken.
    /// Returns true only when this call inserted the row; an existing row is
    /// left untouched.
    pub async fn insert_if_absent(
        &self,
        new: &NewAccount,
        password_hash: &str,
    ) -> Result<bool, AccountStoreError> {
        let inserted = self.insert(new, password_hash, true).await?;
        Ok(inserted == 1)
    }

    pub async fn count(&self) -> Result<i64, AccountStoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db_pool)
            .await?;
        Ok(count)
    }

    async fn insert(
        &self,
        new: &NewAccount,
        password_hash: &str,
        ignore_existing: bool,
    ) -> Result<u64, sqlx::Error> {
        let verb = if ignore_existing {
            "INSERT OR IGNORE"
        } else {
            "INSERT"
        };
        let sql = format!(
            "{verb} INTO users (username, password, email, first_name, last_name, age, height, weight, blood_group, is_active, date_joined) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );

        let result = sqlx::query(&sql)
            .bind(&new.username)
            .bind(password_hash)
            .bind(&new.email)
            .bind(&new.first_name)
            .bind(&new.last_name)
            .bind(new.age)
            .bind(new.height)
            .bind(new.weight)
            .bind(new.blood_group.as_deref())
            .bind(new.is_active)
            .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn fetch_existing(&self, username: &str) -> Result<Account, AccountStoreError> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.db_pool)
            .await?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::memory_pool;

    #[tokio::test]
    async fn test_create_and_find_account() {
        let store = AccountStore::new(memory_pool().await);

        assert!(!store.username_exists("alice").await.unwrap());

        let created = store
            .create_account(&NewAccount::new("alice", "alice@example.com"), "hash")
            .await
            .unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.email, "alice@example.com");
        assert_eq!(created.password, "hash");
        assert!(created.is_active);
        assert_eq!(created.first_name, "");
        assert!(created.age.is_none());

        assert!(store.username_exists("alice").await.unwrap());
        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_hits_unique_constraint() {
        let store = AccountStore::new(memory_pool().await);
        let new = NewAccount::new("alice", "alice@example.com");

        store.create_account(&new, "hash").await.unwrap();
        let err = store.create_account(&new, "other").await.unwrap_err();

        assert!(matches!(err, AccountStoreError::UsernameTaken));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_if_absent_leaves_existing_row_alone() {
        let store = AccountStore::new(memory_pool().await);
        let new = NewAccount::new("carol", "carol@example.com");

        assert!(store.insert_if_absent(&new, "h1").await.unwrap());
        assert!(!store.insert_if_absent(&new, "h2").await.unwrap());

        let stored = store.find_by_username("carol").await.unwrap().unwrap();
        assert_eq!(stored.password, "h1");
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
