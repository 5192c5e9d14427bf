// src/common/database.rs
//! SQLite pool setup shared by the server and the seeding tool

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Opens a pool for `database_url`, creating the database file (and its
/// parent directory) when it does not exist yet.
pub async fn connect_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    if let Some(parent) = database_parent_dir(database_url) {
        tokio::fs::create_dir_all(&parent).await?;
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    info!(database_url = %database_url, "Database pool ready");
    Ok(pool)
}

/// Directory that must exist for a file-backed `sqlite://` URL.
/// In-memory databases and bare file names need nothing.
fn database_parent_dir(database_url: &str) -> Option<PathBuf> {
    let path_part = database_url.strip_prefix("sqlite://")?;
    let path_without_params = path_part.split('?').next().unwrap_or("");
    if path_without_params.is_empty() || path_without_params.starts_with(':') {
        return None;
    }

    let parent = PathBuf::from(path_without_params).parent()?.to_path_buf();
    if parent.as_os_str().is_empty() {
        None
    } else {
        Some(parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir_for_nested_file() {
        assert_eq!(
            database_parent_dir("sqlite://data/db/users.db?mode=rwc"),
            Some(PathBuf::from("data/db"))
        );
    }

    #[test]
    fn test_no_parent_dir_needed() {
        assert_eq!(database_parent_dir("sqlite://neurodetect.db"), None);
        assert_eq!(database_parent_dir("sqlite://:memory:"), None);
        assert_eq!(database_parent_dir("sqlite::memory:"), None);
    }
}
