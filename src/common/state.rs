// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::config::AppConfig;
use crate::services::{AccountStore, TokenIssuer};

/// Application state: the services handlers call into
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountStore>,
    pub tokens: Arc<TokenIssuer>,
}

/// How handlers receive the state: an `Extension` layer on the router
pub type SharedState = Arc<RwLock<AppState>>;

impl AppState {
    pub fn new(db: SqlitePool, config: &AppConfig) -> Self {
        Self {
            accounts: Arc::new(AccountStore::new(db)),
            tokens: Arc::new(TokenIssuer::from_config(config)),
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}
