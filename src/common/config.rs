// src/common/config.rs
//! Application configuration loaded once at startup
//!
//! Every setting comes from the process environment (after `.env` has been
//! loaded). The resulting `AppConfig` is passed explicitly to whatever needs
//! it; nothing reads the environment after startup.

use std::env;
use thiserror::Error;
use tracing::warn;

const DEFAULT_DATABASE_URL: &str = "sqlite://neurodetect.db";
const DEFAULT_JWT_SECRET: &str = "replace_with_strong_secret";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_lifetime_secs: i64,
    pub refresh_token_lifetime_secs: i64,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub reset_db: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            access_token_lifetime_secs: 5 * 60,
            refresh_token_lifetime_secs: 24 * 60 * 60,
            port: 8000,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
            reset_db: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// defaults for anything the lookup does not provide.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("DATABASE_URL") {
            if url.trim().is_empty() {
                return Err(ConfigError::Empty("DATABASE_URL"));
            }
            config.database_url = url;
        }

        match lookup("JWT_SECRET") {
            Some(secret) if secret.is_empty() => return Err(ConfigError::Empty("JWT_SECRET")),
            Some(secret) => config.jwt_secret = secret,
            None => warn!("JWT_SECRET not set, falling back to the development secret"),
        }

        if let Some(v) = lookup("ACCESS_TOKEN_LIFETIME_SECS") {
            config.access_token_lifetime_secs = parse_lifetime("ACCESS_TOKEN_LIFETIME_SECS", &v)?;
        }
        if let Some(v) = lookup("REFRESH_TOKEN_LIFETIME_SECS") {
            config.refresh_token_lifetime_secs =
                parse_lifetime("REFRESH_TOKEN_LIFETIME_SECS", &v)?;
        }

        if let Some(v) = lookup("PORT") {
            config.port = v.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: v.clone(),
            })?;
        }

        if let Some(v) = lookup("CORS_ORIGINS") {
            config.cors_origins = split_origins(&v);
        }

        if let Some(v) = lookup("RESET_DB") {
            config.reset_db = v.trim().eq_ignore_ascii_case("true");
        }

        Ok(config)
    }
}

fn parse_lifetime(name: &'static str, value: &str) -> Result<i64, ConfigError> {
    match value.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
