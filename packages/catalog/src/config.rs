use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Default lifetime of a signed avatar URL (7 days)
const DEFAULT_AVATAR_URL_TTL_SECS: u64 = 604_800;

/// Default upper bound for an avatar upload (5 MiB)
const DEFAULT_AVATAR_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub blob_store_url: String,
    pub blob_store_token: String,
    pub blob_signing_secret: String,
    pub avatar_url_ttl: Duration,
    pub avatar_max_bytes: usize,
}

impl Config {
    /// Only the database URL; enough for schema migrations
    pub fn database_url_from_env() -> Result<String> {
        // Load .env file if present (development)
        let _ = dotenv();
        env::var("DATABASE_URL").context("DATABASE_URL must be set")
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: Self::database_url_from_env()?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            blob_store_url: env::var("BLOB_STORE_URL").context("BLOB_STORE_URL must be set")?,
            blob_store_token: env::var("BLOB_STORE_TOKEN")
                .context("BLOB_STORE_TOKEN must be set")?,
            blob_signing_secret: env::var("BLOB_SIGNING_SECRET")
                .context("BLOB_SIGNING_SECRET must be set")?,
            avatar_url_ttl: Duration::from_secs(
                env::var("AVATAR_URL_TTL_SECS")
                    .ok()
                    .map(|v| v.parse())
                    .transpose()
                    .context("AVATAR_URL_TTL_SECS must be a valid number of seconds")?
                    .unwrap_or(DEFAULT_AVATAR_URL_TTL_SECS),
            ),
            avatar_max_bytes: env::var("AVATAR_MAX_BYTES")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("AVATAR_MAX_BYTES must be a valid number")?
                .unwrap_or(DEFAULT_AVATAR_MAX_BYTES),
        })
    }
}
