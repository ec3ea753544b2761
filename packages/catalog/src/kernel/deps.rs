//! Server dependencies shared by every domain activity
//!
//! External services sit behind trait objects so tests can swap in doubles.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::kernel::{BaseBlobStore, HttpBlobStore};

#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub blob_store: Arc<dyn BaseBlobStore>,
    /// Lifetime of signed avatar URLs handed to readers
    pub avatar_url_ttl: Duration,
    /// Largest accepted avatar upload in bytes
    pub avatar_max_bytes: usize,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        blob_store: Arc<dyn BaseBlobStore>,
        avatar_url_ttl: Duration,
        avatar_max_bytes: usize,
    ) -> Self {
        Self {
            db_pool,
            blob_store,
            avatar_url_ttl,
            avatar_max_bytes,
        }
    }

    /// Connect to the database and build the production blob store client
    pub async fn from_config(config: &Config) -> Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        let blob_store = HttpBlobStore::new(
            &config.blob_store_url,
            config.blob_store_token.clone(),
            config.blob_signing_secret.clone(),
        )?;

        Ok(Self::new(
            db_pool,
            Arc::new(blob_store),
            config.avatar_url_ttl,
            config.avatar_max_bytes,
        ))
    }
}
