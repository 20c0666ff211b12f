use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, IntoConnectionInfo};

use super::{RecordStore, StoreError};
use crate::config::Config;

/// Shareable Redis client for use across async handlers
///
/// Wraps a connection manager: clones share one multiplexed socket, and when
/// that socket drops the manager reconnects in the background. The command
/// that hit the dropped socket still fails; later commands use the new one.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis using the provided config and verify the connection.
    ///
    /// The address, password and database index are fixed for the lifetime
    /// of the returned client. A failed `PING` is reported as an error so the
    /// caller can abort startup instead of serving requests it cannot answer.
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut info = format!("redis://{}", config.redis_addr)
            .into_connection_info()
            .with_context(|| format!("Invalid REDIS_ADDR '{}'", config.redis_addr))?;
        info.redis.db = config.redis_db;
        info.redis.password = config.redis_password.clone();

        let client = Client::open(info).context("Failed to create Redis client")?;

        tracing::info!(
            "Connecting to Redis at {} (db {})",
            config.redis_addr,
            config.redis_db
        );

        let conn = client
            .get_connection_manager()
            .await
            .with_context(|| format!("Could not connect to Redis at {}", config.redis_addr))?;

        let store = Self { conn };
        store
            .ping()
            .await
            .with_context(|| format!("Redis at {} did not answer PING", config.redis_addr))?;

        tracing::info!("Successfully connected to Redis at {}", config.redis_addr);
        Ok(store)
    }
}

#[async_trait]
impl RecordStore for RedisStore {
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(pattern).await?;
        tracing::debug!("KEYS {} matched {} keys", pattern, keys.len());
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn.clone();
        // Raw bytes: whether they are valid JSON is for the caller to decide
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
