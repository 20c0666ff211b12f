//! Key-value store access for serialized Pokémon records.
//!
//! The rest of the service only talks to the [`RecordStore`] trait, so the
//! Redis-backed client can be swapped for an in-memory store in tests.

mod redis_store;

#[cfg(test)]
pub mod memory;

pub use redis_store::RedisStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a record store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or rejected a command.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Read-only view of a key-value store holding JSON documents.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Return every key matching a glob-style pattern (`*`, `?`, `[...]`).
    ///
    /// Order is whatever the backend returns.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>, StoreError>;

    /// Fetch the raw bytes stored under `key`, or `None` if it does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Round-trip a no-op command to verify connectivity.
    async fn ping(&self) -> Result<(), StoreError>;
}
