//! Persistent key-value storage for cart snapshots and the signed-in user.
//!
//! The cart store only needs scoped string storage: one key per identity
//! scope, written as a full-state overwrite. Backends implement
//! [`KeyValueStore`] and are shared as `Arc<dyn KeyValueStore>`.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, for tests and ephemeral sessions
//! - [`FileStore`] - one file per key under a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur in a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backend is not reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Async string storage addressed by arbitrary keys.
///
/// Operations are per-key; no multi-key transactions are offered.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
