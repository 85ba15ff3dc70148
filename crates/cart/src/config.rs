//! Cart subsystem configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_DATA_DIR` - Directory for the file store (default: `.storefront`)
//! - `STOREFRONT_STORE_BACKEND` - `file` or `memory` (default: `file`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g. `development`)

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::storage::{FileStore, KeyValueStore, MemoryStore, StoreError};

const DEFAULT_DATA_DIR: &str = ".storefront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which [`KeyValueStore`] implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Files under [`CartConfig::data_dir`]; survives restarts.
    #[default]
    File,
    /// Process-local map; nothing survives the process.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}

/// Cart subsystem configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory used by the file backend
    pub data_dir: PathBuf,
    /// Storage backend selection
    pub backend: StoreBackend,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("STOREFRONT_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let backend = lookup("STOREFRONT_STORE_BACKEND")
            .map(|v| v.parse::<StoreBackend>())
            .transpose()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_STORE_BACKEND".to_string(), e))?
            .unwrap_or_default();

        Ok(Self {
            data_dir,
            backend,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }

    /// Open the configured storage backend.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file backend's directory cannot be created.
    pub async fn open_store(&self) -> Result<Arc<dyn KeyValueStore>, StoreError> {
        let store: Arc<dyn KeyValueStore> = match self.backend {
            StoreBackend::File => Arc::new(FileStore::open(&self.data_dir).await?),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        Ok(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".storefront"));
        assert_eq!(config.backend, StoreBackend::File);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("STOREFRONT_DATA_DIR", "/var/lib/storefront"),
            ("STOREFRONT_STORE_BACKEND", "Memory"),
            ("SENTRY_ENVIRONMENT", "staging"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/storefront"));
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
    }

    #[test]
    fn test_invalid_backend() {
        let err = CartConfig::from_lookup(lookup(&[("STOREFRONT_STORE_BACKEND", "redis")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "STOREFRONT_STORE_BACKEND"));
    }

    #[tokio::test]
    async fn test_open_file_store_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = CartConfig {
            data_dir: dir.path().join("nested/data"),
            backend: StoreBackend::File,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let store = config.open_store().await.unwrap();
        store.set("cart_guest", "[]").await.unwrap();
        assert!(dir.path().join("nested/data/cart_guest").exists());
    }
}
