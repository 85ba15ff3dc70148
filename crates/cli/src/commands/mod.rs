//! Command implementations.

pub mod cart;
pub mod session;

use storefront_mobile_cart::{CartConfig, CartStore, IdentityProvider, Result};

/// The identity and cart opened for one CLI invocation.
pub struct Client {
    pub identity: IdentityProvider,
    pub cart: CartStore,
}

impl Client {
    /// Open the configured store, restore the signed-in user and load
    /// their cart.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the storage backend cannot be opened.
    pub async fn open(config: &CartConfig) -> Result<Self> {
        let storage = config.open_store().await?;
        let identity = IdentityProvider::restore(storage.clone()).await;
        let cart = CartStore::open(storage, identity.subscribe()).await;
        tracing::debug!(scope = %cart.scope(), "Cart loaded");

        Ok(Self { identity, cart })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use storefront_mobile_cart::{Error, StoreBackend, StoreError};

    use super::*;

    fn config(data_dir: std::path::PathBuf, backend: StoreBackend) -> CartConfig {
        CartConfig {
            data_dir,
            backend,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[tokio::test]
    async fn test_open_memory_backend() {
        let client = Client::open(&config("unused".into(), StoreBackend::Memory))
            .await
            .unwrap();

        assert!(client.identity.current().is_none());
        assert!(client.cart.snapshot().is_ready());
        assert!(client.cart.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_open_reports_unusable_data_dir() {
        // A regular file where the data directory should be.
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = Client::open(&config(file.path().to_path_buf(), StoreBackend::File)).await;

        assert!(matches!(result, Err(Error::Store(StoreError::Io { .. }))));
    }
}
