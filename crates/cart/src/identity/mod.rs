//! Identity source for the cart subsystem.
//!
//! Holds the signed-in [`UserProfile`] (or `None`) and publishes every
//! change through a `tokio::sync::watch` channel, which is what the cart
//! store observes to re-scope itself. The profile is persisted under
//! [`USER_TOKEN_KEY`] so a restarted client comes back signed in.
//!
//! Resolving a login (looking the user up remotely) happens outside this
//! module; callers hand a resolved profile to [`IdentityProvider::sign_in`].

mod error;

pub use error::IdentityError;

use std::sync::Arc;

use storefront_mobile_core::UserProfile;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::storage::KeyValueStore;

/// Storage key for the persisted signed-in user.
pub const USER_TOKEN_KEY: &str = "userToken";

/// Owner of the current user identity.
pub struct IdentityProvider {
    storage: Arc<dyn KeyValueStore>,
    current: watch::Sender<Option<UserProfile>>,
}

impl IdentityProvider {
    /// Create a signed-out provider.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (current, _) = watch::channel(None);
        Self { storage, current }
    }

    /// Create a provider and restore any persisted sign-in.
    pub async fn restore(storage: Arc<dyn KeyValueStore>) -> Self {
        let provider = Self::new(storage);
        provider.check_persisted().await;
        provider
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current(&self) -> Option<UserProfile> {
        self.current.borrow().clone()
    }

    /// Observe identity changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<UserProfile>> {
        self.current.subscribe()
    }

    /// Re-read the persisted user. A missing or unreadable record leaves
    /// the provider signed out.
    #[instrument(skip(self))]
    pub async fn check_persisted(&self) {
        let user = match self.storage.get(USER_TOKEN_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable persisted user");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted user");
                None
            }
        };

        match &user {
            Some(u) => {
                set_sentry_user(&u.id, Some(u.email.as_str()));
                info!(user_id = %u.id, "Restored signed-in user");
            }
            None => clear_sentry_user(),
        }
        self.current.send_replace(user);
    }

    /// Persist `user` and make it the current identity.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the profile cannot be persisted; the
    /// current identity is left unchanged in that case.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn sign_in(&self, user: UserProfile) -> Result<(), IdentityError> {
        let raw = serde_json::to_string(&user)?;
        self.storage.set(USER_TOKEN_KEY, &raw).await?;

        set_sentry_user(&user.id, Some(user.email.as_str()));
        info!("User signed in");
        self.current.send_replace(Some(user));
        Ok(())
    }

    /// Forget the persisted user and sign out.
    ///
    /// The identity is cleared even if deleting the persisted record fails.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        if let Err(e) = self.storage.delete(USER_TOKEN_KEY).await {
            warn!(error = %e, "Failed to delete persisted user");
        }

        clear_sentry_user();
        info!("User signed out");
        self.current.send_replace(None);
    }
}
