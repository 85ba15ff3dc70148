//! Error types and Sentry helpers.
//!
//! Cart operations themselves never fail: load and save problems are logged
//! and swallowed. The errors here cover setup (configuration, opening a
//! store) and the sign-in flow, where the caller does need to know.

use thiserror::Error;

use crate::config::ConfigError;
use crate::identity::IdentityError;
use crate::storage::StoreError;

/// Top-level error for wiring up the cart subsystem.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Sign-in or sign-out failed.
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),
}

/// Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Set the Sentry user context from a user ID.
///
/// Call this after sign-in so errors are associated with the user.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a user action.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "3")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(StoreError::InvalidKey("../x".to_string()));
        assert_eq!(err.to_string(), r#"Storage error: invalid storage key: "../x""#);

        let err = Error::from(ConfigError::InvalidEnvVar(
            "STOREFRONT_STORE_BACKEND".to_string(),
            "unknown backend: redis".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Config error: Invalid environment variable STOREFRONT_STORE_BACKEND: unknown backend: redis"
        );
    }

    #[test]
    fn test_sentry_helpers_without_client() {
        // No Sentry client is bound in tests; the helpers must be no-ops.
        set_sentry_user(&42, Some("Sincere@april.biz"));
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "1")]));
        clear_sentry_user();
    }
}
