//! Identity error types.

use thiserror::Error;

use crate::storage::StoreError;

/// Errors that can occur while changing the signed-in user.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The profile could not be serialized.
    #[error("failed to encode user profile: {0}")]
    Encode(#[from] serde_json::Error),

    /// The profile could not be persisted.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
