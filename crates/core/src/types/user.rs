//! User identity as supplied by the sign-in flow.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;

/// The signed-in user's profile.
///
/// Mirrors the demo users API record; fields the client does not use
/// (address, company) are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable identifier, used to partition per-user storage.
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}
