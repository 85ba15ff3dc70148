//! Identity scopes: the storage partition a cart belongs to.

use core::fmt;

use storefront_mobile_core::UserProfile;

/// Scope id used when nobody is signed in.
pub const GUEST_SCOPE_ID: &str = "guest";

/// Prefix of every cart snapshot key.
pub const CART_KEY_PREFIX: &str = "cart_";

/// The storage partition derived from the current user.
///
/// Exactly one scope is active at a time; the in-memory cart always
/// reflects the persisted snapshot of that scope and no other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum IdentityScope {
    /// No signed-in user.
    #[default]
    Guest,
    /// A signed-in user, keyed by their stable ID.
    User(String),
}

impl IdentityScope {
    /// Derive the scope for an optional signed-in user.
    #[must_use]
    pub fn from_user(user: Option<&UserProfile>) -> Self {
        user.map_or(Self::Guest, |u| Self::User(u.id.to_string()))
    }

    /// The scope id (`guest` or the user's ID).
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Guest => GUEST_SCOPE_ID,
            Self::User(id) => id,
        }
    }

    /// Key under which this scope's cart snapshot is stored.
    ///
    /// ```
    /// use storefront_mobile_cart::IdentityScope;
    ///
    /// assert_eq!(IdentityScope::Guest.storage_key(), "cart_guest");
    /// assert_eq!(IdentityScope::User("7".into()).storage_key(), "cart_7");
    /// ```
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{CART_KEY_PREFIX}{}", self.id())
    }
}

impl fmt::Display for IdentityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
