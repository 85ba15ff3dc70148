//! Identifiers for catalog products and users.
//!
//! The demo catalog hands out numeric product IDs, but cart snapshots written
//! by other clients may carry string IDs, so [`ProductId`] accepts both.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A catalog product identifier.
///
/// Serialized untagged: `7` and `"sku-7"` are both valid on the wire.
///
/// ```
/// use storefront_mobile_core::ProductId;
///
/// assert_eq!("42".parse::<ProductId>(), Ok(ProductId::Number(42)));
/// assert_eq!("sku-42".parse::<ProductId>(), Ok(ProductId::Text("sku-42".to_owned())));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric ID, as issued by the demo catalog.
    Number(i64),
    /// Opaque string ID.
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl FromStr for ProductId {
    type Err = core::convert::Infallible;

    /// Integers parse as [`ProductId::Number`], everything else is kept as text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>().map_or_else(|_| Self::Text(s.to_owned()), Self::Number))
    }
}

/// A user identifier from the identity source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Create a new ID from an i64 value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_wire_forms() {
        let ids: Vec<ProductId> = serde_json::from_str(r#"[3, "abc"]"#).unwrap();
        assert_eq!(ids, vec![ProductId::Number(3), ProductId::Text("abc".to_owned())]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[3,"abc"]"#);
    }

    #[test]
    fn test_numeric_and_text_ids_are_distinct() {
        assert_ne!(ProductId::Number(3), ProductId::Text("3".to_owned()));
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::new(10).to_string(), "10");
    }
}
