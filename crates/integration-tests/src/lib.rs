//! Integration tests for the storefront mobile cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-mobile-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Restart round-trips against the file store
//! - `identity_scoping` - Cart isolation across sign-in and sign-out
//!
//! This library holds shared fixtures for those tests.

use rust_decimal::Decimal;
use storefront_mobile_core::{Email, Product, ProductId, UserId, UserProfile};

/// A catalog product shaped like the demo API's records.
#[must_use]
pub fn product(id: i64, title: &str, cents: i64) -> Product {
    Product {
        id: ProductId::Number(id),
        title: title.to_owned(),
        price: Decimal::new(cents, 2),
        image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        description: format!("{title} description"),
        category: "electronics".to_owned(),
    }
}

/// A demo user.
///
/// # Panics
///
/// Panics if the generated email is invalid (it never is).
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn user(id: i64, username: &str) -> UserProfile {
    UserProfile {
        id: UserId::new(id),
        name: format!("{username} Tester"),
        username: username.to_owned(),
        email: Email::parse(&format!("{}@example.com", username.to_lowercase())).unwrap(),
        phone: None,
        website: None,
    }
}
