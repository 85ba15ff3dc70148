//! Core types for the storefront mobile client.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod user;

pub use cart::CartLine;
pub use email::{Email, EmailError};
pub use id::{ProductId, UserId};
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use user::UserProfile;
