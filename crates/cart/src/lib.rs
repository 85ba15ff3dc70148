//! Storefront Mobile Cart - identity-scoped, persisted shopping cart.
//!
//! The cart is the only stateful piece of the storefront client: product
//! and checkout screens read it, and add/remove/quantity actions mutate it.
//! This crate keeps it consistent across sign-in changes and restarts.
//!
//! # Architecture
//!
//! - [`identity::IdentityProvider`] publishes the signed-in user
//! - [`store::CartStore`] follows those changes, re-keys to the user's
//!   [`scope::IdentityScope`] and reloads that scope's snapshot
//! - every edit is persisted through a [`storage::KeyValueStore`] under
//!   `cart_<scope>` by a background writer
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use storefront_mobile_cart::{CartStore, IdentityProvider, MemoryStore};
//!
//! # async fn demo(product: storefront_mobile_core::Product) {
//! let storage = Arc::new(MemoryStore::new());
//! let identity = IdentityProvider::restore(storage.clone()).await;
//! let cart = CartStore::open(storage, identity.subscribe()).await;
//!
//! cart.add_to_cart(&product).await;
//! println!("Total: {}", cart.total());
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod identity;
pub mod scope;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use config::{CartConfig, StoreBackend};
pub use error::{Error, Result};
pub use identity::{IdentityError, IdentityProvider};
pub use scope::IdentityScope;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use store::{CartPhase, CartSnapshot, CartStore};
