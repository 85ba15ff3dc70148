//! Storefront Mobile Core - Shared types library.
//!
//! Shared by the other storefront mobile crates:
//! - `storefront-mobile-cart` (cart store, persistence and identity scoping)
//! - `storefront-mobile-cli` (the `sm-cli` command-line driver)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Catalog products, cart lines, prices, user identity and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
