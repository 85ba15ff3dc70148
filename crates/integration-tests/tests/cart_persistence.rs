//! Integration tests for cart persistence across restarts.
//!
//! Each "restart" drops the store and opens a new one over the same data
//! directory, the way the client does on app launch.

use std::sync::Arc;

use rust_decimal::Decimal;
use storefront_mobile_cart::{CartStore, FileStore, IdentityProvider, KeyValueStore};
use storefront_mobile_core::ProductId;
use storefront_mobile_integration_tests::{product, user};

async fn launch(dir: &std::path::Path) -> (IdentityProvider, CartStore) {
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir).await.unwrap());
    let identity = IdentityProvider::restore(storage.clone()).await;
    let cart = CartStore::open(storage, identity.subscribe()).await;
    (identity, cart)
}

#[tokio::test]
async fn test_guest_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (_identity, cart) = launch(dir.path()).await;
    cart.add_to_cart(&product(1, "Backpack", 10995)).await;
    cart.add_to_cart(&product(2, "T-Shirt", 2230)).await;
    cart.add_to_cart(&product(1, "Backpack", 10995)).await;
    cart.update_quantity(&ProductId::Number(2), 4).await;
    cart.flush().await;
    let before = cart.lines();
    drop(cart);

    let (_identity, cart) = launch(dir.path()).await;
    assert_eq!(cart.lines(), before);
    assert_eq!(cart.total().amount, Decimal::new(30910, 2));
    assert_eq!(cart.total().to_string(), "$309.10");
}

#[tokio::test]
async fn test_signed_in_user_and_cart_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (identity, cart) = launch(dir.path()).await;
    identity.sign_in(user(1, "Bret")).await.unwrap();
    cart.ready_for(&storefront_mobile_cart::IdentityScope::User("1".to_owned()))
        .await;
    cart.add_to_cart(&product(9, "Hard Drive", 6400)).await;
    cart.flush().await;
    drop((identity, cart));

    let (identity, cart) = launch(dir.path()).await;
    assert_eq!(identity.current().map(|u| u.username), Some("Bret".to_owned()));
    assert_eq!(cart.scope().storage_key(), "cart_1");
    assert_eq!(cart.item_count(), 1);
    assert!(dir.path().join("cart_1").exists());
    assert!(dir.path().join("userToken").exists());
}

#[tokio::test]
async fn test_corrupt_file_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart_guest"), "[{\"id\": 1, \"quantity\":").unwrap();

    let (_identity, cart) = launch(dir.path()).await;
    assert!(cart.snapshot().is_ready());
    assert!(cart.snapshot().is_empty());

    // The next edit overwrites the corrupt snapshot.
    cart.add_to_cart(&product(1, "Backpack", 10995)).await;
    cart.flush().await;
    drop(cart);

    let (_identity, cart) = launch(dir.path()).await;
    assert_eq!(cart.item_count(), 1);
}
