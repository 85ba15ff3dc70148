//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! sm-cli cart show
//! sm-cli cart add --id 3 --title "Mens Cotton Jacket" --price 55.99
//! sm-cli cart remove 3
//! sm-cli cart set-qty 3 2
//! ```

use rust_decimal::Decimal;
use storefront_mobile_core::{CurrencyCode, Price, Product, ProductId};
use tracing::info;

use super::Client;

/// Log every line and the total.
pub fn show(client: &Client) {
    let snapshot = client.cart.snapshot();
    info!("Cart ({})", snapshot.scope());

    if snapshot.is_empty() {
        info!("  Your cart is empty");
        return;
    }

    for line in snapshot.lines() {
        info!(
            "  [{}] {} x{} @ {} = {}",
            line.id,
            line.title,
            line.quantity,
            Price::new(line.price, CurrencyCode::USD),
            Price::new(line.line_total(), CurrencyCode::USD)
        );
    }
    info!("  Items: {}", snapshot.item_count());
    info!("  Total: {}", snapshot.total());
}

/// Add one unit of a product described on the command line.
pub async fn add(client: &Client, id: ProductId, title: String, price: Decimal, image: String) {
    let product = Product {
        id,
        title,
        price,
        image,
        description: String::new(),
        category: String::new(),
    };

    client.cart.add_to_cart(&product).await;
    info!("{} has been added to your cart.", product.title);
    info!("Total: {}", client.cart.total());
}

pub async fn remove(client: &Client, id: &ProductId) {
    client.cart.remove_from_cart(id).await;
    info!("Removed {id}. Total: {}", client.cart.total());
}

pub async fn set_quantity(client: &Client, id: &ProductId, quantity: i64) {
    client.cart.update_quantity(id, quantity).await;
    match client.cart.snapshot().line(id) {
        Some(line) => info!("{} now x{}", line.title, line.quantity),
        None => info!("{id} is not in the cart"),
    }
    info!("Total: {}", client.cart.total());
}
