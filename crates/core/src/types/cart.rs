//! Cart line type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// One product entry in the cart.
///
/// `title`, `price` and `image` are a snapshot of the catalog record taken
/// when the product was first added; they are never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    /// Always >= 1 while the line is in a cart.
    pub quantity: u64,
}

impl CartLine {
    /// Start a new line for `product` with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Unit price multiplied by quantity.
    ///
    /// Saturates at `Decimal::MAX` (or `MIN` for a negative price) instead
    /// of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or_else(|| saturated(self.price))
    }
}

/// Add two amounts, saturating in the direction of the overflow.
#[must_use]
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| saturated(b))
}

fn saturated(toward: Decimal) -> Decimal {
    if toward.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}
