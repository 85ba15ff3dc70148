//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product as returned by the demo catalog API.
///
/// Only `id`, `title`, `price` and `image` are carried into the cart; the
/// remaining fields exist for product screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price, a JSON number on the wire.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URI.
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_record() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::Number(1));
        assert_eq!(product.price, Decimal::new(10995, 2));
        assert_eq!(product.category, "men's clothing");
    }
}
