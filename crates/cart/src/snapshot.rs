//! Serialized cart format.
//!
//! A snapshot is a JSON array of lines:
//!
//! ```json
//! [{"id": 1, "title": "Backpack", "price": 109.95, "image": "https://...", "quantity": 2}]
//! ```
//!
//! Decoding enforces the cart invariants, so a snapshot that would produce a
//! zero-quantity or duplicated line is rejected as a whole.

use std::collections::HashSet;

use rust_decimal::Decimal;
use storefront_mobile_core::{CartLine, ProductId};
use thiserror::Error;

/// Errors produced while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Not valid JSON, or not shaped like a list of cart lines.
    #[error("malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A line carries quantity 0.
    #[error("cart line {0} has zero quantity")]
    ZeroQuantity(ProductId),

    /// A line carries a negative unit price.
    #[error("cart line {0} has a negative price")]
    NegativePrice(ProductId),

    /// Two lines share one product ID.
    #[error("cart line {0} appears more than once")]
    DuplicateLine(ProductId),
}

/// Serialize the full cart.
///
/// # Errors
///
/// Returns `SnapshotError::Malformed` if serialization fails.
pub fn encode(lines: &[CartLine]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(lines)?)
}

/// Parse and validate a stored snapshot.
///
/// # Errors
///
/// Returns an error if the text is not a list of cart lines or if any line
/// breaks the cart invariants.
pub fn decode(raw: &str) -> Result<Vec<CartLine>, SnapshotError> {
    let lines: Vec<CartLine> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(lines.len());
    for line in &lines {
        if line.quantity == 0 {
            return Err(SnapshotError::ZeroQuantity(line.id.clone()));
        }
        if line.price < Decimal::ZERO {
            return Err(SnapshotError::NegativePrice(line.id.clone()));
        }
        if !seen.insert(&line.id) {
            return Err(SnapshotError::DuplicateLine(line.id.clone()));
        }
    }

    Ok(lines)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const STORED: &str = r#"[
        {"id": 1, "title": "Backpack", "price": 109.95, "image": "https://img/1.jpg", "quantity": 2},
        {"id": "sku-9", "title": "Slim Fit T-Shirt", "price": 22.3, "image": "https://img/2.jpg", "quantity": 1}
    ]"#;

    #[test]
    fn test_decode_valid() {
        let lines = decode(STORED).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].id, ProductId::Number(1));
        assert_eq!(lines[0].price, Decimal::new(10995, 2));
        assert_eq!(lines[1].id, ProductId::Text("sku-9".to_owned()));
    }

    #[test]
    fn test_encode_writes_numeric_price() {
        let lines = decode(STORED).unwrap();
        let json = encode(&lines).unwrap();
        assert!(json.contains(r#""price":109.95"#));
        assert_eq!(decode(&json).unwrap(), lines);
    }

    #[test]
    fn test_decode_tolerates_extra_fields() {
        let raw = r#"[{"id": 4, "title": "Mens Casual Slim Fit", "price": 15.99,
            "image": "https://img/4.jpg", "quantity": 1, "category": "men's clothing",
            "rating": {"rate": 2.1, "count": 430}}]"#;
        assert_eq!(decode(raw).unwrap()[0].quantity, 1);
    }

    #[test]
    fn test_decode_rejects_broken_snapshots() {
        assert!(matches!(decode("not json"), Err(SnapshotError::Malformed(_))));
        assert!(matches!(decode(r#"{"id": 1}"#), Err(SnapshotError::Malformed(_))));

        let negative_qty = r#"[{"id": 1, "title": "t", "price": 1, "image": "i", "quantity": -1}]"#;
        assert!(matches!(decode(negative_qty), Err(SnapshotError::Malformed(_))));

        let zero = r#"[{"id": 1, "title": "t", "price": 1, "image": "i", "quantity": 0}]"#;
        assert!(matches!(decode(zero), Err(SnapshotError::ZeroQuantity(_))));

        let negative_price = r#"[{"id": 1, "title": "t", "price": -1, "image": "i", "quantity": 1}]"#;
        assert!(matches!(decode(negative_price), Err(SnapshotError::NegativePrice(_))));

        let dup = r#"[
            {"id": 1, "title": "t", "price": 1, "image": "i", "quantity": 1},
            {"id": 1, "title": "t", "price": 1, "image": "i", "quantity": 3}
        ]"#;
        assert!(matches!(decode(dup), Err(SnapshotError::DuplicateLine(ProductId::Number(1)))));
    }

    #[test]
    fn test_empty_snapshot() {
        assert!(decode("[]").unwrap().is_empty());
        assert_eq!(encode(&[]).unwrap(), "[]");
    }
}
