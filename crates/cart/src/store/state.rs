//! Cart state and the pure edits applied to it.
//!
//! Every edit produces a fresh line sequence; readers holding an older
//! [`CartSnapshot`] keep seeing the sequence they were handed.

use std::sync::Arc;

use rust_decimal::Decimal;
use storefront_mobile_core::types::cart::saturating_add;
use storefront_mobile_core::{CartLine, CurrencyCode, Price, Product, ProductId};

use crate::scope::IdentityScope;

/// Load state of the active scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    /// The scope changed and its snapshot has not been loaded yet.
    Loading,
    /// The lines reflect the scope's persisted data; edits apply immediately.
    Ready,
}

/// Read-only view of the cart at one point in time.
#[derive(Debug, Clone)]
pub struct CartSnapshot {
    pub(super) scope: IdentityScope,
    pub(super) phase: CartPhase,
    pub(super) lines: Arc<[CartLine]>,
    /// Bumped on every scope change; a load finishing under an older
    /// generation is stale.
    pub(super) generation: u64,
}

impl CartSnapshot {
    pub(super) fn initial() -> Self {
        Self {
            scope: IdentityScope::Guest,
            phase: CartPhase::Loading,
            lines: empty_lines(),
            generation: 0,
        }
    }

    /// The scope these lines belong to.
    #[must_use]
    pub const fn scope(&self) -> &IdentityScope {
        &self.scope
    }

    #[must_use]
    pub const fn phase(&self) -> CartPhase {
        self.phase
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == CartPhase::Ready
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of price times quantity over all lines, rounded to cents.
    ///
    /// Saturates at the `Decimal` range rather than overflowing.
    #[must_use]
    pub fn total(&self) -> Price {
        let amount = self
            .lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, saturating_add);
        Price::new(amount, CurrencyCode::USD).rounded()
    }

    /// Total number of units across all lines, saturating at `u64::MAX`.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .fold(0, |count: u64, line| count.saturating_add(line.quantity))
    }
}

pub(super) fn empty_lines() -> Arc<[CartLine]> {
    Arc::from(Vec::new())
}

/// Increment the existing line for `product`, or append a new one.
///
/// An existing line keeps its original title, price and image.
pub(super) fn with_added(lines: &[CartLine], product: &Product) -> Arc<[CartLine]> {
    if lines.iter().any(|line| line.id == product.id) {
        lines
            .iter()
            .map(|line| {
                if line.id == product.id {
                    CartLine {
                        quantity: line.quantity.saturating_add(1),
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect()
    } else {
        lines
            .iter()
            .cloned()
            .chain(std::iter::once(CartLine::from_product(product)))
            .collect()
    }
}

/// Drop the line for `id`. `None` if there is no such line.
pub(super) fn without(lines: &[CartLine], id: &ProductId) -> Option<Arc<[CartLine]>> {
    if !lines.iter().any(|line| &line.id == id) {
        return None;
    }
    Some(lines.iter().filter(|line| &line.id != id).cloned().collect())
}

/// Set the quantity of the line for `id`. `None` if there is no such line
/// or it already has that quantity.
///
/// Callers route quantities below 1 to [`without`].
pub(super) fn with_quantity(
    lines: &[CartLine],
    id: &ProductId,
    quantity: u64,
) -> Option<Arc<[CartLine]>> {
    debug_assert!(quantity >= 1);
    let current = lines.iter().find(|line| &line.id == id)?;
    if current.quantity == quantity {
        return None;
    }
    Some(
        lines
            .iter()
            .map(|line| {
                if &line.id == id {
                    CartLine {
                        quantity,
                        ..line.clone()
                    }
                } else {
                    line.clone()
                }
            })
            .collect(),
    )
}
