//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// The demo catalog quotes everything in US dollars; the currency is carried
/// so display formatting does not have to assume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::USD)
    }

    /// Round the amount to cents, with ties rounded away from zero
    /// (`0.125` becomes `0.13`).
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(round_cents(self.amount), self.currency_code)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    /// Formats as symbol plus two decimals, e.g. `$25.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{:.2}",
            self.currency_code.symbol(),
            round_cents(self.amount)
        )
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_cents() {
        let price = Price::new(Decimal::new(255, 1), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$25.50");
        assert_eq!(Price::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_rounded() {
        let price = Price::new(Decimal::new(10_004, 3), CurrencyCode::GBP).rounded();
        assert_eq!(price.amount, Decimal::new(1000, 2));
        assert_eq!(price.to_string(), "£10.00");
    }

    #[test]
    fn test_ties_round_up() {
        let price = Price::new(Decimal::new(125, 3), CurrencyCode::USD);
        assert_eq!(price.rounded().amount, Decimal::new(13, 2));
        assert_eq!(price.to_string(), "$0.13");

        let price = Price::new(Decimal::new(10_005, 3), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$10.01");
    }
}
