//! Shipping

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shipping pricing rules: a flat rate waived above a free-shipping threshold.
///
/// Both the cart and checkout views derive their shipping figures from the
/// same instance, so the free-shipping banner and the checkout total cannot
/// drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingRates {
    /// Subtotal at or above which shipping is free.
    pub free_threshold: Decimal,

    /// Flat shipping cost charged below the threshold.
    pub flat_rate: Decimal,
}

impl Default for ShippingRates {
    fn default() -> Self {
        ShippingRates {
            free_threshold: Decimal::from(300),
            flat_rate: Decimal::from(10),
        }
    }
}

impl ShippingRates {
    /// Shipping cost for an order subtotal.
    #[must_use]
    pub fn shipping_cost(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_threshold {
            Decimal::ZERO
        } else {
            self.flat_rate
        }
    }

    /// Amount still missing to reach free shipping. Zero once the threshold
    /// is met.
    #[must_use]
    pub fn remaining_for_free_shipping(&self, subtotal: Decimal) -> Decimal {
        (self.free_threshold - subtotal).max(Decimal::ZERO)
    }

    /// Progress towards free shipping as a fraction, capped at 1.
    #[must_use]
    pub fn progress(&self, subtotal: Decimal) -> Percentage {
        if self.free_threshold <= Decimal::ZERO {
            return Percentage::from(1.0);
        }

        Percentage::from((subtotal / self.free_threshold).min(Decimal::ONE))
    }
}
