//! Pricing

use rust_decimal::Decimal;

use crate::catalog::CatalogItem;

/// Resolves the unit price actually charged for a catalog item.
///
/// The promotional price applies when both `promo_price` and
/// `promo_expiration` are present. The expiration is deliberately not compared
/// against the clock: its presence alone enables the promotion, matching the
/// storefront's observed discount behaviour.
///
/// An item with a positive list price never resolves to a non-positive price;
/// a malformed promotion falls back to the list price.
#[must_use]
pub fn effective_price(item: &CatalogItem) -> Decimal {
    let resolved = match (item.promo_price, item.promo_expiration) {
        (Some(promo), Some(_)) => promo,
        _ => item.list_price,
    };

    if resolved <= Decimal::ZERO && item.list_price > Decimal::ZERO {
        return item.list_price;
    }

    resolved
}
