//! Catalog

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a catalog item, assigned by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId(value)
    }
}

/// Stock availability as reported by the catalog.
///
/// The backend does not always report availability; an unknown status is
/// treated as sellable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// The item is available for purchase.
    InStock,

    /// The item is out of stock and cannot be added to a cart.
    OutOfStock,

    /// Availability was not reported.
    #[default]
    Unknown,
}

impl StockStatus {
    /// Whether an item with this status may be added to a cart.
    #[must_use]
    pub fn is_sellable(self) -> bool {
        !matches!(self, StockStatus::OutOfStock)
    }
}

/// A purchasable product as known to the cart.
///
/// Catalog items are owned by the catalog/API layer and are immutable once
/// fetched; the cart only snapshots them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Backend identifier, unique across the catalog.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Regular unit price, in Tunisian dinars.
    pub list_price: Decimal,

    /// Promotional unit price, if a promotion is configured.
    #[serde(default)]
    pub promo_price: Option<Decimal>,

    /// Expiration of the promotional price.
    #[serde(default)]
    pub promo_expiration: Option<Timestamp>,

    /// Opaque image reference, resolved to a URL by the asset layer.
    #[serde(default)]
    pub image_ref: Option<String>,

    /// Stock availability.
    #[serde(default)]
    pub stock: StockStatus,
}
