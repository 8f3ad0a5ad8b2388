//! Cart store
//!
//! Application-root owned cart service. All cart mutations from every surface
//! (header icon, cart page, checkout, upsell widgets) go through this store,
//! and every mutation synchronously persists a full snapshot.

use rust_decimal::Decimal;
use tracing::{error, warn};

use crate::{
    cart::{
        AddOutcome, Cart, CartLine,
        persistence::{self, CART_STORAGE_KEY, SnapshotStorage},
    },
    catalog::{CatalogItem, ItemId},
    pricing::effective_price,
};

/// Persisted cart with the operation set every UI surface funnels through.
///
/// Persistence failures are recovered locally: a missing or unreadable
/// snapshot restores as an empty cart and a failed write is logged, never
/// surfaced. The cart itself stays authoritative in memory.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
}

impl<S: SnapshotStorage> CartStore<S> {
    /// Opens the store, restoring any previously persisted cart from the
    /// default storage key.
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Opens the store under a caller-chosen storage key.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let cart = match storage.read(&key) {
            Ok(Some(raw)) => match persistence::decode_snapshot(&raw) {
                Ok(cart) => cart,
                Err(err) => {
                    warn!(error = %err, "stored cart snapshot is unreadable, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                warn!(error = %err, "cart storage could not be read, starting empty");
                Cart::new()
            }
        };

        CartStore { cart, storage, key }
    }

    /// Adds `quantity` units of an item, then persists.
    ///
    /// Out-of-stock items are rejected with a notice and nothing is persisted.
    pub fn add_to_cart(&mut self, item: CatalogItem, quantity: u32) -> AddOutcome {
        let outcome = self.cart.add(item, quantity);

        if outcome == AddOutcome::Added {
            self.persist();
        }

        outcome
    }

    /// Removes the line for an item id, then persists. Absent ids are a no-op.
    pub fn remove_from_cart(&mut self, id: ItemId) {
        self.cart.remove(id);
        self.persist();
    }

    /// Sets the quantity for an item id (zero removes the line), then
    /// persists.
    pub fn update_quantity(&mut self, id: ItemId, quantity: u32) {
        self.cart.set_quantity(id, quantity);
        self.persist();
    }

    /// Empties the cart, then persists.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    /// Sum of line totals at effective unit prices.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Effective unit price of an item, for per-line display.
    #[must_use]
    pub fn unit_price(&self, item: &CatalogItem) -> Decimal {
        effective_price(item)
    }

    /// The current lines, in add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Read access to the underlying cart.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn persist(&mut self) {
        let raw = match persistence::encode_snapshot(&self.cart) {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, "cart snapshot could not be serialized");
                return;
            }
        };

        if let Err(err) = self.storage.write(&self.key, &raw) {
            error!(error = %err, "cart snapshot could not be persisted");
        }
    }
}
