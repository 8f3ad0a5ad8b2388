//! Cart
//!
//! The cart is an ordered collection of lines, one per catalog item, with all
//! totals derived from the current lines. [`store::CartStore`] wraps it with
//! snapshot persistence; every mutation funnels through the operations here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    catalog::{CatalogItem, ItemId},
    pricing::effective_price,
};

pub mod persistence;
pub mod store;

/// One (item, quantity) pairing inside a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the catalog item when it was added.
    pub item: CatalogItem,

    /// Units of the item in the cart, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Unit price charged for this line.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        effective_price(&self.item)
    }

    /// Total charged for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }
}

/// Outcome of an add operation.
///
/// An out-of-stock rejection is a user-visible notice, not an error: it blocks
/// that single add and leaves the cart untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an out-of-stock rejection must be surfaced to the user"]
pub enum AddOutcome {
    /// The item was added (or its existing line's quantity increased).
    Added,

    /// The item is out of stock and was not added.
    RejectedOutOfStock,
}

/// Ordered collection of cart lines, keyed by item id.
///
/// Invariants: at most one line per item id, every quantity at least 1.
/// Insertion order is the add order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: SmallVec<[CartLine; 4]>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuilds a cart from previously captured lines.
    ///
    /// Lines with a duplicate item id are merged into the earlier line and
    /// zero-quantity lines are dropped, so a snapshot from any source still
    /// upholds the cart invariants.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();

        for line in lines {
            if line.quantity == 0 {
                continue;
            }

            match cart.line_mut(line.item.id) {
                Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
                None => cart.lines.push(line),
            }
        }

        cart
    }

    /// Adds `quantity` units of an item, merging into an existing line for the
    /// same item id. A quantity of zero is treated as 1.
    ///
    /// Out-of-stock items are rejected with [`AddOutcome::RejectedOutOfStock`].
    pub fn add(&mut self, item: CatalogItem, quantity: u32) -> AddOutcome {
        if !item.stock.is_sellable() {
            return AddOutcome::RejectedOutOfStock;
        }

        let quantity = quantity.max(1);

        match self.line_mut(item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { item, quantity }),
        }

        AddOutcome::Added
    }

    /// Removes the line for an item id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: ItemId) {
        self.lines.retain(|line| line.item.id != id);
    }

    /// Sets the quantity of the line for an item id.
    ///
    /// A quantity of zero removes the line, exactly like [`Cart::remove`].
    /// Setting a quantity for an absent id is a no-op.
    pub fn set_quantity(&mut self, id: ItemId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines, saturating like the per-line
    /// quantities do.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc: u32, line| acc.saturating_add(line.quantity))
    }

    /// Sum of line totals, at effective unit prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc + line.line_total())
    }

    /// The line for an item id, if present.
    #[must_use]
    pub fn line(&self, id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    /// All lines, in add order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == id)
    }
}
