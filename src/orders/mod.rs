//! Orders
//!
//! The order draft assembled at submission time, the confirmed order shown on
//! the confirmation view, and the fallback that reconstructs a confirmation
//! from local data when the post-submission detail fetch fails.

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    cart::Cart,
    catalog::ItemId,
    orders::gateway::CreatedOrder,
    shipping::ShippingRates,
};

pub mod gateway;

/// Identifier of an order, assigned by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct OrderId(pub i64);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for OrderId {
    fn from(value: i64) -> Self {
        OrderId(value)
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Pay the courier on delivery.
    #[default]
    CashOnDelivery,

    /// Pay by bank card.
    BankCard,
}

/// One submitted order line: the unit price is snapshotted from the cart at
/// submission time, so catalog changes cannot alter an in-flight order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftLine {
    /// Catalog item being ordered.
    pub item_id: ItemId,

    /// Units ordered.
    pub quantity: u32,

    /// Unit price captured from the cart.
    pub unit_price: Decimal,
}

/// Separate delivery address, materialized only when it differs from billing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingAddress {
    /// Street address.
    pub address_line1: String,

    /// Address complement.
    pub address_line2: Option<String>,

    /// Resolved region.
    pub region: String,

    /// Resolved sub-region.
    pub subregion: String,

    /// Resolved locality.
    pub locality: String,

    /// Postal code, passed through as entered.
    pub postal_code: Option<String>,
}

/// Transient payload assembled from the cart and checkout form for
/// submission. Never persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    /// Customer last name.
    pub last_name: String,

    /// Customer first name.
    pub first_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Billing street address.
    pub address_line1: String,

    /// Billing address complement.
    pub address_line2: Option<String>,

    /// Billing region.
    pub region: String,

    /// Billing sub-region.
    pub subregion: String,

    /// Billing locality.
    pub locality: String,

    /// Billing postal code. Non-numeric input is coerced to `None`, not
    /// rejected.
    pub postal_code: Option<i64>,

    /// Delivery address when it differs from billing.
    pub shipping: Option<ShippingAddress>,

    /// Free-text note to the order.
    pub note: Option<String>,

    /// Chosen payment method.
    pub payment: PaymentMethod,

    /// Ordered lines with snapshotted unit prices.
    pub lines: Vec<DraftLine>,
}

impl OrderDraft {
    /// Sum of line totals at the snapshotted unit prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().fold(Decimal::ZERO, |acc, line| {
            acc + line.unit_price * Decimal::from(line.quantity)
        })
    }
}

/// A confirmed line as echoed by the backend, or reconstructed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Catalog item ordered.
    pub item_id: ItemId,

    /// Display name of the item.
    pub name: String,

    /// Units ordered.
    pub quantity: u32,

    /// Unit price charged.
    pub unit_price: Decimal,
}

/// The authoritative post-submission order record shown on the confirmation
/// view. Built from the backend's detail response when available, otherwise
/// reconstructed from local data by [`fallback_confirmation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedOrder {
    /// Server-assigned order id.
    pub id: OrderId,

    /// Human-readable order number, when the backend assigns one.
    pub numero: Option<String>,

    /// Recipient full name.
    pub recipient: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Billing address, one line.
    pub address: String,

    /// Delivery address when it differed from billing.
    pub shipping_address: Option<String>,

    /// Free-text note attached to the order.
    pub note: Option<String>,

    /// Payment method.
    pub payment: PaymentMethod,

    /// Confirmed lines.
    pub lines: Vec<OrderLine>,

    /// Sum of line totals.
    pub subtotal: Decimal,

    /// Shipping charged.
    pub shipping_cost: Decimal,

    /// Grand total.
    pub total: Decimal,
}

/// Reconstructs a confirmation from locally held data.
///
/// Used when order creation succeeded but the detail fetch failed: the user
/// must still see a confirmation, so the draft's snapshotted lines and the
/// cart's display names stand in for the backend echo. The return type is
/// identical to the fetched path, keeping the checkout transition agnostic to
/// which source produced it.
#[must_use]
pub fn fallback_confirmation(
    created: &CreatedOrder,
    draft: &OrderDraft,
    cart: &Cart,
    rates: &ShippingRates,
) -> ConfirmedOrder {
    let names: FxHashMap<ItemId, &str> = cart
        .lines()
        .iter()
        .map(|line| (line.item.id, line.item.name.as_str()))
        .collect();

    let lines: Vec<OrderLine> = draft
        .lines
        .iter()
        .map(|line| OrderLine {
            item_id: line.item_id,
            name: names
                .get(&line.item_id)
                .map_or_else(|| line.item_id.to_string(), ToString::to_string),
            quantity: line.quantity,
            unit_price: line.unit_price,
        })
        .collect();

    let subtotal = draft.subtotal();
    let shipping_cost = rates.shipping_cost(subtotal);

    ConfirmedOrder {
        id: created.id,
        numero: created.numero.clone(),
        recipient: format!("{} {}", draft.first_name, draft.last_name),
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        address: one_line_address(
            &draft.address_line1,
            draft.address_line2.as_deref(),
            &draft.locality,
            &draft.subregion,
            &draft.region,
        ),
        shipping_address: draft.shipping.as_ref().map(|shipping| {
            one_line_address(
                &shipping.address_line1,
                shipping.address_line2.as_deref(),
                &shipping.locality,
                &shipping.subregion,
                &shipping.region,
            )
        }),
        note: draft.note.clone(),
        payment: draft.payment,
        lines,
        subtotal,
        shipping_cost,
        total: subtotal + shipping_cost,
    }
}

fn one_line_address(
    line1: &str,
    line2: Option<&str>,
    locality: &str,
    subregion: &str,
    region: &str,
) -> String {
    [Some(line1), line2, Some(locality), Some(subregion), Some(region)]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
