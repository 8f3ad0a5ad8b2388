//! Comptoir
//!
//! Comptoir is the cart, pricing and checkout engine behind a supplements &
//! sporting-goods storefront: it resolves promotional prices, keeps a
//! persisted shopping cart, computes shipping against a free-shipping
//! threshold, and drives the three-step checkout flow through to a confirmed
//! order.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod shipping;
pub mod utils;
