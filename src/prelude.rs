//! Comptoir prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        AddOutcome, Cart, CartLine,
        persistence::{
            CART_STORAGE_KEY, FileStorage, MemoryStorage, SnapshotStorage, StorageError,
        },
        store::CartStore,
    },
    catalog::{CatalogItem, ItemId, StockStatus},
    checkout::{
        Checkout, CheckoutError, CheckoutState,
        form::{AddressArea, AddressFields, CheckoutForm},
        validation::{ValidationError, validate},
    },
    config::{ApiConfig, CartConfig, ConfigError, StorefrontConfig},
    fixtures::{Fixture, FixtureError},
    orders::{
        ConfirmedOrder, DraftLine, OrderDraft, OrderId, OrderLine, PaymentMethod, ShippingAddress,
        fallback_confirmation,
        gateway::{CreatedOrder, HttpOrderGateway, OrderGateway, OrderGatewayError},
    },
    pricing::effective_price,
    receipt::{ReceiptError, format_amount, write_confirmation},
    shipping::ShippingRates,
};
