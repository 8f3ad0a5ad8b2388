//! Checkout Demo
//!
//! Walks a cart through the full checkout flow against a canned gateway and
//! prints the confirmation receipt.
//!
//! Use `-f` to load a catalog fixture set by name
//! Use `-n` to limit how many catalog items go into the cart
//! Use `-c` to load a storefront configuration file

use std::io;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use comptoir::{
    cart::{persistence::MemoryStorage, store::CartStore},
    checkout::{Checkout, form::AddressArea},
    config::StorefrontConfig,
    fixtures::Fixture,
    orders::{
        OrderDraft, OrderId,
        gateway::{CreatedOrder, OrderGateway, OrderGatewayError},
    },
    receipt,
    utils::DemoCheckoutArgs,
};
use rust_decimal::Decimal;

/// Canned gateway: order creation succeeds, the detail fetch does not, so the
/// demo exercises the locally reconstructed confirmation.
#[derive(Debug, Default)]
struct DemoGateway;

#[async_trait]
impl OrderGateway for DemoGateway {
    async fn create_order(&self, _draft: &OrderDraft) -> Result<CreatedOrder, OrderGatewayError> {
        Ok(CreatedOrder {
            id: OrderId(1042),
            numero: Some("CMD-2026-1042".to_string()),
        })
    }

    async fn order_details(&self, _id: OrderId) -> Result<comptoir::orders::ConfirmedOrder, OrderGatewayError> {
        Err(OrderGatewayError::UnexpectedResponse(
            "detail endpoint unavailable in the demo".to_string(),
        ))
    }
}

/// Checkout Demo
#[expect(clippy::print_stdout, reason = "Example code")]
#[tokio::main]
pub async fn main() -> Result<()> {
    let args = DemoCheckoutArgs::parse();

    let config = match args.config.as_deref() {
        Some(path) => StorefrontConfig::load(path)?,
        None => StorefrontConfig::default(),
    };

    let fixture = Fixture::from_set(&args.fixture)?;

    let mut cart = CartStore::open(MemoryStorage::new());

    for item in fixture.catalog(args.n) {
        let name = item.name.clone();

        match cart.add_to_cart(item, 1) {
            comptoir::cart::AddOutcome::Added => {}
            comptoir::cart::AddOutcome::RejectedOutOfStock => {
                println!("{name} is out of stock and was not added");
            }
        }
    }

    let subtotal = cart.total_price();
    let rates = config.shipping.clone();
    let progress = (rates.progress(subtotal) * Decimal::ONE_HUNDRED).round_dp(0);

    println!(
        "\nCart: {} items, subtotal {}",
        cart.total_items(),
        receipt::format_amount(subtotal)
    );
    println!(
        "Free shipping progress: {progress}% ({} to go)",
        receipt::format_amount(rates.remaining_for_free_shipping(subtotal))
    );

    let mut checkout = Checkout::with_rates(DemoGateway, rates);

    let form = checkout.form_mut();
    form.last_name = "Ben Salah".to_string();
    form.first_name = "Amine".to_string();
    form.email = "amine@example.tn".to_string();
    form.phone = "21 345 678".to_string();
    form.note = "Call before delivery".to_string();
    form.update_billing(|billing| {
        billing.line1 = "12 rue de Carthage".to_string();
        billing.postal_code = "2000".to_string();
        billing.area = AddressArea {
            region: Some("Tunis".to_string()),
            subregion: Some("Le Bardo".to_string()),
            locality: Some("Bardo Centre".to_string()),
        };
    });

    checkout.submit(&mut cart).await?;

    if let Some(order) = checkout.confirmed_order() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();

        receipt::write_confirmation(&mut handle, order)?;
    }

    println!("\nCart after checkout: {} items", cart.total_items());

    Ok(())
}
