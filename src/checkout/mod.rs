//! Checkout
//!
//! The checkout flow: cart review, then address & payment entry, then
//! confirmation. The step is a tagged union, so the confirmed order only
//! exists in the state where it is valid and no inconsistent flag combination
//! can be represented.

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    cart::{Cart, persistence::SnapshotStorage, store::CartStore},
    checkout::{
        form::CheckoutForm,
        validation::{ValidationError, validate},
    },
    orders::{
        ConfirmedOrder, DraftLine, OrderDraft, ShippingAddress, fallback_confirmation,
        gateway::{OrderGateway, OrderGatewayError},
    },
    shipping::ShippingRates,
};

pub mod form;
pub mod validation;

/// Current checkout step, carrying only the data valid in that step.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    /// Address & payment entry.
    Form,

    /// An order submission is in flight.
    Submitting,

    /// The order was placed; terminal for a successful checkout.
    Confirmed(ConfirmedOrder),
}

/// Errors surfaced by a submission attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A pre-submission rule failed; the form is untouched and no request was
    /// made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// There is nothing to order.
    #[error("your cart is empty")]
    EmptyCart,

    /// Submission is only available from the form step.
    #[error("the order form is not active")]
    NotInForm,

    /// The backend rejected or failed the order creation; the form step is
    /// restored and the submission can be retried.
    #[error("the order could not be placed: {0}")]
    Submission(#[source] OrderGatewayError),
}

/// Drives the checkout flow against an order gateway.
#[derive(Debug)]
pub struct Checkout<G> {
    state: CheckoutState,
    form: CheckoutForm,
    gateway: G,
    rates: ShippingRates,
}

impl<G: OrderGateway> Checkout<G> {
    /// Starts a checkout at the form step with default shipping rates.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self::with_rates(gateway, ShippingRates::default())
    }

    /// Starts a checkout with configured shipping rates.
    #[must_use]
    pub fn with_rates(gateway: G, rates: ShippingRates) -> Self {
        Checkout {
            state: CheckoutState::Form,
            form: CheckoutForm::new(),
            gateway,
            rates,
        }
    }

    /// The current step.
    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// The entry form.
    #[must_use]
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Mutable access to the entry form. The form's own methods preserve the
    /// billing-to-delivery mirroring.
    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// The shipping rates this checkout totals with.
    #[must_use]
    pub fn rates(&self) -> &ShippingRates {
        &self.rates
    }

    /// Whether a submission is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, CheckoutState::Submitting)
    }

    /// The confirmed order, once the flow has reached confirmation.
    #[must_use]
    pub fn confirmed_order(&self) -> Option<&ConfirmedOrder> {
        match &self.state {
            CheckoutState::Confirmed(order) => Some(order),
            _ => None,
        }
    }

    /// Whether the checkout page should send the user back to the cart.
    ///
    /// Clearing the cart is part of the success transition, so an empty cart
    /// must not trigger the return while a submission is in flight or once
    /// the order is confirmed.
    #[must_use]
    pub fn should_return_to_cart(&self, cart: &Cart) -> bool {
        cart.is_empty() && matches!(self.state, CheckoutState::Form)
    }

    /// Assembles the submission payload from the form and the cart.
    ///
    /// Unit prices are snapshotted from the cart here; a catalog price change
    /// during checkout cannot alter an order already in flight. A separate
    /// delivery address is only materialized when it differs from billing.
    #[must_use]
    pub fn build_draft(&self, cart: &Cart) -> OrderDraft {
        let billing = self.form.billing();

        let shipping = (!self.form.same_as_billing()).then(|| {
            let fields = self.form.shipping();

            ShippingAddress {
                address_line1: fields.line1.clone(),
                address_line2: optional(&fields.line2),
                region: fields.area.region.clone().unwrap_or_default(),
                subregion: fields.area.subregion.clone().unwrap_or_default(),
                locality: fields.area.locality.clone().unwrap_or_default(),
                postal_code: self.form.shipping_postal_code(),
            }
        });

        OrderDraft {
            last_name: self.form.last_name.clone(),
            first_name: self.form.first_name.clone(),
            email: self.form.email.clone(),
            phone: self.form.phone.clone(),
            address_line1: billing.line1.clone(),
            address_line2: optional(&billing.line2),
            region: billing.area.region.clone().unwrap_or_default(),
            subregion: billing.area.subregion.clone().unwrap_or_default(),
            locality: billing.area.locality.clone().unwrap_or_default(),
            postal_code: self.form.billing_postal_code(),
            shipping,
            note: optional(&self.form.note),
            payment: self.form.payment,
            lines: cart
                .lines()
                .iter()
                .map(|line| DraftLine {
                    item_id: line.item.id,
                    quantity: line.quantity,
                    unit_price: line.unit_price(),
                })
                .collect(),
        }
    }

    /// Submits the order.
    ///
    /// On success the flow enters the confirmed step and only then clears the
    /// cart; if the post-creation detail fetch fails, a confirmation is
    /// reconstructed from local data instead of blocking. On creation failure
    /// the flow returns to the form step for a retry.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when validation fails, the cart is empty,
    /// the flow is not at the form step, or the backend rejects the order.
    #[instrument(skip_all)]
    pub async fn submit<S: SnapshotStorage>(
        &mut self,
        cart: &mut CartStore<S>,
    ) -> Result<(), CheckoutError> {
        if self.state != CheckoutState::Form {
            return Err(CheckoutError::NotInForm);
        }

        validate(&self.form)?;

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let draft = self.build_draft(cart.cart());

        self.state = CheckoutState::Submitting;

        let created = match self.gateway.create_order(&draft).await {
            Ok(created) => created,
            Err(err) => {
                self.state = CheckoutState::Form;
                return Err(CheckoutError::Submission(err));
            }
        };

        info!(order_id = %created.id, "order placed");

        let order = match self.gateway.order_details(created.id).await {
            Ok(order) => order,
            Err(err) => {
                warn!(
                    order_id = %created.id,
                    error = %err,
                    "order detail fetch failed, reconstructing confirmation locally"
                );

                fallback_confirmation(&created, &draft, cart.cart(), &self.rates)
            }
        };

        // The cart is cleared only after the confirmed order is in place; the
        // fallback above still needed the cart's contents.
        self.state = CheckoutState::Confirmed(order);
        cart.clear_cart();

        Ok(())
    }

    /// Returns to the form step from the confirmation view.
    ///
    /// A pure view change: the placed order is not undone and the cleared
    /// cart stays cleared.
    pub fn back_to_form(&mut self) {
        if matches!(self.state, CheckoutState::Confirmed(_)) {
            self.state = CheckoutState::Form;
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
