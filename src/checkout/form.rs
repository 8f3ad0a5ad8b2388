//! Checkout form
//!
//! Billing and delivery address entry. While "same as billing" is set, every
//! billing change is mirrored into the delivery fields, and re-enabling the
//! flag overwrites the delivery fields wholesale from billing. The mirroring
//! is one-directional and deliberately lossy.

use crate::orders::PaymentMethod;

/// Hierarchical address selection: region, then sub-region, then locality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressArea {
    /// Selected region.
    pub region: Option<String>,

    /// Selected sub-region.
    pub subregion: Option<String>,

    /// Selected locality.
    pub locality: Option<String>,
}

impl AddressArea {
    /// Whether all three levels have been selected.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.region.is_some() && self.subregion.is_some() && self.locality.is_some()
    }
}

/// Address fields shared by the billing and delivery blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressFields {
    /// Street address.
    pub line1: String,

    /// Address complement.
    pub line2: String,

    /// Postal code as entered; coercion happens at draft construction.
    pub postal_code: String,

    /// Hierarchical area selection.
    pub area: AddressArea,
}

/// The address & payment entry form of checkout step two.
///
/// Billing and delivery blocks are only mutated through [`update_billing`],
/// [`update_shipping`] and [`set_same_as_billing`], which keep the mirroring
/// semantics in one place.
///
/// [`update_billing`]: CheckoutForm::update_billing
/// [`update_shipping`]: CheckoutForm::update_shipping
/// [`set_same_as_billing`]: CheckoutForm::set_same_as_billing
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutForm {
    /// Customer last name.
    pub last_name: String,

    /// Customer first name.
    pub first_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Free-text note to the order.
    pub note: String,

    /// Chosen payment method.
    pub payment: PaymentMethod,

    billing: AddressFields,
    shipping: AddressFields,
    same_as_billing: bool,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        CheckoutForm {
            last_name: String::new(),
            first_name: String::new(),
            email: String::new(),
            phone: String::new(),
            note: String::new(),
            payment: PaymentMethod::default(),
            billing: AddressFields::default(),
            shipping: AddressFields::default(),
            same_as_billing: true,
        }
    }
}

impl CheckoutForm {
    /// Creates an empty form with "same as billing" enabled.
    #[must_use]
    pub fn new() -> Self {
        CheckoutForm::default()
    }

    /// The billing address block.
    #[must_use]
    pub fn billing(&self) -> &AddressFields {
        &self.billing
    }

    /// The delivery address block.
    #[must_use]
    pub fn shipping(&self) -> &AddressFields {
        &self.shipping
    }

    /// Whether delivery follows the billing address.
    #[must_use]
    pub fn same_as_billing(&self) -> bool {
        self.same_as_billing
    }

    /// Mutates the billing block, then resyncs the delivery block if it
    /// follows billing.
    pub fn update_billing(&mut self, update: impl FnOnce(&mut AddressFields)) {
        update(&mut self.billing);

        if self.same_as_billing {
            self.shipping = self.billing.clone();
        }
    }

    /// Mutates the delivery block. Edits made while "same as billing" is set
    /// are overwritten by the next billing change or toggle.
    pub fn update_shipping(&mut self, update: impl FnOnce(&mut AddressFields)) {
        update(&mut self.shipping);
    }

    /// Toggles delivery-follows-billing. Enabling it overwrites the delivery
    /// block from the current billing values, discarding any delivery-specific
    /// edits.
    pub fn set_same_as_billing(&mut self, same: bool) {
        self.same_as_billing = same;

        if same {
            self.shipping = self.billing.clone();
        }
    }

    /// Billing postal code coerced to a number. Non-numeric input silently
    /// becomes `None`; it is not a validation failure.
    #[must_use]
    pub fn billing_postal_code(&self) -> Option<i64> {
        self.billing.postal_code.trim().parse().ok()
    }

    /// Delivery postal code passed through as entered, `None` when blank.
    #[must_use]
    pub fn shipping_postal_code(&self) -> Option<String> {
        let trimmed = self.shipping.postal_code.trim();

        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(region: &str, subregion: &str, locality: &str) -> AddressArea {
        AddressArea {
            region: Some(region.to_string()),
            subregion: Some(subregion.to_string()),
            locality: Some(locality.to_string()),
        }
    }

    #[test]
    fn new_form_follows_billing() {
        let form = CheckoutForm::new();

        assert!(form.same_as_billing());
        assert_eq!(form.billing(), form.shipping());
    }

    #[test]
    fn billing_changes_mirror_into_shipping_while_following() {
        let mut form = CheckoutForm::new();

        form.update_billing(|billing| {
            billing.line1 = "12 rue de Carthage".to_string();
            billing.area = area("Tunis", "Le Bardo", "Bardo Centre");
        });

        assert_eq!(form.shipping().line1, "12 rue de Carthage");
        assert!(form.shipping().area.is_resolved());
    }

    #[test]
    fn billing_changes_leave_shipping_alone_when_not_following() {
        let mut form = CheckoutForm::new();

        form.set_same_as_billing(false);
        form.update_shipping(|shipping| {
            shipping.line1 = "5 avenue Bourguiba".to_string();
        });
        form.update_billing(|billing| {
            billing.line1 = "12 rue de Carthage".to_string();
        });

        assert_eq!(form.shipping().line1, "5 avenue Bourguiba");
    }

    #[test]
    fn re_enabling_follow_overwrites_shipping_edits() {
        let mut form = CheckoutForm::new();

        form.update_billing(|billing| {
            billing.line1 = "12 rue de Carthage".to_string();
        });

        form.set_same_as_billing(false);
        form.update_shipping(|shipping| {
            shipping.line1 = "5 avenue Bourguiba".to_string();
            shipping.postal_code = "4000".to_string();
        });

        form.set_same_as_billing(true);

        assert_eq!(form.shipping().line1, "12 rue de Carthage");
        assert_eq!(form.shipping().postal_code, "");
    }

    #[test]
    fn mirroring_is_one_directional() {
        let mut form = CheckoutForm::new();

        form.update_shipping(|shipping| {
            shipping.line1 = "5 avenue Bourguiba".to_string();
        });

        assert_eq!(form.billing().line1, "", "shipping edits never flow back");
    }

    #[test]
    fn billing_postal_code_coerces_to_number_or_none() {
        let mut form = CheckoutForm::new();

        form.update_billing(|billing| billing.postal_code = " 2000 ".to_string());
        assert_eq!(form.billing_postal_code(), Some(2000));

        form.update_billing(|billing| billing.postal_code = "20a0".to_string());
        assert_eq!(form.billing_postal_code(), None);

        form.update_billing(|billing| billing.postal_code = String::new());
        assert_eq!(form.billing_postal_code(), None);
    }

    #[test]
    fn shipping_postal_code_passes_through_as_text() {
        let mut form = CheckoutForm::new();

        form.set_same_as_billing(false);
        form.update_shipping(|shipping| shipping.postal_code = " 4000-B ".to_string());

        assert_eq!(form.shipping_postal_code().as_deref(), Some("4000-B"));

        form.update_shipping(|shipping| shipping.postal_code = "   ".to_string());

        assert!(form.shipping_postal_code().is_none());
    }

    #[test]
    fn partial_area_is_not_resolved() {
        let mut partial = area("Tunis", "Le Bardo", "Bardo Centre");
        partial.locality = None;

        assert!(!partial.is_resolved());
        assert!(!AddressArea::default().is_resolved());
        assert!(area("Tunis", "Le Bardo", "Bardo Centre").is_resolved());
    }
}
