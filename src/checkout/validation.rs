//! Checkout validation
//!
//! Synchronous pre-submission checks. A failing rule blocks the transition
//! with a field-specific message and leaves the form untouched; validation
//! failures are shown to the user, never logged as errors.

use thiserror::Error;

use crate::checkout::form::CheckoutForm;

/// A field-specific validation failure. The message is user-facing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Last name is blank.
    #[error("please enter your last name")]
    MissingLastName,

    /// First name is blank.
    #[error("please enter your first name")]
    MissingFirstName,

    /// Email is blank.
    #[error("please enter your email address")]
    MissingEmail,

    /// Email does not look like an address.
    #[error("please enter a valid email address")]
    InvalidEmail,

    /// Phone has fewer than 8 digits.
    #[error("please enter a valid phone number")]
    InvalidPhone,

    /// Billing street address is blank.
    #[error("please enter your address")]
    MissingAddress,

    /// Billing region/sub-region/locality selection is incomplete.
    #[error("please select your region, sub-region and locality")]
    IncompleteBillingArea,

    /// Separate delivery region/sub-region/locality selection is incomplete.
    #[error("please select the delivery region, sub-region and locality")]
    IncompleteShippingArea,
}

/// Validates the form ahead of submission.
///
/// # Errors
///
/// Returns the first failing rule as a [`ValidationError`].
pub fn validate(form: &CheckoutForm) -> Result<(), ValidationError> {
    if form.last_name.trim().is_empty() {
        return Err(ValidationError::MissingLastName);
    }

    if form.first_name.trim().is_empty() {
        return Err(ValidationError::MissingFirstName);
    }

    if form.email.trim().is_empty() {
        return Err(ValidationError::MissingEmail);
    }

    if !form.email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    if digit_count(&form.phone) < 8 {
        return Err(ValidationError::InvalidPhone);
    }

    if form.billing().line1.trim().is_empty() {
        return Err(ValidationError::MissingAddress);
    }

    if !form.billing().area.is_resolved() {
        return Err(ValidationError::IncompleteBillingArea);
    }

    if !form.same_as_billing() && !form.shipping().area.is_resolved() {
        return Err(ValidationError::IncompleteShippingArea);
    }

    Ok(())
}

fn digit_count(phone: &str) -> usize {
    phone
        .chars()
        .filter(|c| !c.is_whitespace())
        .filter(char::is_ascii_digit)
        .count()
}

#[cfg(test)]
mod tests {
    use crate::checkout::form::AddressArea;

    use super::*;

    fn valid_form() -> CheckoutForm {
        let mut form = CheckoutForm::new();

        form.last_name = "Ben Salah".to_string();
        form.first_name = "Amine".to_string();
        form.email = "amine@example.tn".to_string();
        form.phone = "21 345 678".to_string();

        form.update_billing(|billing| {
            billing.line1 = "12 rue de Carthage".to_string();
            billing.area = AddressArea {
                region: Some("Tunis".to_string()),
                subregion: Some("Le Bardo".to_string()),
                locality: Some("Bardo Centre".to_string()),
            };
        });

        form
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(validate(&valid_form()), Ok(()));
    }

    #[test]
    fn blank_names_fail_in_order() {
        let mut form = valid_form();
        form.last_name = "  ".to_string();

        assert_eq!(validate(&form), Err(ValidationError::MissingLastName));

        let mut form = valid_form();
        form.first_name = String::new();

        assert_eq!(validate(&form), Err(ValidationError::MissingFirstName));
    }

    #[test]
    fn email_must_be_present_and_contain_at() {
        let mut form = valid_form();
        form.email = String::new();

        assert_eq!(validate(&form), Err(ValidationError::MissingEmail));

        form.email = "amine.example.tn".to_string();

        assert_eq!(validate(&form), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn phone_needs_eight_digits_ignoring_whitespace() {
        let mut form = valid_form();
        form.phone = "21 34 56 7".to_string();

        assert_eq!(validate(&form), Err(ValidationError::InvalidPhone));

        form.phone = "2 1 3 4 5 6 7 8".to_string();

        assert_eq!(validate(&form), Ok(()));
    }

    #[test]
    fn empty_phone_fails() {
        let mut form = valid_form();
        form.phone = String::new();

        assert_eq!(validate(&form), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn billing_address_and_area_are_required() {
        let mut form = valid_form();
        form.update_billing(|billing| billing.line1 = String::new());

        assert_eq!(validate(&form), Err(ValidationError::MissingAddress));

        let mut form = valid_form();
        form.update_billing(|billing| billing.area.locality = None);

        assert_eq!(validate(&form), Err(ValidationError::IncompleteBillingArea));
    }

    #[test]
    fn separate_shipping_area_must_be_resolved() {
        let mut form = valid_form();

        form.set_same_as_billing(false);
        form.update_shipping(|shipping| shipping.area = AddressArea::default());

        assert_eq!(
            validate(&form),
            Err(ValidationError::IncompleteShippingArea)
        );

        form.set_same_as_billing(true);

        assert_eq!(validate(&form), Ok(()), "following billing reuses its area");
    }
}
