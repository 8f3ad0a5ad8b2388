//! Receipt
//!
//! Terminal rendering of the confirmation view for a placed order.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Color, Style, Theme, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::orders::ConfirmedOrder;

/// Errors that can occur when rendering a confirmation.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Formats an amount in the storefront currency.
#[must_use]
pub fn format_amount(amount: Decimal) -> Money<'static, Currency> {
    Money::from_decimal(amount, iso::TND)
}

/// Writes the confirmation view for a placed order: identity, addresses,
/// the line-item table, and the totals block.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if the output cannot be written.
pub fn write_confirmation(
    mut out: impl io::Write,
    order: &ConfirmedOrder,
) -> Result<(), ReceiptError> {
    write_order_header(&mut out, order)?;
    write_line_table(&mut out, order)?;
    write_totals(&mut out, order)?;

    Ok(())
}

fn write_order_header(out: &mut impl io::Write, order: &ConfirmedOrder) -> Result<(), ReceiptError> {
    match order.numero.as_deref() {
        Some(numero) => writeln!(out, "Order {numero} (#{})", order.id),
        None => writeln!(out, "Order #{}", order.id),
    }
    .map_err(|_err| ReceiptError::IO)?;

    writeln!(out, "{} <{}>, {}", order.recipient, order.email, order.phone)
        .map_err(|_err| ReceiptError::IO)?;

    writeln!(out, "Billing: {}", order.address).map_err(|_err| ReceiptError::IO)?;

    if let Some(shipping) = order.shipping_address.as_deref() {
        writeln!(out, "Delivery: {shipping}").map_err(|_err| ReceiptError::IO)?;
    }

    if let Some(note) = order.note.as_deref() {
        writeln!(out, "Note: {note}").map_err(|_err| ReceiptError::IO)?;
    }

    Ok(())
}

fn write_line_table(out: &mut impl io::Write, order: &ConfirmedOrder) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

    for line in &order.lines {
        let line_total = line.unit_price * Decimal::from(line.quantity);

        builder.push_record([
            line.name.clone(),
            line.quantity.to_string(),
            format_amount(line.unit_price).to_string(),
            format_amount(line_total).to_string(),
        ]);
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
}

fn write_totals(out: &mut impl io::Write, order: &ConfirmedOrder) -> Result<(), ReceiptError> {
    let subtotal = format_amount(order.subtotal).to_string();
    let shipping = if order.shipping_cost == Decimal::ZERO {
        "free".to_string()
    } else {
        format_amount(order.shipping_cost).to_string()
    };
    let total = format_amount(order.total).to_string();

    let width = subtotal.len().max(shipping.len()).max(total.len());

    writeln!(out, "\n Subtotal: {subtotal:>width$}").map_err(|_err| ReceiptError::IO)?;
    writeln!(out, " Shipping: {shipping:>width$}").map_err(|_err| ReceiptError::IO)?;
    writeln!(out, " \x1b[1mTotal:    {total:>width$}\x1b[0m").map_err(|_err| ReceiptError::IO)?;

    Ok(())
}
