//! Order-level adjustments and currency resolution.
//!
//! Shipping and discounts are folded into synthetic invoice lines
//! rather than document-level fields: a discount becomes a
//! negative-amount line, shipping a positive one.

use rust_decimal::Decimal;
use tracing::debug;

use super::parse::{lenient_decimal, money};
use super::raw::RawOrder;
use super::types::{
    DEFAULT_ACCOUNT_CODE, FALLBACK_CURRENCY, InvoiceLine, SessionContext,
};

fn synthetic_line(description: &str, unit_amount: Decimal) -> InvoiceLine {
    InvoiceLine {
        description: description.to_string(),
        quantity: 1,
        unit_amount: money(unit_amount),
        account_code: DEFAULT_ACCOUNT_CODE.to_string(),
        item_code: None,
        tax_type: None,
    }
}

/// Build the synthetic adjustment lines for an order: at most one
/// `"Shipping"` line and one `"Discount"` line, in that order.
pub fn adjustment_lines(order: &RawOrder) -> Vec<InvoiceLine> {
    let mut lines = Vec::new();

    let shipping = lenient_decimal(
        order.shipping_lines().first().and_then(|s| s.price.as_ref()),
        Decimal::ZERO,
    );
    if shipping.value > Decimal::ZERO {
        lines.push(synthetic_line("Shipping", shipping.value));
    }

    let discount = lenient_decimal(order.total_discounts(), Decimal::ZERO);
    if discount.value > Decimal::ZERO {
        lines.push(synthetic_line("Discount", -discount.value));
    }

    // total_tax is reserved: read and logged, but not folded into any
    // line or document field.
    let tax = lenient_decimal(order.total_tax(), Decimal::ZERO);
    if tax.value > Decimal::ZERO {
        debug!(total_tax = %tax.value, "order carried a tax total (not invoiced)");
    }

    lines
}

/// Resolve the invoice currency: the order's explicit currency, else
/// the session's organisation base currency, else [`FALLBACK_CURRENCY`].
pub fn resolve_currency(order: &RawOrder, ctx: &SessionContext) -> String {
    order
        .currency()
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .or_else(|| ctx.base_currency.clone().filter(|c| !c.is_empty()))
        .unwrap_or_else(|| FALLBACK_CURRENCY.to_string())
}
