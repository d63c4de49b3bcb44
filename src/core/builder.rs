//! Document assembly: the two public normalization entry points.
//!
//! `normalize_order_to_invoice` is total — any order that deserialized
//! produces a document, degrading field-by-field on bad data.
//! `normalize_quote_to_invoice` validates up front and refuses
//! structurally unusable quotes before any upstream call is made.

use chrono::Days;
use rust_decimal::Decimal;
use tracing::debug;

use super::clock::Clock;
use super::contact::resolve_contact;
use super::error::{LedgerError, ValidationError};
use super::line_items::normalize_line_item;
use super::parse::{display_string, lenient_decimal, lenient_quantity, money};
use super::raw::{QuoteRequest, RawOrder};
use super::totals::{adjustment_lines, resolve_currency};
use super::types::{
    DEFAULT_ACCOUNT_CODE, DUE_DATE_NET_DAYS, FALLBACK_CURRENCY, FALLBACK_DESCRIPTION,
    InvoiceContact, InvoiceDocument, InvoiceLine, InvoiceStatus, InvoiceType, SessionContext,
};

/// Shape precheck for callers that must reject unusable orders before
/// contacting the accounting platform. Normalization itself never
/// fails, so this is deliberately separate.
pub fn validate_order(order: &RawOrder) -> Result<(), LedgerError> {
    let mut errors = Vec::new();

    if order.line_items().is_empty() {
        errors.push(ValidationError::new("line_items", "must be a non-empty list"));
    }

    let has_contact_source = order.customer().is_some()
        || order
            .billing_address()
            .and_then(|b| b.name.as_deref())
            .is_some_and(|n| !n.is_empty())
        || order.customer_name().is_some_and(|n| !n.is_empty());
    if !has_contact_source {
        errors.push(ValidationError::required("customer"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(LedgerError::from_validation_errors(&errors))
    }
}

/// Normalize an order into the canonical invoice document.
///
/// Infallible by contract: malformed numeric fields degrade to defaults
/// and missing contact data falls back to the walk-in customer. Use
/// [`validate_order`] first when shape errors should be reported
/// instead.
pub fn normalize_order_to_invoice(
    order: &RawOrder,
    ctx: &SessionContext,
    clock: &impl Clock,
) -> InvoiceDocument {
    let mut line_items: Vec<InvoiceLine> =
        order.line_items().iter().map(normalize_line_item).collect();
    line_items.extend(adjustment_lines(order));

    let order_number = order.order_number().and_then(display_string);
    let invoice_number = order_number
        .clone()
        .or_else(|| {
            order
                .order_name()
                .filter(|n| !n.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("INV-{}", clock.epoch_millis()));

    let reference_id = order_number
        .or_else(|| order.id().and_then(display_string))
        .unwrap_or_else(|| invoice_number.clone());

    let date = clock.today();
    let due_date = date
        .checked_add_days(Days::new(DUE_DATE_NET_DAYS))
        .unwrap_or(date);

    debug!(%invoice_number, "normalized order into invoice document");

    InvoiceDocument {
        invoice_type: InvoiceType::AccountsReceivable,
        contact: resolve_contact(order),
        line_items,
        date,
        due_date,
        invoice_number,
        reference: format!("Order: {reference_id}"),
        status: InvoiceStatus::Authorised,
        currency_code: resolve_currency(order, ctx),
    }
}

/// Validate a quote request and build a draft invoice document from it.
///
/// # Errors
///
/// Returns [`LedgerError::Validation`] naming every missing field when
/// `quoteId` or `customer.name` is absent, or when `items` is empty.
pub fn normalize_quote_to_invoice(
    quote: &QuoteRequest,
    clock: &impl Clock,
) -> Result<InvoiceDocument, LedgerError> {
    let mut errors = Vec::new();
    let quote_id = quote.quote_id.as_deref().filter(|q| !q.is_empty());
    if quote_id.is_none() {
        errors.push(ValidationError::required("quoteId"));
    }
    let customer_name = quote
        .customer
        .as_ref()
        .and_then(|c| c.name.as_deref())
        .filter(|n| !n.is_empty());
    if customer_name.is_none() {
        errors.push(ValidationError::required("customer.name"));
    }
    if quote.items.is_empty() {
        errors.push(ValidationError::new("items", "must be a non-empty list"));
    }
    let (Some(quote_id), Some(name)) = (quote_id, customer_name) else {
        return Err(LedgerError::from_validation_errors(&errors));
    };
    if !errors.is_empty() {
        return Err(LedgerError::from_validation_errors(&errors));
    }

    let line_items = quote
        .items
        .iter()
        .map(|item| InvoiceLine {
            description: item
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
            quantity: lenient_quantity(item.quantity.as_ref()).value,
            unit_amount: money(lenient_decimal(item.unit_amount.as_ref(), Decimal::ZERO).value),
            account_code: DEFAULT_ACCOUNT_CODE.to_string(),
            item_code: None,
            tax_type: None,
        })
        .collect();

    let contact = InvoiceContact {
        name: name.to_string(),
        email_address: quote
            .customer
            .as_ref()
            .and_then(|c| c.email.clone())
            .filter(|e| !e.is_empty()),
        phone: quote
            .customer
            .as_ref()
            .and_then(|c| c.phone.clone())
            .filter(|p| !p.is_empty()),
        addresses: Vec::new(),
    };

    let date = clock.today();
    let due_date = date
        .checked_add_days(Days::new(DUE_DATE_NET_DAYS))
        .unwrap_or(date);

    Ok(InvoiceDocument {
        invoice_type: InvoiceType::AccountsReceivable,
        contact,
        line_items,
        date,
        due_date,
        invoice_number: quote_id.to_string(),
        reference: format!("Quote: {quote_id}"),
        status: InvoiceStatus::Draft,
        currency_code: quote
            .currency
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| FALLBACK_CURRENCY.to_string()),
    })
}
