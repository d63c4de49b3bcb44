//! Billing contact derivation.
//!
//! Orders arrive with divergent customer blocks; this resolves them
//! into one contact. Pass-through normalization only — no email or
//! address validation.

use super::raw::RawOrder;
use super::types::{AddressType, ContactAddress, FALLBACK_CONTACT_NAME, InvoiceContact};

fn nonempty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Derive the billing contact for an order.
pub fn resolve_contact(order: &RawOrder) -> InvoiceContact {
    let customer = order.customer();
    let billing = order.billing_address();

    let name = customer
        .and_then(|c| {
            // Both halves must be present to use the customer block.
            let first = nonempty(c.first_name.as_deref())?;
            let last = nonempty(c.last_name.as_deref())?;
            Some(format!("{first} {last}"))
        })
        .or_else(|| {
            nonempty(billing.and_then(|b| b.name.as_deref())).map(str::to_string)
        })
        .or_else(|| nonempty(order.customer_name()).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_CONTACT_NAME.to_string());

    let email_address = nonempty(order.email())
        .or_else(|| nonempty(customer.and_then(|c| c.email.as_deref())))
        .or_else(|| nonempty(billing.and_then(|b| b.email.as_deref())))
        .map(str::to_string);

    let phone = nonempty(billing.and_then(|b| b.phone.as_deref())).map(str::to_string);

    let addresses = billing
        .filter(|b| nonempty(b.address1.as_deref()).is_some())
        .map(|b| {
            let field = |v: &Option<String>| v.clone().unwrap_or_default();
            ContactAddress {
                address_type: AddressType::PoBox,
                address_line1: field(&b.address1),
                address_line2: field(&b.address2),
                city: field(&b.city),
                region: b
                    .province
                    .clone()
                    .or_else(|| b.state.clone())
                    .unwrap_or_default(),
                postal_code: field(&b.zip),
                country: field(&b.country),
            }
        })
        .into_iter()
        .collect();

    InvoiceContact {
        name,
        email_address,
        phone,
        addresses,
    }
}
