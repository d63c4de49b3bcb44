use ledgerlink::core::*;
use serde_json::json;

fn clock() -> FixedClock {
    FixedClock::ymd(2024, 6, 15)
}

fn quote(v: serde_json::Value) -> QuoteRequest {
    serde_json::from_value(v).unwrap()
}

#[test]
fn quote_builds_draft_invoice() {
    let invoice = normalize_quote_to_invoice(
        &quote(json!({
            "quoteId": "Q-2024-007",
            "currency": "EUR",
            "customer": {
                "name": "Kunde AG",
                "email": "billing@kunde.example",
                "phone": "+49 30 12345"
            },
            "items": [
                { "description": "Consulting", "quantity": 10, "unitAmount": "150" },
                { "description": "Travel", "quantity": 1, "unitAmount": 220.50 }
            ]
        })),
        &clock(),
    )
    .unwrap();

    assert_eq!(invoice.status, InvoiceStatus::Draft);
    assert_eq!(invoice.status.code(), "DRAFT");
    assert_eq!(invoice.reference, "Quote: Q-2024-007");
    assert_eq!(invoice.invoice_number, "Q-2024-007");
    assert_eq!(invoice.currency_code, "EUR");
    assert_eq!(invoice.date.to_string(), "2024-06-15");
    assert_eq!(invoice.due_date.to_string(), "2024-07-15");

    assert_eq!(invoice.contact.name, "Kunde AG");
    assert_eq!(
        invoice.contact.email_address.as_deref(),
        Some("billing@kunde.example")
    );
    assert!(invoice.contact.addresses.is_empty());

    assert_eq!(invoice.line_items.len(), 2);
    let consulting = &invoice.line_items[0];
    assert_eq!(consulting.description, "Consulting");
    assert_eq!(consulting.quantity, 10);
    assert_eq!(consulting.unit_amount.to_string(), "150.00");
    assert_eq!(consulting.account_code, "200");
    assert_eq!(consulting.item_code, None);
    assert_eq!(consulting.tax_type, None);
    assert_eq!(invoice.line_items[1].unit_amount.to_string(), "220.50");
}

#[test]
fn quote_without_currency_defaults_to_usd() {
    let invoice = normalize_quote_to_invoice(
        &quote(json!({
            "quoteId": "Q-1",
            "customer": { "name": "Kunde AG" },
            "items": [{ "description": "Consulting", "quantity": 1, "unitAmount": 1 }]
        })),
        &clock(),
    )
    .unwrap();
    assert_eq!(invoice.currency_code, "USD");
}

#[test]
fn missing_quote_id_and_name_are_both_reported() {
    let err = normalize_quote_to_invoice(
        &quote(json!({
            "items": [{ "description": "Consulting", "quantity": 1, "unitAmount": 1 }]
        })),
        &clock(),
    )
    .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("quoteId"));
    assert!(msg.contains("customer.name"));
}

#[test]
fn empty_items_fail_validation() {
    let err = normalize_quote_to_invoice(
        &quote(json!({
            "quoteId": "Q-1",
            "customer": { "name": "Kunde AG" },
            "items": []
        })),
        &clock(),
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(err.to_string().contains("items"));
}

#[test]
fn quotes_never_apply_area_pricing() {
    // Quote items carry no properties, so a description that merely
    // mentions dimensions must not trigger any recomputation.
    let invoice = normalize_quote_to_invoice(
        &quote(json!({
            "quoteId": "Q-2",
            "customer": { "name": "Kunde AG" },
            "items": [{ "description": "Countertop 10ft x 8ft", "quantity": 4, "unitAmount": "10" }]
        })),
        &clock(),
    )
    .unwrap();
    assert_eq!(invoice.line_items[0].quantity, 4);
    assert_eq!(invoice.line_items[0].unit_amount.to_string(), "10.00");
}
