//! Xero REST JSON wire model.
//!
//! Field names follow the REST API's PascalCase casing exactly (`Type`,
//! `LineItems`, `DueDate`, …) — this differs from the SDK object
//! casing, so the canonical document is mapped here rather than
//! serialized directly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{InvoiceContact, InvoiceDocument, InvoiceLine};

/// Line amounts are tax-exclusive; any tax is carried per-line via
/// `TaxType`.
pub const LINE_AMOUNT_TYPES: &str = "Exclusive";

/// Invoice document in REST wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XeroInvoice {
    #[serde(rename = "Type")]
    pub invoice_type: String,
    #[serde(rename = "Contact")]
    pub contact: XeroContact,
    #[serde(rename = "LineItems")]
    pub line_items: Vec<XeroLineItem>,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "DueDate")]
    pub due_date: NaiveDate,
    #[serde(rename = "InvoiceNumber")]
    pub invoice_number: String,
    #[serde(rename = "Reference")]
    pub reference: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "CurrencyCode")]
    pub currency_code: String,
    #[serde(rename = "LineAmountTypes")]
    pub line_amount_types: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XeroContact {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "EmailAddress", skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(rename = "Phones", default, skip_serializing_if = "Vec::is_empty")]
    pub phones: Vec<XeroPhone>,
    #[serde(rename = "Addresses", default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<XeroAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XeroPhone {
    #[serde(rename = "PhoneType")]
    pub phone_type: String,
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XeroAddress {
    #[serde(rename = "AddressType")]
    pub address_type: String,
    #[serde(rename = "AddressLine1")]
    pub address_line1: String,
    #[serde(rename = "AddressLine2")]
    pub address_line2: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
    #[serde(rename = "Country")]
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XeroLineItem {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "UnitAmount")]
    pub unit_amount: Decimal,
    #[serde(rename = "AccountCode")]
    pub account_code: String,
    #[serde(rename = "ItemCode", skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(rename = "TaxType", skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
}

impl From<&InvoiceLine> for XeroLineItem {
    fn from(line: &InvoiceLine) -> Self {
        Self {
            description: line.description.clone(),
            quantity: line.quantity,
            unit_amount: line.unit_amount,
            account_code: line.account_code.clone(),
            item_code: line.item_code.clone(),
            tax_type: line.tax_type.map(|t| t.code().to_string()),
        }
    }
}

impl From<&InvoiceContact> for XeroContact {
    fn from(contact: &InvoiceContact) -> Self {
        Self {
            name: contact.name.clone(),
            email_address: contact.email_address.clone(),
            phones: contact
                .phone
                .iter()
                .map(|p| XeroPhone {
                    phone_type: "DEFAULT".to_string(),
                    phone_number: p.clone(),
                })
                .collect(),
            addresses: contact
                .addresses
                .iter()
                .map(|a| XeroAddress {
                    address_type: a.address_type.code().to_string(),
                    address_line1: a.address_line1.clone(),
                    address_line2: a.address_line2.clone(),
                    city: a.city.clone(),
                    region: a.region.clone(),
                    postal_code: a.postal_code.clone(),
                    country: a.country.clone(),
                })
                .collect(),
        }
    }
}

impl From<&InvoiceDocument> for XeroInvoice {
    fn from(doc: &InvoiceDocument) -> Self {
        Self {
            invoice_type: doc.invoice_type.code().to_string(),
            contact: XeroContact::from(&doc.contact),
            line_items: doc.line_items.iter().map(XeroLineItem::from).collect(),
            date: doc.date,
            due_date: doc.due_date,
            invoice_number: doc.invoice_number.clone(),
            reference: doc.reference.clone(),
            status: doc.status.code().to_string(),
            currency_code: doc.currency_code.clone(),
            line_amount_types: LINE_AMOUNT_TYPES.to_string(),
        }
    }
}

// --- Response bodies ---

/// Envelope returned by POST /Invoices.
#[derive(Debug, Deserialize)]
pub(crate) struct InvoicesResponse {
    #[serde(rename = "Invoices", default)]
    pub invoices: Vec<InvoiceResponseEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InvoiceResponseEntry {
    #[serde(rename = "InvoiceID", default)]
    pub invoice_id: Option<String>,
    #[serde(rename = "InvoiceNumber", default)]
    pub invoice_number: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
    // Xero returns totals as JSON numbers; parsed leniently.
    #[serde(rename = "Total", default)]
    pub total: Option<Value>,
}

/// Envelope returned by GET /Organisation.
#[derive(Debug, Deserialize)]
pub(crate) struct OrganisationsResponse {
    #[serde(rename = "Organisations", default)]
    pub organisations: Vec<OrganisationEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganisationEntry {
    #[serde(rename = "BaseCurrency", default)]
    pub base_currency: Option<String>,
}

/// Error envelope returned with HTTP 400.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
    #[serde(rename = "Elements", default)]
    pub elements: Vec<ApiErrorElement>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorElement {
    #[serde(rename = "ValidationErrors", default)]
    pub validation_errors: Vec<ApiValidationError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiValidationError {
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

impl ApiErrorResponse {
    /// Flatten the envelope into its validation messages, falling back
    /// to the top-level message.
    pub fn messages(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .elements
            .iter()
            .flat_map(|e| e.validation_errors.iter())
            .filter_map(|v| v.message.clone())
            .collect();
        if out.is_empty() {
            if let Some(msg) = &self.message {
                out.push(msg.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;
    use serde_json::json;

    fn sample_document() -> InvoiceDocument {
        let order: ShopifyOrder = serde_json::from_value(json!({
            "id": 4471,
            "order_number": 1001,
            "email": "jane@example.com",
            "currency": "NZD",
            "customer": { "first_name": "Jane", "last_name": "Doe" },
            "billing_address": {
                "address1": "1 Main St",
                "city": "Auckland",
                "zip": "1010",
                "country": "NZ",
                "phone": "+64 9 555 0100"
            },
            "line_items": [
                { "title": "Oak Shelf", "quantity": 2, "price": "49.90", "sku": "OAK-S", "taxable": true }
            ],
            "shipping_lines": [{ "price": 15 }],
            "total_discounts": "5"
        }))
        .unwrap();
        normalize_order_to_invoice(
            &RawOrder::Shopify(order),
            &SessionContext::new("tenant-1"),
            &FixedClock::ymd(2024, 6, 15),
        )
    }

    #[test]
    fn wire_invoice_uses_rest_casing() {
        let wire = XeroInvoice::from(&sample_document());
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["Type"], "ACCREC");
        assert_eq!(json["Status"], "AUTHORISED");
        assert_eq!(json["LineAmountTypes"], "Exclusive");
        assert_eq!(json["Date"], "2024-06-15");
        assert_eq!(json["DueDate"], "2024-07-15");
        assert_eq!(json["Reference"], "Order: 1001");
        assert_eq!(json["CurrencyCode"], "NZD");
        assert_eq!(json["Contact"]["Name"], "Jane Doe");
        assert_eq!(json["Contact"]["Phones"][0]["PhoneType"], "DEFAULT");
        assert_eq!(json["Contact"]["Addresses"][0]["AddressType"], "POBOX");
        assert_eq!(json["LineItems"][0]["UnitAmount"], "49.90");
        assert_eq!(json["LineItems"][0]["TaxType"], "OUTPUT");
        assert_eq!(json["LineItems"][0]["ItemCode"], "OAK-S");
    }

    #[test]
    fn wire_mapping_preserves_every_line() {
        let doc = sample_document();
        let wire = XeroInvoice::from(&doc);
        // Base line plus shipping and discount.
        assert_eq!(wire.line_items.len(), 3);
        assert_eq!(wire.line_items.len(), doc.line_items.len());
        assert_eq!(wire.line_items[1].description, "Shipping");
        assert_eq!(wire.line_items[2].description, "Discount");
        assert_eq!(wire.line_items[2].unit_amount.to_string(), "-5.00");
    }

    #[test]
    fn absent_optionals_are_omitted_from_wire_json() {
        let mut doc = sample_document();
        doc.contact.phone = None;
        doc.contact.addresses.clear();
        doc.contact.email_address = None;
        let json = serde_json::to_value(XeroInvoice::from(&doc)).unwrap();
        let contact = json["Contact"].as_object().unwrap();
        assert!(!contact.contains_key("Phones"));
        assert!(!contact.contains_key("Addresses"));
        assert!(!contact.contains_key("EmailAddress"));
        let line = json["LineItems"][1].as_object().unwrap();
        assert!(!line.contains_key("ItemCode"));
        assert!(!line.contains_key("TaxType"));
    }

    #[test]
    fn error_envelope_flattens_validation_messages() {
        let body: ApiErrorResponse = serde_json::from_value(json!({
            "Message": "A validation exception occurred",
            "Elements": [
                { "ValidationErrors": [
                    { "Message": "The TaxType code OUTPUT does not exist" },
                    { "Message": "Account code '200' is not a valid code" }
                ]}
            ]
        }))
        .unwrap();
        assert_eq!(body.messages().len(), 2);

        let body: ApiErrorResponse =
            serde_json::from_value(json!({ "Message": "Invalid request" })).unwrap();
        assert_eq!(body.messages(), vec!["Invalid request".to_string()]);
    }

    #[test]
    fn invoices_response_deserializes_numeric_total() {
        let resp: InvoicesResponse = serde_json::from_value(json!({
            "Invoices": [{
                "InvoiceID": "c2d7…",
                "InvoiceNumber": "1001",
                "Status": "AUTHORISED",
                "Total": 114.80
            }]
        }))
        .unwrap();
        assert_eq!(resp.invoices[0].invoice_number.as_deref(), Some("1001"));
        assert!(resp.invoices[0].total.is_some());
    }
}
