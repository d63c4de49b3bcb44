//! Line-item normalization: one raw order line in, one canonical
//! invoice line out.
//!
//! Normalization never fails. Malformed quantities default to 1,
//! malformed prices to 0 — a wrong-looking invoice is preferred over a
//! rejected order.

use rust_decimal::Decimal;
use tracing::debug;

use super::parse::{display_string, is_truthy, lenient_decimal, lenient_quantity, money};
use super::raw::RawLineItem;
use super::types::{DEFAULT_ACCOUNT_CODE, FALLBACK_DESCRIPTION, InvoiceLine, TaxType};

/// Property keys that together trigger the area-pricing rule.
/// Matching is exact and case-sensitive.
const PROP_LENGTH: &str = "Length";
const PROP_WIDTH: &str = "Width";
const PROP_PRICE_PER_SQFT: &str = "PricePerSqFt";

/// Normalize one raw order line into a canonical invoice line.
pub fn normalize_line_item(item: &RawLineItem) -> InvoiceLine {
    let title = item
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .or(item.name.as_deref().filter(|n| !n.is_empty()))
        .unwrap_or(FALLBACK_DESCRIPTION);

    if let Some(area) = area_pricing(item, title) {
        return InvoiceLine {
            description: area.description,
            // The area already captures total extent.
            quantity: 1,
            unit_amount: area.unit_amount,
            account_code: DEFAULT_ACCOUNT_CODE.to_string(),
            item_code: item_code(item),
            tax_type: tax_type(item),
        };
    }

    let quantity = lenient_quantity(item.quantity.as_ref());
    let price = lenient_decimal(item.price.as_ref(), Decimal::ZERO);
    if quantity.defaulted || price.defaulted {
        debug!(
            title,
            quantity_defaulted = quantity.defaulted,
            price_defaulted = price.defaulted,
            "line item had unparsable numeric fields, substituted defaults"
        );
    }

    InvoiceLine {
        description: title.to_string(),
        quantity: quantity.value,
        unit_amount: money(price.value),
        account_code: DEFAULT_ACCOUNT_CODE.to_string(),
        item_code: item_code(item),
        tax_type: tax_type(item),
    }
}

struct AreaPricing {
    unit_amount: Decimal,
    description: String,
}

/// Area-pricing override: unit amount = Length × Width × PricePerSqFt.
///
/// Triggers only when all three property keys are present. An order
/// line carrying `Length` and `Width` but no `PricePerSqFt` keeps base
/// pricing — intentional, matching how such carts have always been
/// billed.
fn area_pricing(item: &RawLineItem, title: &str) -> Option<AreaPricing> {
    let length_raw = item.property(PROP_LENGTH)?;
    let width_raw = item.property(PROP_WIDTH)?;
    let price_raw = item.property(PROP_PRICE_PER_SQFT)?;

    let length = lenient_decimal(Some(length_raw), Decimal::ZERO).value;
    let width = lenient_decimal(Some(width_raw), Decimal::ZERO).value;
    let price_per_sqft = lenient_decimal(Some(price_raw), Decimal::ZERO).value;

    // No unit conversion: dimensions are taken as-is. Products that
    // overflow the decimal range degrade to zero like any other
    // unusable numeric input.
    let area = length.checked_mul(width).unwrap_or_else(|| {
        debug!(title, "area computation overflowed, substituted zero");
        Decimal::ZERO
    });
    let unit_amount = money(area.checked_mul(price_per_sqft).unwrap_or_else(|| {
        debug!(title, "area price computation overflowed, substituted zero");
        Decimal::ZERO
    }));

    let length_text = display_string(length_raw).unwrap_or_else(|| length.to_string());
    let width_text = display_string(width_raw).unwrap_or_else(|| width.to_string());
    let description = format!(
        "{title} - {length_text}ft x {width_text}ft ({} sq ft)",
        money(area)
    );

    Some(AreaPricing {
        unit_amount,
        description,
    })
}

fn item_code(item: &RawLineItem) -> Option<String> {
    item.sku
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn tax_type(item: &RawLineItem) -> Option<TaxType> {
    is_truthy(item.taxable.as_ref()).then_some(TaxType::Output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(v: serde_json::Value) -> RawLineItem {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn base_line_uses_title_quantity_price() {
        let line = normalize_line_item(&item(json!({
            "title": "Oak Shelf",
            "quantity": 2,
            "price": "49.90",
            "sku": "OAK-S",
            "taxable": true
        })));
        assert_eq!(line.description, "Oak Shelf");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_amount.to_string(), "49.90");
        assert_eq!(line.account_code, "200");
        assert_eq!(line.item_code.as_deref(), Some("OAK-S"));
        assert_eq!(line.tax_type, Some(TaxType::Output));
    }

    #[test]
    fn name_backs_up_title_and_product_backs_up_both() {
        let line = normalize_line_item(&item(json!({ "name": "Pine Board", "price": 5 })));
        assert_eq!(line.description, "Pine Board");
        let line = normalize_line_item(&item(json!({ "price": 5 })));
        assert_eq!(line.description, "Product");
        let line = normalize_line_item(&item(json!({ "title": "", "price": 5 })));
        assert_eq!(line.description, "Product");
    }

    #[test]
    fn malformed_numbers_degrade_to_defaults() {
        let line = normalize_line_item(&item(json!({
            "title": "Widget",
            "quantity": "a few",
            "price": "cheap"
        })));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_amount.to_string(), "0.00");
    }

    #[test]
    fn area_pricing_computes_amount_and_description() {
        let line = normalize_line_item(&item(json!({
            "title": "Custom Countertop",
            "quantity": 4,
            "price": "10.00",
            "properties": [
                { "name": "Length", "value": "10" },
                { "name": "Width", "value": "8" },
                { "name": "PricePerSqFt", "value": "1.5" }
            ]
        })));
        assert_eq!(line.unit_amount.to_string(), "120.00");
        assert_eq!(line.quantity, 1);
        assert_eq!(
            line.description,
            "Custom Countertop - 10ft x 8ft (80.00 sq ft)"
        );
    }

    #[test]
    fn area_pricing_requires_all_three_keys() {
        // Length and Width alone keep base pricing.
        let line = normalize_line_item(&item(json!({
            "title": "Custom Countertop",
            "quantity": 4,
            "price": "10.00",
            "properties": [
                { "name": "Length", "value": "10" },
                { "name": "Width", "value": "8" }
            ]
        })));
        assert_eq!(line.unit_amount.to_string(), "10.00");
        assert_eq!(line.quantity, 4);
        assert_eq!(line.description, "Custom Countertop");
    }

    #[test]
    fn area_keys_are_case_sensitive() {
        let line = normalize_line_item(&item(json!({
            "title": "Mat",
            "price": "3.00",
            "properties": [
                { "name": "length", "value": "10" },
                { "name": "width", "value": "8" },
                { "name": "PricePerSqFt", "value": "1.5" }
            ]
        })));
        assert_eq!(line.unit_amount.to_string(), "3.00");
    }

    #[test]
    fn empty_sku_attaches_no_item_code() {
        let line = normalize_line_item(&item(json!({ "title": "X", "price": 1, "sku": "" })));
        assert_eq!(line.item_code, None);
    }

    #[test]
    fn untaxable_line_has_no_tax_type() {
        for taxable in [json!(false), json!(0), json!(null), json!("")] {
            let line =
                normalize_line_item(&item(json!({ "title": "X", "price": 1, "taxable": taxable })));
            assert_eq!(line.tax_type, None);
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let raw = item(json!({
            "title": "Custom Countertop",
            "quantity": 4,
            "price": "10.00",
            "sku": "CT-1",
            "taxable": true,
            "properties": [
                { "name": "Length", "value": "10" },
                { "name": "Width", "value": "8" },
                { "name": "PricePerSqFt", "value": "1.5" }
            ]
        }));
        assert_eq!(normalize_line_item(&raw), normalize_line_item(&raw));
    }
}
