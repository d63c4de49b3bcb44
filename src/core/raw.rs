//! Raw inbound order shapes, as they arrive on the wire.
//!
//! Three shapes are known: Shopify webhook orders, storefront orders
//! (same layout, customer-supplied, with weaker guarantees), and quote
//! requests. They are modeled as distinct types rather than one bag of
//! optionals so each variant carries exactly the guarantees its source
//! actually makes.
//!
//! Numeric-ish fields (`price`, `quantity`, `total_discounts`, …) are
//! kept as [`serde_json::Value`]: real payloads send them as strings or
//! numbers interchangeably, and a malformed value must never reject the
//! whole order. Interpretation happens later via [`crate::core::parse`].

use serde::Deserialize;
use serde_json::Value;

/// An inbound order from any known source.
#[derive(Debug, Clone)]
pub enum RawOrder {
    /// Shopify webhook payload. Guarantees `id` and `currency`.
    Shopify(ShopifyOrder),
    /// Storefront submission. Same layout, but `id` and `currency` may
    /// be absent (currency is then resolved from the organisation).
    Custom(CustomOrder),
}

/// Order payload as delivered by a Shopify `orders/*` webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyOrder {
    pub id: Value,
    #[serde(default)]
    pub order_number: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub customer: Option<RawCustomer>,
    #[serde(default)]
    pub billing_address: Option<RawAddress>,
    #[serde(default)]
    pub shipping_address: Option<RawAddress>,
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
    pub currency: String,
    #[serde(default)]
    pub shipping_lines: Vec<RawShippingLine>,
    #[serde(default)]
    pub total_tax: Option<Value>,
    #[serde(default)]
    pub total_discounts: Option<Value>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Order payload submitted by a custom storefront. Mirrors the Shopify
/// layout but nothing beyond `line_items` can be relied on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomOrder {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub order_number: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub customer: Option<RawCustomer>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub billing_address: Option<RawAddress>,
    #[serde(default)]
    pub shipping_address: Option<RawAddress>,
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub shipping_lines: Vec<RawShippingLine>,
    #[serde(default)]
    pub total_tax: Option<Value>,
    #[serde(default)]
    pub total_discounts: Option<Value>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Customer block nested inside an order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCustomer {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub default_address: Option<RawAddress>,
}

/// Billing or shipping address block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// One raw order line.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub taxable: Option<Value>,
    #[serde(default)]
    pub properties: Vec<RawProperty>,
}

/// Free-form key/value pair attached to a line item. Shopify carts use
/// these for per-item options (`Length`, `Width`, `PricePerSqFt`, …).
/// Names are unique in practice; duplicates resolve last-wins.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProperty {
    pub name: String,
    /// Kept as a plain `Value` (defaulting to null) so a present key
    /// with a null value still counts as present.
    #[serde(default)]
    pub value: Value,
}

/// Shipping charge entry. Only the first entry's price is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawShippingLine {
    #[serde(default)]
    pub price: Option<Value>,
}

/// Ad hoc quote request — a reduced shape with no address, tax or
/// shipping concepts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub customer: Option<QuoteCustomer>,
    #[serde(default)]
    pub items: Vec<QuoteItem>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteCustomer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub unit_amount: Option<Value>,
}

impl RawLineItem {
    /// Property lookup by exact, case-sensitive name. Last entry wins
    /// on duplicate names.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .rev()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

impl RawOrder {
    pub fn line_items(&self) -> &[RawLineItem] {
        match self {
            Self::Shopify(o) => &o.line_items,
            Self::Custom(o) => &o.line_items,
        }
    }

    pub fn customer(&self) -> Option<&RawCustomer> {
        match self {
            Self::Shopify(o) => o.customer.as_ref(),
            Self::Custom(o) => o.customer.as_ref(),
        }
    }

    pub fn customer_name(&self) -> Option<&str> {
        match self {
            Self::Shopify(_) => None,
            Self::Custom(o) => o.customer_name.as_deref(),
        }
    }

    pub fn billing_address(&self) -> Option<&RawAddress> {
        match self {
            Self::Shopify(o) => o.billing_address.as_ref(),
            Self::Custom(o) => o.billing_address.as_ref(),
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Shopify(o) => o.email.as_deref(),
            Self::Custom(o) => o.email.as_deref(),
        }
    }

    pub fn order_number(&self) -> Option<&Value> {
        match self {
            Self::Shopify(o) => o.order_number.as_ref(),
            Self::Custom(o) => o.order_number.as_ref(),
        }
    }

    pub fn order_name(&self) -> Option<&str> {
        match self {
            Self::Shopify(o) => o.name.as_deref(),
            Self::Custom(o) => o.name.as_deref(),
        }
    }

    pub fn id(&self) -> Option<&Value> {
        match self {
            Self::Shopify(o) => Some(&o.id),
            Self::Custom(o) => o.id.as_ref(),
        }
    }

    /// Explicit order currency, if the payload carried one.
    pub fn currency(&self) -> Option<&str> {
        match self {
            Self::Shopify(o) => Some(o.currency.as_str()),
            Self::Custom(o) => o.currency.as_deref(),
        }
    }

    pub fn shipping_lines(&self) -> &[RawShippingLine] {
        match self {
            Self::Shopify(o) => &o.shipping_lines,
            Self::Custom(o) => &o.shipping_lines,
        }
    }

    pub fn total_discounts(&self) -> Option<&Value> {
        match self {
            Self::Shopify(o) => o.total_discounts.as_ref(),
            Self::Custom(o) => o.total_discounts.as_ref(),
        }
    }

    pub fn total_tax(&self) -> Option<&Value> {
        match self {
            Self::Shopify(o) => o.total_tax.as_ref(),
            Self::Custom(o) => o.total_tax.as_ref(),
        }
    }
}
