use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed sales account code applied to every line. There is no
/// chart-of-accounts lookup.
pub const DEFAULT_ACCOUNT_CODE: &str = "200";

/// Contact name used when an order carries no usable customer name.
pub const FALLBACK_CONTACT_NAME: &str = "Walk-in Customer";

/// Line description used when an order line has neither title nor name.
pub const FALLBACK_DESCRIPTION: &str = "Product";

/// Currency applied when neither the order nor the organisation
/// provides one.
pub const FALLBACK_CURRENCY: &str = "USD";

/// Payment terms: invoices fall due this many days after issue.
pub const DUE_DATE_NET_DAYS: u64 = 30;

/// The canonical invoice document — the platform-agnostic form every
/// order and quote is normalized into, ready for submission to the
/// accounting API. Constructed once, sent once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    /// Document type. Always accounts-receivable for order-derived
    /// invoices.
    pub invoice_type: InvoiceType,
    /// Billing contact derived from the order.
    pub contact: InvoiceContact,
    /// At least one line: the normalized order lines plus at most one
    /// synthetic shipping and one synthetic discount line.
    pub line_items: Vec<InvoiceLine>,
    /// Issue date (clock read at build time).
    pub date: NaiveDate,
    /// Due date = issue date + [`DUE_DATE_NET_DAYS`].
    pub due_date: NaiveDate,
    /// Order number, order name, or an epoch-derived fallback.
    pub invoice_number: String,
    /// Human-readable origin, e.g. `"Order: 1001"` or `"Quote: Q-7"`.
    pub reference: String,
    /// `Authorised` for orders, `Draft` for quotes.
    pub status: InvoiceStatus,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

/// One canonical invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub description: String,
    /// Always at least 1; forced to 1 under the area-pricing rule.
    pub quantity: u32,
    /// Unit amount fixed to two decimal places.
    pub unit_amount: Decimal,
    /// Always [`DEFAULT_ACCOUNT_CODE`].
    pub account_code: String,
    /// Present only when the order line carried a non-empty SKU.
    pub item_code: Option<String>,
    /// Present only when the order line was marked taxable.
    pub tax_type: Option<TaxType>,
}

/// Billing contact derived from an order or quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceContact {
    /// Never empty — falls back to [`FALLBACK_CONTACT_NAME`].
    pub name: String,
    pub email_address: Option<String>,
    pub phone: Option<String>,
    /// Zero or one postal address.
    pub addresses: Vec<ContactAddress>,
}

/// Postal address attached to a contact. Missing source fields become
/// empty strings rather than being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAddress {
    pub address_type: AddressType,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
}

/// Xero invoice type codes (subset used by this bridge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceType {
    /// ACCREC — accounts receivable (sales invoice).
    AccountsReceivable,
}

impl InvoiceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountsReceivable => "ACCREC",
        }
    }
}

/// Invoice lifecycle status. Draft invoices require manual
/// confirmation in the accounting platform; authorised ones are
/// finalized immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Authorised,
    Draft,
}

impl InvoiceStatus {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Authorised => "AUTHORISED",
            Self::Draft => "DRAFT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AUTHORISED" => Some(Self::Authorised),
            "DRAFT" => Some(Self::Draft),
            _ => None,
        }
    }
}

/// Xero tax type codes (subset used by this bridge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    /// OUTPUT — sales tax on taxable lines.
    Output,
}

impl TaxType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Output => "OUTPUT",
        }
    }
}

/// Xero address type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressType {
    /// POBOX — the postal/billing address slot.
    PoBox,
    /// STREET — the physical address slot.
    Street,
}

impl AddressType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::PoBox => "POBOX",
            Self::Street => "STREET",
        }
    }
}

/// Explicit session state for one connected organisation, passed into
/// the call path instead of living in process-wide globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// The accounting platform's identifier for the connected
    /// organisation.
    pub tenant_id: String,
    /// The organisation's base currency, if already resolved.
    pub base_currency: Option<String>,
}

impl SessionContext {
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            base_currency: None,
        }
    }

    pub fn with_base_currency(mut self, currency: impl Into<String>) -> Self {
        self.base_currency = Some(currency.into());
        self
    }
}
