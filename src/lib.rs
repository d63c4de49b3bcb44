//! # ledgerlink
//!
//! Bridges e-commerce order events (Shopify webhooks, storefront
//! submissions, quote requests) to Xero by normalizing heterogeneous
//! order payloads into one canonical invoice document.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Malformed numeric fields in order payloads degrade to safe
//! defaults instead of rejecting the order; see [`core::parse`].
//!
//! ## Quick Start
//!
//! ```rust
//! use ledgerlink::core::*;
//!
//! let order: ShopifyOrder = serde_json::from_str(r#"{
//!     "id": 4471,
//!     "order_number": 1001,
//!     "email": "jane@example.com",
//!     "currency": "USD",
//!     "customer": { "first_name": "Jane", "last_name": "Doe" },
//!     "line_items": [{ "title": "Oak Shelf", "quantity": 2, "price": "49.90", "sku": "OAK-S" }]
//! }"#).unwrap();
//!
//! let ctx = SessionContext::new("tenant-1");
//! let clock = FixedClock::ymd(2024, 6, 15);
//! let invoice = normalize_order_to_invoice(&RawOrder::Shopify(order), &ctx, &clock);
//!
//! assert_eq!(invoice.invoice_number, "1001");
//! assert_eq!(invoice.status, InvoiceStatus::Authorised);
//! assert_eq!(invoice.line_items[0].unit_amount.to_string(), "49.90");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Order shapes, normalization, invoice document model |
//! | `xero` | Async Xero REST client (invoices, organisation lookup) |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xero")]
pub mod xero;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
