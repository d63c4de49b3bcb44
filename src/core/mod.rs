//! Order normalization and the canonical invoice document model.
//!
//! This module turns the three known inbound order shapes (Shopify
//! webhook orders, storefront orders, quote requests) into the one
//! canonical document the Xero client submits.

mod builder;
mod clock;
mod contact;
mod error;
mod line_items;
mod totals;
mod types;
pub mod currencies;
pub mod parse;
pub mod raw;

pub use builder::*;
pub use clock::*;
pub use contact::*;
pub use currencies::is_known_currency_code;
pub use error::*;
pub use line_items::*;
pub use raw::*;
pub use totals::*;
pub use types::*;
