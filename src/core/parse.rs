//! Lenient numeric interpretation of untrusted order fields.
//!
//! Order ingestion must never hard-fail on a single malformed value, so
//! every numeric read degrades to a stated default instead of erroring.
//! The [`Lenient`] wrapper keeps that decision visible: callers can see
//! (and log) when a default was substituted.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use std::str::FromStr;

/// Result of a lenient parse: the usable value plus whether the input
/// had to be replaced by the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lenient<T> {
    pub value: T,
    pub defaulted: bool,
}

impl<T> Lenient<T> {
    fn parsed(value: T) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }
}

/// Interpret a JSON value as a decimal amount, accepting both numbers
/// and numeric strings. Anything else yields `default`.
pub fn lenient_decimal(value: Option<&Value>, default: Decimal) -> Lenient<Decimal> {
    match value {
        Some(Value::Number(n)) => match Decimal::from_str(&n.to_string()) {
            Ok(d) => Lenient::parsed(d),
            Err(_) => Lenient::fallback(default),
        },
        Some(Value::String(s)) => {
            let s = s.trim();
            match Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
                Ok(d) => Lenient::parsed(d),
                Err(_) => Lenient::fallback(default),
            }
        }
        _ => Lenient::fallback(default),
    }
}

/// Interpret a JSON value as an order quantity: integer, at least 1.
/// Fractional quantities truncate; non-numbers and values below 1 fall
/// back to 1.
pub fn lenient_quantity(value: Option<&Value>) -> Lenient<u32> {
    let parsed = lenient_decimal(value, Decimal::ONE);
    if parsed.defaulted {
        return Lenient::fallback(1);
    }
    let truncated = parsed.value.trunc();
    if truncated < Decimal::ONE {
        return Lenient::fallback(1);
    }
    match truncated.to_u32() {
        Some(q) => Lenient::parsed(q),
        None => Lenient::fallback(1),
    }
}

/// JSON truthiness as the order sources mean it: `false`, `0`, `""` and
/// `null` (or an absent field) are falsy, everything else is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Render a scalar JSON value for display in references and invoice
/// numbers. Strings pass through trimmed; numbers print as-is;
/// anything else is unusable.
pub fn display_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fix an amount to exactly two decimal places (round, then rescale so
/// `120` serializes as `"120.00"`). An amount too large in magnitude to
/// carry two decimal places is not representable as money and degrades
/// to zero.
pub fn money(amount: Decimal) -> Decimal {
    let mut d = amount.round_dp(2);
    d.rescale(2);
    if d.scale() != 2 {
        d = Decimal::ZERO;
        d.rescale(2);
    }
    d
}
