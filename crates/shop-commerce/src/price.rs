//! Lenient price coercion and formatting.
//!
//! Prices reach the client in several shapes: JSON numbers, decimal strings
//! from the API, `null` for unset sale prices, or free text typed into a
//! filter box. Everything funnels through [`PriceInput`] so that malformed
//! input becomes zero instead of an error.

use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;
use std::fmt;

use crate::money::{Currency, Money};

/// A price as it arrives from the outside world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceInput<'a> {
    /// No value at all (`null` / `undefined`).
    Missing,
    /// A numeric value.
    Number(f64),
    /// A textual value, parsed like a decimal literal.
    Text(&'a str),
}

impl PriceInput<'_> {
    /// Numeric value of the input, if it has a finite one.
    ///
    /// Text is read the way a browser reads `parseFloat`: leading whitespace
    /// is skipped and the longest numeric prefix is used, so `"12.50 USD"`
    /// reads as `12.5`.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match *self {
            PriceInput::Missing => return None,
            PriceInput::Number(n) => n,
            PriceInput::Text(s) => parse_float_prefix(s)?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for PriceInput<'_> {
    fn from(n: f64) -> Self {
        PriceInput::Number(n)
    }
}

impl From<i64> for PriceInput<'_> {
    fn from(n: i64) -> Self {
        PriceInput::Number(n as f64)
    }
}

impl From<i32> for PriceInput<'_> {
    fn from(n: i32) -> Self {
        PriceInput::Number(f64::from(n))
    }
}

impl<'a> From<&'a str> for PriceInput<'a> {
    fn from(s: &'a str) -> Self {
        PriceInput::Text(s)
    }
}

impl<'a> From<&'a String> for PriceInput<'a> {
    fn from(s: &'a String) -> Self {
        PriceInput::Text(s.as_str())
    }
}

impl<'a, T: Into<PriceInput<'a>>> From<Option<T>> for PriceInput<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PriceInput::Missing)
    }
}

impl<'a> From<&'a serde_json::Value> for PriceInput<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map_or(PriceInput::Missing, PriceInput::Number),
            serde_json::Value::String(s) => PriceInput::Text(s),
            _ => PriceInput::Missing,
        }
    }
}

impl From<Money> for PriceInput<'_> {
    fn from(m: Money) -> Self {
        PriceInput::Number(m.to_decimal())
    }
}

/// Format a price with two decimal places.
///
/// Missing, non-numeric and non-finite input formats as `"0.00"`. Never panics.
///
/// ```
/// use shop_commerce::price::format_price;
/// assert_eq!(format_price(12.5), "12.50");
/// assert_eq!(format_price("19.999"), "20.00");
/// assert_eq!(format_price(None::<f64>), "0.00");
/// assert_eq!(format_price("n/a"), "0.00");
/// ```
pub fn format_price<'a>(input: impl Into<PriceInput<'a>>) -> String {
    let value = input.into().to_f64().unwrap_or(0.0);
    // Avoid rendering "-0.00" for negative zero
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}

/// Coerce a price into a non-negative USD amount.
///
/// This is the write-time normalization used for cart items and decoded
/// catalog data: malformed and negative input become zero.
pub fn parse_price<'a>(input: impl Into<PriceInput<'a>>) -> Money {
    match input.into().to_f64() {
        Some(value) => Money::from_decimal(value, Currency::USD).non_negative(),
        None => Money::zero(Currency::USD),
    }
}

/// Longest numeric prefix of `s`, after leading whitespace.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Serde adapter for prices that may arrive as numbers, decimal strings or
/// `null`. Serializes as a JSON number.
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "shop_commerce::price::lenient")]
///     price: Money,
/// }
/// ```
pub mod lenient {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        deserializer
            .deserialize_any(PriceVisitor)
            .map(|value| value.map(parse_price).unwrap_or_else(|| Money::zero(Currency::USD)))
    }
}

/// Like [`lenient`], for optional prices. `null`, missing, zero and
/// unparseable values all decode as `None`.
pub mod lenient_option {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(money) => serializer.serialize_f64(money.to_decimal()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Money>, D::Error> {
        let value = deserializer.deserialize_any(PriceVisitor)?;
        Ok(value.map(parse_price).filter(Money::is_positive))
    }
}

/// Decodes any JSON scalar into an optional float.
struct PriceVisitor;

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Option<f64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a price as a number, a decimal string or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(PriceInput::Text(v).to_f64())
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}
