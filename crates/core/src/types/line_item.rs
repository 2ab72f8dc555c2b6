//! Order line items as they arrive from the cart.
//!
//! The cart is assembled client-side, so every field is read leniently:
//! a size nobody recognises, a quantity sent as a string, or a price that
//! isn't a number never rejects the whole item. Pricing decides what those
//! gaps mean.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::garment::{Size, Sleeve};

/// A single line in a cart or order.
///
/// ```
/// use campus_merch_core::{LineItem, Size};
///
/// let item: LineItem = serde_json::from_str(r#"{"name":"Jersey","size":"m","qty":"2"}"#).unwrap();
/// assert_eq!(item.size, Some(Size::M));
/// assert_eq!(item.qty, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product name; the product family is detected from it.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Garment size, `None` when absent or unrecognised.
    #[serde(default, deserialize_with = "lenient_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Sleeve style, `None` when absent or unrecognised.
    #[serde(default, deserialize_with = "lenient_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleeve: Option<Sleeve>,
    /// Quantity ordered. Zero means "not given" and is priced as one.
    #[serde(default, deserialize_with = "lenient_qty")]
    pub qty: u32,
    /// Declared unit price, used only for products outside the price table.
    #[serde(default, deserialize_with = "lenient_price")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl LineItem {
    /// Create a line item for one unit of `name` in `size`.
    #[must_use]
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self {
            name: name.into(),
            size: Some(size),
            sleeve: None,
            qty: 1,
            price: None,
        }
    }

    /// Set the quantity.
    #[must_use]
    pub const fn with_qty(mut self, qty: u32) -> Self {
        self.qty = qty;
        self
    }

    /// Set the sleeve style.
    #[must_use]
    pub const fn with_sleeve(mut self, sleeve: Sleeve) -> Self {
        self.sleeve = Some(sleeve);
        self
    }

    /// Set the declared unit price.
    #[must_use]
    pub const fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Quantity used for pricing; a missing quantity counts as one.
    #[must_use]
    pub const fn effective_qty(&self) -> u32 {
        if self.qty == 0 { 1 } else { self.qty }
    }

    /// Read a line item from a JSON value, or `None` if it is not an object.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| s.parse().ok()))
}

fn lenient_qty<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let qty = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|q| u32::try_from(q).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(qty.unwrap_or(0))
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    Ok(price.filter(|p| !p.is_sign_negative()))
}
