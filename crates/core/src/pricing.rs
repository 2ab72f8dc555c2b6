//! Order totals over the fixed garment price table.
//!
//! Two products are priced from the table: the jersey and the crew-neck
//! shirt. Everything else in the shop (totes, lanyards, pre-order extras)
//! carries its own price on the line item. Prices are whole baht.
//!
//! Totalling never fails. An empty or missing cart totals zero, and a line
//! that can't be read is priced at its fallback instead of rejecting the
//! order. A line whose amount does not fit in a `Decimal` is treated as
//! malformed and contributes zero.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::types::{LineItem, Size, Sleeve};

/// Surcharge, in baht, for a long-sleeve jersey.
pub const LONG_SLEEVE_SURCHARGE: i64 = 50;

/// Product family detected from a line item's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductFamily {
    /// Team jersey; long sleeves cost extra.
    Jersey,
    /// Crew-neck shirt.
    Crew,
}

impl ProductFamily {
    /// Detect the family by case-insensitive substring match on `name`.
    ///
    /// `JERSEY` is checked before `CREW`.
    #[must_use]
    pub fn detect(name: &str) -> Option<Self> {
        let upper = name.to_uppercase();
        if upper.contains("JERSEY") {
            Some(Self::Jersey)
        } else if upper.contains("CREW") {
            Some(Self::Crew)
        } else {
            None
        }
    }

    /// Table price, in whole baht, for `size`.
    #[must_use]
    pub const fn base_price(self, size: Size) -> i64 {
        match (self, size) {
            (Self::Jersey, Size::S | Size::M | Size::L | Size::Xl) => 339,
            (Self::Jersey, Size::TwoXl | Size::ThreeXl) => 369,
            (Self::Jersey, Size::FourXl | Size::FiveXl) => 399,
            (Self::Crew, Size::S | Size::M | Size::L | Size::Xl) => 259,
            (Self::Crew, Size::TwoXl | Size::ThreeXl) => 289,
            (Self::Crew, Size::FourXl | Size::FiveXl) => 319,
        }
    }
}

/// Whether a line item is a long-sleeve cut, either by its sleeve field or
/// by `LONG` appearing in the name.
fn is_long_sleeve(item: &LineItem) -> bool {
    item.sleeve == Some(Sleeve::Long) || item.name.to_uppercase().contains("LONG")
}

/// Unit price of a single line item.
///
/// Table products with an unknown size are priced at the smallest size.
/// Products outside the table use the item's declared price, or zero.
#[must_use]
pub fn unit_price(item: &LineItem) -> Decimal {
    match ProductFamily::detect(&item.name) {
        Some(family) => {
            let size = item.size.unwrap_or(Size::S);
            let mut price = family.base_price(size);
            if family == ProductFamily::Jersey && is_long_sleeve(item) {
                price += LONG_SLEEVE_SURCHARGE;
            }
            Decimal::from(price)
        }
        None => item.price.unwrap_or(Decimal::ZERO),
    }
}

/// Total of a line item: unit price times quantity.
///
/// Zero if the product overflows.
#[must_use]
pub fn line_total(item: &LineItem) -> Decimal {
    unit_price(item)
        .checked_mul(Decimal::from(item.effective_qty()))
        .unwrap_or_else(|| {
            tracing::warn!(name = %item.name, "line total overflowed, pricing line at zero");
            Decimal::ZERO
        })
}

/// Total of an order.
///
/// `None` and an empty slice both total zero. A line that would push the
/// running total past `Decimal::MAX` is skipped.
///
/// ```
/// use campus_merch_core::{LineItem, Size, Sleeve, calculate_order_total};
/// use rust_decimal::Decimal;
///
/// let jersey = LineItem::new("JERSEY", Size::M).with_qty(2);
/// assert_eq!(calculate_order_total(Some([jersey.clone()].as_slice())), Decimal::from(678));
///
/// let long = jersey.with_sleeve(Sleeve::Long);
/// assert_eq!(calculate_order_total(Some([long].as_slice())), Decimal::from(778));
///
/// assert_eq!(calculate_order_total(None), Decimal::ZERO);
/// ```
#[must_use]
pub fn calculate_order_total(items: Option<&[LineItem]>) -> Decimal {
    items
        .unwrap_or_default()
        .iter()
        .map(line_total)
        .fold(Decimal::ZERO, |total, line| {
            total.checked_add(line).unwrap_or_else(|| {
                tracing::warn!("order total overflowed, skipping line");
                total
            })
        })
}

/// Total of a cart given as raw JSON.
///
/// Anything other than an array totals zero. Array elements that are not
/// objects are priced as an empty line (zero); malformed fields inside an
/// object fall back as described on [`LineItem`].
#[must_use]
pub fn order_total_from_json(value: &Value) -> Decimal {
    let Some(entries) = value.as_array() else {
        return Decimal::ZERO;
    };

    let items: Vec<LineItem> = entries
        .iter()
        .map(|entry| LineItem::from_json(entry).unwrap_or_default())
        .collect();

    calculate_order_total(Some(items.as_slice()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_jersey_medium_pair() {
        let items = [LineItem::new("JERSEY", Size::M).with_qty(2)];
        assert_eq!(calculate_order_total(Some(items.as_slice())), Decimal::from(678));
    }

    #[test]
    fn test_jersey_long_sleeve_field() {
        let items = [LineItem::new("JERSEY", Size::M)
            .with_qty(2)
            .with_sleeve(Sleeve::Long)];
        assert_eq!(calculate_order_total(Some(items.as_slice())), Decimal::from(778));
    }

    #[test]
    fn test_jersey_long_sleeve_in_name() {
        let item = LineItem::new("Jersey Long Sleeve", Size::M);
        assert_eq!(unit_price(&item), Decimal::from(389));
    }

    #[test]
    fn test_crew_long_has_no_surcharge() {
        let item = LineItem::new("CREW", Size::M).with_sleeve(Sleeve::Long);
        assert_eq!(unit_price(&item), Decimal::from(259));
    }

    #[test]
    fn test_family_detection_case_insensitive() {
        assert_eq!(
            ProductFamily::detect("faculty jersey 2025"),
            Some(ProductFamily::Jersey)
        );
        assert_eq!(ProductFamily::detect("Crew Neck"), Some(ProductFamily::Crew));
        assert_eq!(ProductFamily::detect("Tote bag"), None);
    }

    #[test]
    fn test_large_sizes() {
        assert_eq!(
            unit_price(&LineItem::new("JERSEY", Size::TwoXl)),
            Decimal::from(369)
        );
        assert_eq!(
            unit_price(&LineItem::new("CREW", Size::FiveXl)),
            Decimal::from(319)
        );
    }

    #[test]
    fn test_unknown_size_uses_smallest() {
        let item = LineItem {
            name: "CREW".to_string(),
            ..LineItem::default()
        };
        assert_eq!(unit_price(&item), Decimal::from(ProductFamily::Crew.base_price(Size::S)));
    }

    #[test]
    fn test_other_product_uses_declared_price() {
        let item = LineItem {
            name: "Lanyard".to_string(),
            price: Some(Decimal::new(4550, 2)),
            qty: 2,
            ..LineItem::default()
        };
        assert_eq!(line_total(&item), Decimal::new(9100, 2));
    }

    #[test]
    fn test_other_product_without_price_is_free() {
        let item = LineItem {
            name: "Sticker".to_string(),
            ..LineItem::default()
        };
        assert_eq!(line_total(&item), Decimal::ZERO);
    }

    #[test]
    fn test_table_price_ignores_declared_price() {
        let item = LineItem::new("JERSEY", Size::M).with_price(Decimal::ONE);
        assert_eq!(unit_price(&item), Decimal::from(339));
    }

    #[test]
    fn test_zero_quantity_counts_as_one() {
        let item = LineItem::new("JERSEY", Size::M).with_qty(0);
        assert_eq!(line_total(&item), Decimal::from(339));
    }

    #[test]
    fn test_empty_and_missing() {
        assert_eq!(calculate_order_total(Some(&[] as &[LineItem])), Decimal::ZERO);
        assert_eq!(calculate_order_total(None), Decimal::ZERO);
    }

    #[test]
    fn test_mixed_cart() {
        let items = [
            LineItem::new("JERSEY", Size::L).with_qty(1),
            LineItem::new("CREW", Size::ThreeXl).with_qty(2),
            LineItem::new("Tote", Size::M).with_price(Decimal::from(150)),
        ];
        // 339 + 2 * 289 + 150
        assert_eq!(calculate_order_total(Some(items.as_slice())), Decimal::from(1067));
    }

    #[test]
    fn test_json_matches_typed() {
        let cart = json!([{"name": "JERSEY", "size": "M", "qty": 2, "sleeve": "LONG"}]);
        assert_eq!(order_total_from_json(&cart), Decimal::from(778));
    }

    #[test]
    fn test_json_non_array_is_zero() {
        assert_eq!(order_total_from_json(&Value::Null), Decimal::ZERO);
        assert_eq!(order_total_from_json(&json!({"name": "JERSEY"})), Decimal::ZERO);
        assert_eq!(order_total_from_json(&json!("JERSEY")), Decimal::ZERO);
    }

    #[test]
    fn test_json_malformed_entries_do_not_abort() {
        let cart = json!([
            null,
            42,
            {"name": "CREW", "size": "??", "qty": "2"},
            {"name": "Pin", "price": "not a number"},
        ]);
        // Only the crew line contributes: smallest-size price times two.
        assert_eq!(order_total_from_json(&cart), Decimal::from(518));
    }

    #[test]
    fn test_overflowing_line_is_priced_at_zero() {
        let cart = json!([
            {"name": "Tote", "price": "79228162514264337593543950335", "qty": 2},
            {"name": "JERSEY", "size": "M"},
        ]);
        assert_eq!(order_total_from_json(&cart), Decimal::from(339));
    }

    #[test]
    fn test_overflowing_sum_skips_line() {
        let cart = json!([
            {"name": "Tote", "price": "50000000000000000000000000000"},
            {"name": "Tote", "price": "50000000000000000000000000000"},
            {"name": "CREW", "size": "L"},
        ]);
        assert_eq!(
            order_total_from_json(&cart),
            Decimal::from_str_exact("50000000000000000000000000259").unwrap()
        );
    }
}
