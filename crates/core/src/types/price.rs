//! Type-safe price representation using decimal arithmetic.
//!
//! The shop only sells in Thai Baht, but the currency travels with the
//! amount so that payment payloads can pull the ISO 4217 numeric code from
//! the same place the display string comes from.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (baht, not satang).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Thai Baht.
    #[must_use]
    pub const fn thb(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::THB)
    }

    /// The amount with exactly two fraction digits, rounded half away from zero.
    ///
    /// ```
    /// use campus_merch_core::Price;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Price::thb(Decimal::new(100, 0)).fixed_2dp(), "100.00");
    /// assert_eq!(Price::thb(Decimal::new(10_005, 3)).fixed_2dp(), "10.01");
    /// ```
    #[must_use]
    pub fn fixed_2dp(&self) -> String {
        format_amount_2dp(self.amount)
    }

    /// Format for display (e.g., "฿678.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{}", self.currency_code.symbol(), self.fixed_2dp())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Round to two decimal places (half away from zero) and render with
/// exactly two fraction digits.
#[must_use]
pub fn format_amount_2dp(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    THB,
}

impl CurrencyCode {
    /// Alphabetic code (e.g., "THB").
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::THB => "THB",
        }
    }

    /// Numeric code as used in EMV payment payloads (e.g., "764").
    #[must_use]
    pub const fn numeric(self) -> &'static str {
        match self {
            Self::THB => "764",
        }
    }

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::THB => "฿",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_whole_numbers() {
        assert_eq!(format_amount_2dp(Decimal::new(678, 0)), "678.00");
        assert_eq!(format_amount_2dp(Decimal::ZERO), "0.00");
    }

    #[test]
    fn test_format_rounds_half_up() {
        assert_eq!(format_amount_2dp(Decimal::new(1005, 3)), "1.01");
        assert_eq!(format_amount_2dp(Decimal::new(1015, 3)), "1.02");
        assert_eq!(format_amount_2dp(Decimal::new(1004, 3)), "1.00");
    }

    #[test]
    fn test_format_keeps_two_digits() {
        assert_eq!(format_amount_2dp(Decimal::new(2505, 1)), "250.50");
    }

    #[test]
    fn test_display() {
        let price = Price::thb(Decimal::new(778, 0));
        assert_eq!(price.display(), "฿778.00");
        assert_eq!(price.to_string(), "฿778.00");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::THB);
        assert_eq!(CurrencyCode::THB.code(), "THB");
        assert_eq!(CurrencyCode::THB.numeric(), "764");
    }
}
