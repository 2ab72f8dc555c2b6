//! Garment options offered in the shop.
//!
//! Sizes and sleeve styles arrive from the cart as loose strings. Parsing is
//! case-insensitive and tolerant of surrounding whitespace so that the price
//! table can be keyed on a closed enum.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a size or sleeve string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownOption {
    /// Which option failed to parse (`"size"` or `"sleeve"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Shirt size, smallest to largest.
///
/// `Ord` follows physical size, so `Size::S` is the minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "S")]
    S,
    #[serde(rename = "M")]
    M,
    #[serde(rename = "L")]
    L,
    #[serde(rename = "XL")]
    Xl,
    #[serde(rename = "2XL")]
    TwoXl,
    #[serde(rename = "3XL")]
    ThreeXl,
    #[serde(rename = "4XL")]
    FourXl,
    #[serde(rename = "5XL")]
    FiveXl,
}

impl Size {
    /// All sizes in ascending order.
    pub const ALL: [Self; 8] = [
        Self::S,
        Self::M,
        Self::L,
        Self::Xl,
        Self::TwoXl,
        Self::ThreeXl,
        Self::FourXl,
        Self::FiveXl,
    ];

    /// The label printed on the size chart.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::Xl => "XL",
            Self::TwoXl => "2XL",
            Self::ThreeXl => "3XL",
            Self::FourXl => "4XL",
            Self::FiveXl => "5XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Size {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::Xl),
            "2XL" | "XXL" => Ok(Self::TwoXl),
            "3XL" | "XXXL" => Ok(Self::ThreeXl),
            "4XL" => Ok(Self::FourXl),
            "5XL" => Ok(Self::FiveXl),
            _ => Err(UnknownOption {
                kind: "size",
                value: s.to_owned(),
            }),
        }
    }
}

/// Sleeve style. Only jerseys come in a long-sleeve cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sleeve {
    #[default]
    Short,
    Long,
}

impl fmt::Display for Sleeve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => write!(f, "SHORT"),
            Self::Long => write!(f, "LONG"),
        }
    }
}

impl FromStr for Sleeve {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHORT" => Ok(Self::Short),
            "LONG" => Ok(Self::Long),
            _ => Err(UnknownOption {
                kind: "sleeve",
                value: s.to_owned(),
            }),
        }
    }
}
