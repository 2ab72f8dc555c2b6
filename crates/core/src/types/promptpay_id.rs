//! PromptPay merchant identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Prefix that marks a PromptPay e-wallet identifier.
pub const EWALLET_PREFIX: &str = "00400";

/// National ID / tax ID length. Anything at least this long that is not an
/// e-wallet is treated as a tax ID.
pub const TAX_ID_MIN_LENGTH: usize = 13;

/// Errors that can occur when parsing a [`PromptPayId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PromptPayIdError {
    /// The input is empty after removing separators.
    #[error("PromptPay ID cannot be empty")]
    Empty,
    /// The input contains something other than digits and separators.
    #[error("PromptPay ID must contain only digits, found {0:?}")]
    InvalidCharacter(char),
    /// The input is longer than any PromptPay target.
    #[error("PromptPay ID must be at most {max} digits")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// How a PromptPay identifier is routed, with its TLV sub-tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptPayTarget {
    /// Thai mobile number, sub-tag `01`.
    Mobile,
    /// National ID or tax ID, sub-tag `02`.
    TaxId,
    /// E-wallet ID, sub-tag `03`.
    EWallet,
}

impl PromptPayTarget {
    /// Sub-tag inside merchant account information (tag `29`).
    #[must_use]
    pub const fn sub_tag(self) -> &'static str {
        match self {
            Self::Mobile => "01",
            Self::TaxId => "02",
            Self::EWallet => "03",
        }
    }
}

/// A PromptPay merchant identifier: a mobile number, tax ID or e-wallet ID.
///
/// Spaces and dashes are stripped on parse, so identifiers can be copied
/// straight from a bank statement.
///
/// ```
/// use campus_merch_core::{PromptPayId, PromptPayTarget};
///
/// let id = PromptPayId::parse("081-234-5678").unwrap();
/// assert_eq!(id.as_str(), "0812345678");
/// assert_eq!(id.target(), PromptPayTarget::Mobile);
/// assert_eq!(id.account_value(), "0066812345678");
///
/// assert!(PromptPayId::parse("").is_err());
/// assert!(PromptPayId::parse("08x").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PromptPayId(String);

impl PromptPayId {
    /// Longest identifier accepted (e-wallet IDs are 15 digits).
    pub const MAX_LENGTH: usize = 15;

    /// Parse a `PromptPayId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains anything other than
    /// digits, spaces and dashes, or is longer than 15 digits.
    pub fn parse(s: &str) -> Result<Self, PromptPayIdError> {
        let mut digits = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' => {}
                other => return Err(PromptPayIdError::InvalidCharacter(other)),
            }
        }

        if digits.is_empty() {
            return Err(PromptPayIdError::Empty);
        }

        if digits.len() > Self::MAX_LENGTH {
            return Err(PromptPayIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(digits))
    }

    /// Returns the normalised identifier (digits only).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the identifier by its shape.
    #[must_use]
    pub fn target(&self) -> PromptPayTarget {
        if self.0.starts_with(EWALLET_PREFIX) {
            PromptPayTarget::EWallet
        } else if self.0.len() >= TAX_ID_MIN_LENGTH {
            PromptPayTarget::TaxId
        } else {
            PromptPayTarget::Mobile
        }
    }

    /// The value placed under the target sub-tag.
    ///
    /// E-wallet and tax IDs are used verbatim. Mobile numbers lose one
    /// leading zero, gain the `66` country code, and are zero-padded on the
    /// left to 13 digits.
    #[must_use]
    pub fn account_value(&self) -> String {
        match self.target() {
            PromptPayTarget::EWallet | PromptPayTarget::TaxId => self.0.clone(),
            PromptPayTarget::Mobile => {
                let national = self.0.strip_prefix('0').unwrap_or(&self.0);
                format!("{:0>width$}", format!("66{national}"), width = TAX_ID_MIN_LENGTH)
            }
        }
    }
}

impl fmt::Display for PromptPayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for PromptPayId {
    type Err = PromptPayIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PromptPayId {
    type Error = PromptPayIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PromptPayId> for String {
    fn from(id: PromptPayId) -> Self {
        id.0
    }
}

impl AsRef<str> for PromptPayId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
