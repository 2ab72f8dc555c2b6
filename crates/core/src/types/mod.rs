//! Core types for Campus Merch.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod garment;
pub mod line_item;
pub mod price;
pub mod promptpay_id;

pub use garment::{Size, Sleeve, UnknownOption};
pub use line_item::LineItem;
pub use price::{CurrencyCode, Price, format_amount_2dp};
pub use promptpay_id::{PromptPayId, PromptPayIdError, PromptPayTarget};
