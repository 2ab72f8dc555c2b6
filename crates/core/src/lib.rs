//! Campus Merch Core - payment payloads, pricing and image tokens.
//!
//! This crate holds the pieces of the storefront that carry a real
//! algorithmic contract and can be tested in isolation. It is shared by:
//! - `storefront` - Public checkout and image-proxy endpoints
//! - `cli` - Operator tooling for tokens, QR payloads and order totals
//!
//! # Architecture
//!
//! Everything here is synchronous and stateless. Secrets and merchant
//! identifiers are passed in by the caller; nothing in this crate reads the
//! process environment, touches the network, or talks to a database.
//!
//! # Modules
//!
//! - [`types`] - Garment sizes, order line items, prices and PromptPay IDs
//! - [`promptpay`] - TLV/CRC16 encoding and PromptPay QR payloads
//! - [`pricing`] - Order totals over the fixed garment price table
//! - [`image_token`] - Encrypted, URL-safe tokens for storage object URLs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod image_token;
pub mod pricing;
pub mod promptpay;
pub mod types;

pub use image_token::{ImageCipher, ImageCipherError};
pub use pricing::{calculate_order_total, order_total_from_json};
pub use promptpay::{PromptPayConfig, PromptPayError};
pub use types::*;
