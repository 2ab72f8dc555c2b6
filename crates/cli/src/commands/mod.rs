//! Subcommand implementations.

pub mod promptpay;
pub mod token;
pub mod total;
