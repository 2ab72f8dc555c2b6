//! Order total command.

use std::io::Read;
use std::path::Path;

use campus_merch_core::{Price, order_total_from_json};
use thiserror::Error;

/// Errors that can occur in the total command.
#[derive(Debug, Error)]
pub enum TotalError {
    #[error("Failed to read cart: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cart is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Total of a cart given as JSON text.
fn total_of(text: &str) -> Result<Price, TotalError> {
    let cart: serde_json::Value = serde_json::from_str(text)?;
    Ok(Price::thb(order_total_from_json(&cart)))
}

/// Print the total of the cart at `path` (`-` for stdin).
pub fn show(path: &Path) -> Result<(), TotalError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    let price = total_of(&text)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", price.display());
    }
    Ok(())
}
