//! Campus merch CLI - image tokens, PromptPay links and order totals.
//!
//! # Usage
//!
//! ```bash
//! # Seal a storage URL into an image token
//! cm-cli token seal https://storage.example.com/slips/42.jpg
//!
//! # Open a token (current or retired key, either scheme)
//! cm-cli token open <token>
//!
//! # Reproduce a link in the legacy format
//! cm-cli token legacy https://storage.example.com/slips/42.jpg
//!
//! # PromptPay QR link for 678 baht
//! cm-cli promptpay 678
//!
//! # Total of a cart file ("-" reads stdin)
//! cm-cli total cart.json
//! ```
//!
//! Reads the same `IMAGE_TOKEN_SECRET`, `IMAGE_TOKEN_PREVIOUS_SECRETS`,
//! `PROMPTPAY_ID` and `PROMPTPAY_QR_ENDPOINT` variables as the storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cm-cli")]
#[command(author, version, about = "Campus merch CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal and open image tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Print the PromptPay QR link for an amount in baht
    Promptpay {
        /// Amount in baht, e.g. 678 or 250.50
        amount: String,

        /// Print the raw EMV payload instead of the QR image URL
        #[arg(long)]
        payload: bool,
    },
    /// Print the total of a cart JSON file
    Total {
        /// Path to a JSON array of line items, or "-" for stdin
        cart: PathBuf,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Seal a storage URL with the current key
    Seal {
        /// Absolute storage URL
        url: String,
    },
    /// Open a token and print the URL it points at
    Open {
        /// Token from an /images/{token} link
        token: String,
    },
    /// Produce a token in the legacy (unauthenticated) format
    Legacy {
        /// Absolute storage URL
        url: String,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Token { action } => match action {
            TokenAction::Seal { url } => commands::token::seal(&url)?,
            TokenAction::Open { token } => commands::token::open(&token)?,
            TokenAction::Legacy { url } => commands::token::legacy(&url)?,
        },
        Commands::Promptpay { amount, payload } => {
            commands::promptpay::show(&amount, payload)?;
        }
        Commands::Total { cart } => commands::total::show(&cart)?,
    }
    Ok(())
}
