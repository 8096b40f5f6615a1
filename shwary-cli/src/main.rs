//! Shwary CLI
//!
//! Command-line interface for the Shwary mobile money gateway.
//! Credentials come from the environment (`SHWARY_MERCHANT_ID`,
//! `SHWARY_MERCHANT_KEY`, ...), optionally via a `.env` file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Read;

use shwary_client::ShwaryClient;
use shwary_types::Country;

#[derive(Parser)]
#[command(name = "shwary")]
#[command(author, version, about = "Shwary mobile money CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initiate a mobile money payment
    Pay {
        /// Amount in the country's currency unit
        #[arg(long)]
        amount: i64,
        /// Customer phone number (E.164 format, e.g. +243900000000)
        #[arg(long)]
        phone: String,
        /// Payment country (drc, kenya, uganda)
        #[arg(long)]
        country: String,
        /// HTTPS callback URL for status updates
        #[arg(long)]
        callback_url: Option<String>,
        /// Use the sandbox endpoint regardless of configuration
        #[arg(long)]
        sandbox: bool,
    },
    /// Webhook operations
    Webhook {
        #[command(subcommand)]
        action: WebhookCommands,
    },
    /// Show the countries the gateway supports
    Countries,
}

#[derive(Subcommand)]
enum WebhookCommands {
    /// Parse a webhook payload from a file, or from stdin with "-"
    Parse {
        /// Path to the payload file, or "-" for stdin
        file: String,
    },
}

fn parse_country(s: &str) -> Result<Country> {
    s.parse().map_err(|e: String| anyhow::anyhow!(e))
}

fn read_payload(file: &str) -> Result<String> {
    if file == "-" {
        let mut payload = String::new();
        std::io::stdin().read_to_string(&mut payload)?;
        Ok(payload)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pay {
            amount,
            phone,
            country,
            callback_url,
            sandbox,
        } => {
            let country = parse_country(&country)?;
            let client = ShwaryClient::from_env()?;
            let tx = if sandbox {
                client
                    .sandbox_pay(amount, &phone, country, callback_url.as_deref())
                    .await?
            } else {
                client
                    .pay(amount, &phone, country, callback_url.as_deref())
                    .await?
            };
            println!("{}", serde_json::to_string_pretty(&tx.to_value())?);
        }

        Commands::Webhook { action } => match action {
            WebhookCommands::Parse { file } => {
                let payload = read_payload(&file)?;
                // Parsing is local; no credentials needed.
                let handler = shwary_client::WebhookHandler::new();
                let tx = handler.parse_payload(&payload)?;
                println!("{}", serde_json::to_string_pretty(&tx.to_value())?);
                if handler.is_terminal_status(&tx) {
                    println!("status {} is terminal", tx.status);
                }
            }
        },

        Commands::Countries => {
            for country in Country::all() {
                println!(
                    "{:<8} dial {:<5} currency {} minimum {}",
                    country.code(),
                    country.dial_code(),
                    country.currency(),
                    country.minimum_amount()
                );
            }
        }
    }

    Ok(())
}
