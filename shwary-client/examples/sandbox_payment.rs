//! Sandbox payment demo against the live sandbox endpoint.
//!
//! Run with: SHWARY_MERCHANT_ID=... SHWARY_MERCHANT_KEY=... \
//!     cargo run -p shwary-client --example sandbox_payment

use shwary_client::ShwaryClient;
use shwary_types::Country;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let client = ShwaryClient::from_env()?;
    println!("sandbox mode: {}", client.is_sandbox());

    let tx = client
        .sandbox_pay(5000, "+243900000000", Country::Drc, None)
        .await?;

    println!("created transaction {}", tx.id);
    println!("{}", serde_json::to_string_pretty(&tx.to_value())?);

    Ok(())
}
