//! # Shwary Client SDK
//!
//! A typed Rust client for the Shwary mobile money gateway.
//!
//! ```no_run
//! use shwary_client::{Config, ShwaryClient};
//! use shwary_types::Country;
//!
//! # async fn demo() -> Result<(), shwary_client::Error> {
//! let config = Config::new("merchant_id", "merchant_key")?;
//! let client = ShwaryClient::new(config)?;
//! let tx = client.pay(5000, "+243900000000", Country::Drc, None).await?;
//! println!("transaction {} is {}", tx.id, tx.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod webhook;

pub use client::ShwaryClient;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use http::HttpClient;
pub use transport::{Method, RawResponse, ReqwestTransport, Transport, TransportError};
pub use webhook::{WebhookError, WebhookHandler};
