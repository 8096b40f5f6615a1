//! # Shwary Types
//!
//! Domain types for the Shwary mobile money gateway.
//! This crate has ZERO IO dependencies - only data structures,
//! validation rules, and the transaction wire codec.
//!
//! ## Architecture
//!
//! - `country` - Per-country payment policy (dial code, minimum amount, currency)
//! - `payment_request` - Validate-on-construct payment request
//! - `transaction` - Transaction entity and flexible-key JSON codec
//! - `error` - Validation and decode error types

pub mod country;
pub mod error;
pub mod payment_request;
pub mod transaction;

// Re-export commonly used types
pub use country::Country;
pub use error::{DecodeError, ValidationError};
pub use payment_request::PaymentRequest;
pub use transaction::{Transaction, TransactionStatus};
