//! Error types for domain validation and decoding.

use crate::country::Country;

/// Payment request validation errors (caller-correctable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Amount {amount} must be greater than the minimum of {} for {country}", .country.minimum_amount())]
    InvalidAmount { amount: i64, country: Country },

    #[error("Phone number {phone} must start with {} for {country}", .country.dial_code())]
    InvalidPhoneNumber { phone: String, country: Country },

    #[error("Callback URL must be a valid HTTPS URL: {url}")]
    InvalidCallbackUrl { url: String },
}

/// Transaction decoding errors.
///
/// Decoding is lenient about missing fields; the only hard failure is a
/// status value that does not map to a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Unknown transaction status: {0}")]
    UnknownStatus(String),
}
