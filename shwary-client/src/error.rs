//! SDK error type.

use serde_json::Value;
use shwary_types::{DecodeError, ValidationError};

use crate::config::ConfigError;
use crate::transport::TransportError;
use crate::webhook::WebhookError;

/// Default user-facing message for an HTTP 502 from the gateway.
pub const BAD_GATEWAY_MESSAGE: &str = "Payment gateway error. Please try again later.";

/// Error type for client operations.
///
/// Every failure surfaces to the immediate caller with its context
/// attached; nothing is retried internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP 401 - invalid merchant credentials.
    #[error("Invalid merchant credentials")]
    Authentication,

    /// HTTP 502 from the gateway.
    #[error("{message}")]
    Gateway { message: String },

    /// Any other non-2xx response. `context` holds the full parsed body.
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        context: Value,
    },

    /// The transport could not complete the exchange at all.
    #[error("Network error: {message}")]
    Network { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Builds a gateway error, using the fixed default message when the
    /// caller supplies none.
    pub fn bad_gateway(message: Option<String>) -> Self {
        Error::Gateway {
            message: message.unwrap_or_else(|| BAD_GATEWAY_MESSAGE.to_string()),
        }
    }

    /// Numeric code for the failure: the HTTP status where one exists,
    /// 0 for network faults, 400 for local validation/parse failures.
    pub fn code(&self) -> u16 {
        match self {
            Error::Authentication => 401,
            Error::Gateway { .. } => 502,
            Error::Api { status, .. } => *status,
            Error::Network { .. } => 0,
            Error::Validation(_) | Error::Decode(_) | Error::Webhook(_) | Error::Config(_) => 400,
        }
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Error::Network {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_gateway_default_message() {
        let err = Error::bad_gateway(None);
        assert_eq!(err.to_string(), BAD_GATEWAY_MESSAGE);
        assert_eq!(err.code(), 502);
    }

    #[test]
    fn test_bad_gateway_override_message() {
        let err = Error::bad_gateway(Some("Upstream maintenance".to_string()));
        assert_eq!(err.to_string(), "Upstream maintenance");
    }

    #[test]
    fn test_codes() {
        assert_eq!(Error::Authentication.code(), 401);
        assert_eq!(
            Error::Network {
                message: "dns".to_string()
            }
            .code(),
            0
        );
        assert_eq!(
            Error::Api {
                status: 404,
                message: "not found".to_string(),
                context: Value::Null
            }
            .code(),
            404
        );
        assert_eq!(Error::from(WebhookError::MissingTransactionId).code(), 400);
    }
}
