//! Inbound webhook parsing and acknowledgment responses.

use chrono::Utc;
use serde_json::{Value, json};
use shwary_types::Transaction;

use crate::error::Error;

/// Webhook payload parse failures. 400-equivalent, always local.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid webhook payload: missing transaction ID")]
    MissingTransactionId,
}

/// Stateless parser for gateway-initiated callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebhookHandler;

impl WebhookHandler {
    pub fn new() -> Self {
        Self
    }

    /// Parses a raw webhook payload into a [`Transaction`].
    ///
    /// The payload must be a JSON object carrying at least an `id` key;
    /// everything else decodes with the transaction codec's defaults.
    pub fn parse_payload(&self, payload: &str) -> Result<Transaction, Error> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;

        let data = value
            .as_object()
            .ok_or_else(|| WebhookError::InvalidPayload("payload is not a JSON object".into()))?;

        // A null id is as good as no id at all.
        if data.get("id").is_none_or(Value::is_null) {
            return Err(WebhookError::MissingTransactionId.into());
        }

        Ok(Transaction::from_value(data)?)
    }

    /// Returns true if the transaction reached a terminal status.
    pub fn is_terminal_status(&self, transaction: &Transaction) -> bool {
        transaction.is_terminal()
    }

    /// Builds the JSON acknowledgment body to return to the gateway.
    pub fn create_response(&self, success: bool, message: Option<&str>) -> Value {
        let message = match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ if success => "Webhook processed successfully".to_string(),
            _ => "Webhook processing failed".to_string(),
        };

        json!({
            "success": success,
            "message": message,
            "timestamp": Utc::now().to_rfc3339(),
        })
    }
}
