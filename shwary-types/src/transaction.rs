//! Transaction entity and flexible-key JSON codec.
//!
//! The gateway is inconsistent about key casing across API responses and
//! webhook payloads, so every logical field is probed under both its
//! camelCase and snake_case spelling, camelCase taking precedence.
//! Encoding always emits camelCase.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value, json};

use crate::error::DecodeError;

/// Lifecycle status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    /// Returns the wire value for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Processing => "processing",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if no further state transition can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Completed | TransactionStatus::Failed | TransactionStatus::Cancelled
        )
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "processing" => Ok(TransactionStatus::Processing),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            other => Err(DecodeError::UnknownStatus(other.to_string())),
        }
    }
}

/// A transaction as reported by the gateway.
///
/// Produced by decoding an API response or a webhook payload; immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: i64,
    pub currency: String,
    /// Transaction type as reported by the gateway, e.g. "deposit".
    pub transaction_type: String,
    pub status: TransactionStatus,
    pub recipient_phone_number: String,
    pub reference_id: String,
    /// Free-form gateway metadata; kept only when the raw value is an object.
    pub metadata: Option<Map<String, Value>>,
    pub failure_reason: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_sandbox: bool,
    /// External gateway reference, when the upstream processor reports one.
    pub pretium_transaction_id: Option<String>,
    pub error: Option<String>,
}

impl Transaction {
    /// Decodes a transaction from a raw JSON object.
    ///
    /// Missing scalar fields default to zero values; an absent status
    /// defaults to pending. The only hard failure is a status string
    /// that does not match a known variant.
    pub fn from_value(data: &Map<String, Value>) -> Result<Self, DecodeError> {
        let status_raw = string_field(data, &["status"], "pending");
        let status = status_raw.parse::<TransactionStatus>()?;

        let completed_at = pick(data, &["completedAt", "completed_at"])
            .and_then(Value::as_str)
            .and_then(parse_timestamp);

        Ok(Self {
            id: string_field(data, &["id"], ""),
            user_id: string_field(data, &["userId", "user_id"], ""),
            amount: pick(data, &["amount"]).and_then(numeric_i64).unwrap_or(0),
            currency: string_field(data, &["currency"], ""),
            transaction_type: string_field(data, &["type"], "deposit"),
            status,
            recipient_phone_number: string_field(
                data,
                &["recipientPhoneNumber", "recipient_phone_number"],
                "",
            ),
            reference_id: string_field(data, &["referenceId", "reference_id"], ""),
            metadata: pick(data, &["metadata"]).and_then(Value::as_object).cloned(),
            failure_reason: optional_string_field(data, &["failureReason", "failure_reason"]),
            completed_at,
            created_at: timestamp_field(data, &["createdAt", "created_at"]),
            updated_at: timestamp_field(data, &["updatedAt", "updated_at"]),
            is_sandbox: pick(data, &["isSandbox", "is_sandbox"])
                .and_then(Value::as_bool)
                .unwrap_or(false),
            pretium_transaction_id: optional_string_field(
                data,
                &["pretiumTransactionId", "pretium_transaction_id"],
            ),
            error: optional_string_field(data, &["error"]),
        })
    }

    /// Encodes the transaction as a JSON object.
    ///
    /// Always emits camelCase keys and every field, nulls included.
    /// Timestamps are RFC 3339 strings.
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "userId": self.user_id,
            "amount": self.amount,
            "currency": self.currency,
            "type": self.transaction_type,
            "status": self.status.as_str(),
            "recipientPhoneNumber": self.recipient_phone_number,
            "referenceId": self.reference_id,
            "metadata": self.metadata,
            "failureReason": self.failure_reason,
            "completedAt": self.completed_at.map(|t| t.to_rfc3339()),
            "createdAt": self.created_at.to_rfc3339(),
            "updatedAt": self.updated_at.to_rfc3339(),
            "isSandbox": self.is_sandbox,
            "pretiumTransactionId": self.pretium_transaction_id,
            "error": self.error,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.status == TransactionStatus::Failed
    }

    /// Returns true if the transaction reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Probes the map under each candidate key, first match wins.
fn pick<'a>(data: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| data.get(*key))
}

/// Coerces a scalar JSON value to its string form.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_field(data: &Map<String, Value>, keys: &[&str], default: &str) -> String {
    pick(data, keys)
        .and_then(scalar_string)
        .unwrap_or_else(|| default.to_string())
}

fn optional_string_field(data: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    pick(data, keys).and_then(scalar_string)
}

/// Coerces any numeric representation (number or numeric string) to an
/// integer, truncating fractional parts.
fn numeric_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s
            .parse::<i64>()
            .ok()
            .or_else(|| s.parse::<f64>().ok().map(|f| f as i64)),
        _ => None,
    }
}

fn timestamp_field(data: &Map<String, Value>, keys: &[&str]) -> DateTime<Utc> {
    pick(data, keys)
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now)
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Some(parsed.with_timezone(&Utc));
    }
    // The gateway occasionally reports bare "YYYY-MM-DD HH:MM:SS" stamps.
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
