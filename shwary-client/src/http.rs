//! HTTP client: body handling, failure classification, redacted logging.

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::error::Error;
use crate::transport::{Method, RawResponse, Transport};

const REDACTED: &str = "***REDACTED***";

/// Field names whose values never reach the log output. Applied to both
/// request bodies and response bodies with the same list.
const SENSITIVE_KEYS: [&str; 3] = ["merchantKey", "x-merchant-key", "clientPhoneNumber"];

/// Gateway HTTP client over a [`Transport`] port.
///
/// On success the response body parses into a generic JSON object (empty
/// when the body is empty or unparseable - never a failure). Non-2xx
/// statuses and transport faults classify into the SDK error taxonomy.
pub struct HttpClient {
    transport: Box<dyn Transport>,
}

impl HttpClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn post(
        &self,
        endpoint: &str,
        body: &Map<String, Value>,
    ) -> Result<Map<String, Value>, Error> {
        self.request(Method::Post, endpoint, Some(body), &[]).await
    }

    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(String, String)],
    ) -> Result<Map<String, Value>, Error> {
        self.request(Method::Get, endpoint, None, query).await
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Map<String, Value>>,
        query: &[(String, String)],
    ) -> Result<Map<String, Value>, Error> {
        debug!(
            %method,
            endpoint,
            body = ?body.map(sanitize_for_log),
            "Shwary API request"
        );

        let json_body = body.map(|b| Value::Object(b.clone()));
        let raw = match self
            .transport
            .send(method, endpoint, json_body.as_ref(), query)
            .await
        {
            Ok(raw) => raw,
            Err(err) => {
                error!(message = %err, "Shwary API network error");
                return Err(err.into());
            }
        };

        if (200..300).contains(&raw.status) {
            let result = parse_body(&raw.body);
            debug!(
                status = raw.status,
                body = ?sanitize_for_log(&result),
                "Shwary API response"
            );
            return Ok(result);
        }

        error!(status = raw.status, body = %raw.body, "Shwary API error");
        Err(classify_failure(&raw))
    }
}

fn parse_body(body: &str) -> Map<String, Value> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.as_object().cloned())
        .unwrap_or_default()
}

fn classify_failure(raw: &RawResponse) -> Error {
    match raw.status {
        401 => Error::Authentication,
        502 => Error::bad_gateway(None),
        status => {
            // Context is always an object, even when the body is not JSON.
            let context = serde_json::from_str::<Value>(&raw.body)
                .unwrap_or_else(|_| Value::Object(Map::new()));
            let message = context
                .get("message")
                .or_else(|| context.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| "Unknown API error".to_string());
            Error::Api {
                status,
                message,
                context,
            }
        }
    }
}

/// Returns a copy of the payload with sensitive field values replaced.
/// The payload itself is never mutated; the wire body stays intact.
fn sanitize_for_log(data: &Map<String, Value>) -> Map<String, Value> {
    let mut sanitized = data.clone();
    for key in SENSITIVE_KEYS {
        if sanitized.contains_key(key) {
            sanitized.insert(key.to_string(), Value::String(REDACTED.to_string()));
        }
    }
    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use async_trait::async_trait;
    use serde_json::json;

    struct StaticTransport {
        response: Result<RawResponse, TransportError>,
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn send(
            &self,
            _method: Method,
            _endpoint: &str,
            _body: Option<&Value>,
            _query: &[(String, String)],
        ) -> Result<RawResponse, TransportError> {
            self.response.clone()
        }
    }

    fn client_returning(status: u16, body: &str) -> HttpClient {
        HttpClient::new(Box::new(StaticTransport {
            response: Ok(RawResponse {
                status,
                body: body.to_string(),
            }),
        }))
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_success_parses_body() {
        let client = client_returning(200, r#"{"id":"tx1"}"#);
        let result = client.post("merchants/payment/drc", &Map::new()).await.unwrap();
        assert_eq!(result.get("id"), Some(&json!("tx1")));
    }

    #[tokio::test]
    async fn test_empty_or_invalid_success_body_is_empty_map() {
        for body in ["", "not json", "[1,2,3]"] {
            let client = client_returning(200, body);
            let result = client.get("merchants/payment/drc", &[]).await.unwrap();
            assert!(result.is_empty(), "body {body:?}");
        }
    }

    #[tokio::test]
    async fn test_401_is_authentication_failure() {
        let client = client_returning(401, r#"{"message":"bad key"}"#);
        let err = client.post("x", &Map::new()).await.unwrap_err();
        assert!(matches!(err, Error::Authentication));
    }

    #[tokio::test]
    async fn test_502_uses_default_gateway_message() {
        let client = client_returning(502, "Bad Gateway");
        let err = client.post("x", &Map::new()).await.unwrap_err();
        match err {
            Error::Gateway { message } => {
                assert_eq!(message, crate::error::BAD_GATEWAY_MESSAGE);
            }
            other => panic!("expected gateway error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_404_carries_message_and_context() {
        let client = client_returning(404, r#"{"message":"not found","detail":"x"}"#);
        let err = client.post("x", &Map::new()).await.unwrap_err();
        match err {
            Error::Api {
                status,
                message,
                context,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
                assert_eq!(context.get("detail"), Some(&json!("x")));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_key_probed_after_message() {
        let client = client_returning(422, r#"{"error":"invalid phone"}"#);
        let err = client.post("x", &Map::new()).await.unwrap_err();
        match err {
            Error::Api { message, .. } => assert_eq!(message, "invalid phone"),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body_gets_default_message() {
        let client = client_returning(500, "boom");
        let err = client.post("x", &Map::new()).await.unwrap_err();
        match err {
            Error::Api {
                message,
                status,
                context,
            } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Unknown API error");
                assert_eq!(context, Value::Object(Map::new()));
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_fault_is_network_failure() {
        let client = HttpClient::new(Box::new(StaticTransport {
            response: Err(TransportError("connection refused".to_string())),
        }));
        let err = client.post("x", &Map::new()).await.unwrap_err();
        assert_eq!(err.code(), 0);
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_sanitize_replaces_sensitive_values() {
        let body = object(json!({
            "amount": 5000,
            "clientPhoneNumber": "+243900000000",
            "merchantKey": "secret",
        }));
        let sanitized = sanitize_for_log(&body);
        assert_eq!(sanitized.get("clientPhoneNumber"), Some(&json!(REDACTED)));
        assert_eq!(sanitized.get("merchantKey"), Some(&json!(REDACTED)));
        assert_eq!(sanitized.get("amount"), Some(&json!(5000)));
        // The original body is untouched.
        assert_eq!(body.get("clientPhoneNumber"), Some(&json!("+243900000000")));
    }

    #[test]
    fn test_sanitize_leaves_other_keys_alone() {
        let body = object(json!({"id": "tx1"}));
        assert_eq!(sanitize_for_log(&body), body);
    }
}
