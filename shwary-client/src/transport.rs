//! Transport port and the default reqwest adapter.
//!
//! The SDK core depends only on the [`Transport`] trait: a single
//! round-trip taking method, endpoint, optional JSON body and query
//! parameters, returning a raw status + body or a transport-level fault.
//! Tests drive the SDK through a mock implementation.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::config::Config;

/// HTTP method for a gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A completed HTTP exchange: status code plus raw body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Transport-level fault: DNS, connection refused, timeout, TLS - anything
/// that prevented the exchange from completing at all.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Port trait for the HTTP transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<RawResponse, TransportError>;
}

/// Default transport backed by reqwest.
///
/// Configured once from [`Config`]: versioned base URL, fixed timeout and
/// the merchant identity headers on every request. The merchant key goes
/// over the wire in clear text; confidentiality is TLS's job.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-merchant-id",
            HeaderValue::from_str(config.merchant_id())
                .map_err(|e| TransportError(format!("Invalid merchant id header: {e}")))?,
        );
        headers.insert(
            "x-merchant-key",
            HeaderValue::from_str(config.merchant_key())
                .map_err(|e| TransportError(format!("Invalid merchant key header: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout()))
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: format!("{}/", config.api_url()),
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(String, String)],
    ) -> Result<RawResponse, TransportError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };

        if let Some(body) = body {
            request = request.json(body);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
