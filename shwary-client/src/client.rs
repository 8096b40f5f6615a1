//! Shwary gateway client.

use serde_json::{Map, Value};
use shwary_types::{Country, PaymentRequest, Transaction};

use crate::config::Config;
use crate::error::Error;
use crate::http::HttpClient;
use crate::transport::{ReqwestTransport, Transport};
use crate::webhook::WebhookHandler;

/// Client for the Shwary mobile money gateway.
///
/// Owns a validated [`Config`] and an HTTP client over a transport port.
/// All operations issue at most one round-trip; nothing is retried.
pub struct ShwaryClient {
    config: Config,
    http: HttpClient,
    webhook_handler: WebhookHandler,
}

impl ShwaryClient {
    /// Creates a client with the default reqwest transport.
    pub fn new(config: Config) -> Result<Self, Error> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Creates a client over an injected transport. Used by tests and by
    /// callers bringing their own HTTP stack.
    pub fn with_transport(config: Config, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            http: HttpClient::new(transport),
            webhook_handler: WebhookHandler::new(),
        }
    }

    /// Creates a client from `SHWARY_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(Config::from_env()?)
    }

    /// Creates a client from a generic key-value mapping.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, Error> {
        Self::new(Config::from_map(map)?)
    }

    /// Initiates a mobile money payment.
    ///
    /// Uses the live endpoint unless the configuration is in sandbox
    /// mode, in which case the sandbox endpoint is selected.
    pub async fn create_payment(&self, request: &PaymentRequest) -> Result<Transaction, Error> {
        let endpoint = self.payment_endpoint(request.country());
        let response = self.http.post(&endpoint, &request.to_body()).await?;
        Ok(Transaction::from_value(&response)?)
    }

    /// Initiates a payment with direct parameters.
    pub async fn pay(
        &self,
        amount: i64,
        phone: &str,
        country: Country,
        callback_url: Option<&str>,
    ) -> Result<Transaction, Error> {
        let request = PaymentRequest::create(amount, phone, country, callback_url)?;
        self.create_payment(&request).await
    }

    /// Shortcut for a DRC (CDF) payment.
    pub async fn pay_drc(
        &self,
        amount: i64,
        phone: &str,
        callback_url: Option<&str>,
    ) -> Result<Transaction, Error> {
        self.pay(amount, phone, Country::Drc, callback_url).await
    }

    /// Shortcut for a Kenya (KES) payment.
    pub async fn pay_kenya(
        &self,
        amount: i64,
        phone: &str,
        callback_url: Option<&str>,
    ) -> Result<Transaction, Error> {
        self.pay(amount, phone, Country::Kenya, callback_url).await
    }

    /// Shortcut for an Uganda (UGX) payment.
    pub async fn pay_uganda(
        &self,
        amount: i64,
        phone: &str,
        callback_url: Option<&str>,
    ) -> Result<Transaction, Error> {
        self.pay(amount, phone, Country::Uganda, callback_url).await
    }

    /// Initiates a sandbox (test) payment regardless of the configured mode.
    pub async fn create_sandbox_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<Transaction, Error> {
        let endpoint = Self::sandbox_payment_endpoint(request.country());
        let response = self.http.post(&endpoint, &request.to_body()).await?;
        Ok(Transaction::from_value(&response)?)
    }

    /// Shortcut for a sandbox payment with direct parameters.
    pub async fn sandbox_pay(
        &self,
        amount: i64,
        phone: &str,
        country: Country,
        callback_url: Option<&str>,
    ) -> Result<Transaction, Error> {
        let request = PaymentRequest::create(amount, phone, country, callback_url)?;
        self.create_sandbox_payment(&request).await
    }

    /// Returns the webhook handler.
    pub fn webhook(&self) -> &WebhookHandler {
        &self.webhook_handler
    }

    /// Parses a webhook payload.
    pub fn parse_webhook(&self, payload: &str) -> Result<Transaction, Error> {
        self.webhook_handler.parse_payload(payload)
    }

    pub fn is_sandbox(&self) -> bool {
        self.config.is_sandbox()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn payment_endpoint(&self, country: Country) -> String {
        if self.config.is_sandbox() {
            return Self::sandbox_payment_endpoint(country);
        }
        format!("merchants/payment/{}", country.code())
    }

    fn sandbox_payment_endpoint(country: Country) -> String {
        format!("merchants/payment/sandbox/{}", country.code())
    }
}
