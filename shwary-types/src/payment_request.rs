//! Validate-on-construct payment request.

use serde::Serialize;
use serde_json::{Map, Value, json};
use url::Url;

use crate::country::Country;
use crate::error::ValidationError;

/// A validated mobile money payment request.
///
/// Can only be built through [`PaymentRequest::create`], so an instance
/// is always valid against its country's policy. The serialized body
/// carries `amount`, `clientPhoneNumber` and (when present)
/// `callbackUrl`; the country is implied by endpoint selection and is
/// never part of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    amount: i64,
    client_phone_number: String,
    #[serde(skip_serializing)]
    country: Country,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_url: Option<String>,
}

impl PaymentRequest {
    /// Creates a validated payment request.
    ///
    /// Checks, in order (first failure wins):
    /// 1. amount strictly greater than the country's minimum
    /// 2. phone number starts with the country's dial code
    /// 3. callback URL, if given, is HTTPS with a non-empty host
    pub fn create(
        amount: i64,
        phone: impl Into<String>,
        country: Country,
        callback_url: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if amount <= country.minimum_amount() {
            return Err(ValidationError::InvalidAmount { amount, country });
        }

        if !phone.starts_with(country.dial_code()) {
            return Err(ValidationError::InvalidPhoneNumber { phone, country });
        }

        if let Some(url) = callback_url {
            if !is_valid_https_url(url) {
                return Err(ValidationError::InvalidCallbackUrl {
                    url: url.to_string(),
                });
            }
        }

        Ok(Self {
            amount,
            client_phone_number: phone,
            country,
            callback_url: callback_url.map(str::to_string),
        })
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn client_phone_number(&self) -> &str {
        &self.client_phone_number
    }

    pub fn country(&self) -> Country {
        self.country
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    /// Returns the POST body for this request.
    pub fn to_body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("amount".to_string(), json!(self.amount));
        body.insert(
            "clientPhoneNumber".to_string(),
            json!(self.client_phone_number),
        );
        if let Some(url) = &self.callback_url {
            body.insert("callbackUrl".to_string(), json!(url));
        }
        body
    }
}

fn is_valid_https_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            parsed.scheme() == "https" && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE_DRC: &str = "+243900000000";

    #[test]
    fn test_amount_at_minimum_rejected() {
        for country in Country::all() {
            let phone = format!("{}900000000", country.dial_code());
            let result = PaymentRequest::create(country.minimum_amount(), &phone, *country, None);
            assert!(matches!(
                result,
                Err(ValidationError::InvalidAmount { .. })
            ));
        }
    }

    #[test]
    fn test_amount_just_above_minimum_accepted() {
        for country in Country::all() {
            let phone = format!("{}900000000", country.dial_code());
            let result =
                PaymentRequest::create(country.minimum_amount() + 1, &phone, *country, None);
            assert!(result.is_ok());
        }
    }

    #[test]
    fn test_wrong_dial_code_rejected() {
        // Amount is valid, so the phone check is the one that fires.
        let result = PaymentRequest::create(5000, "+254700000000", Country::Drc, None);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
    }

    #[test]
    fn test_http_callback_rejected() {
        let result = PaymentRequest::create(5000, PHONE_DRC, Country::Drc, Some("http://x.com"));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidCallbackUrl { .. })
        ));
    }

    #[test]
    fn test_hostless_callback_rejected() {
        let result = PaymentRequest::create(5000, PHONE_DRC, Country::Drc, Some("https://"));
        assert!(matches!(
            result,
            Err(ValidationError::InvalidCallbackUrl { .. })
        ));
    }

    #[test]
    fn test_https_callback_accepted() {
        let result = PaymentRequest::create(
            5000,
            PHONE_DRC,
            Country::Drc,
            Some("https://api.example.com/cb"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_body_omits_absent_callback() {
        let request = PaymentRequest::create(5000, PHONE_DRC, Country::Drc, None).unwrap();
        let body = request.to_body();
        assert_eq!(body.get("amount"), Some(&json!(5000)));
        assert_eq!(body.get("clientPhoneNumber"), Some(&json!(PHONE_DRC)));
        assert!(!body.contains_key("callbackUrl"));
        assert!(!body.contains_key("country"));
    }

    #[test]
    fn test_body_includes_callback_when_present() {
        let request = PaymentRequest::create(
            5000,
            PHONE_DRC,
            Country::Drc,
            Some("https://api.example.com/cb"),
        )
        .unwrap();
        let body = request.to_body();
        assert_eq!(
            body.get("callbackUrl"),
            Some(&json!("https://api.example.com/cb"))
        );
    }

    #[test]
    fn test_serialize_matches_body() {
        let request = PaymentRequest::create(5000, PHONE_DRC, Country::Drc, None).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, Value::Object(request.to_body()));
    }
}
