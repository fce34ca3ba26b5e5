//! Payment-initiation client.
//!
//! One-shot handoff of the machine order payload to the payment
//! collaborator, which answers with a QR reference for the visitor to
//! scan. No retry, no polling: a failure is reported once and the cart
//! and catalog remain valid and usable afterwards.
//!
//! The collaborator's response shape is tolerated rather than trusted:
//! the QR field arrives under `qr_url`, `qr_image`, or `qr`, and the
//! reference under `reference` or `ref`. Anything outside that -
//! `success: false`, a non-success status, a missing QR - is a
//! [`PaymentError`].

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::PaymentConfig;
use crate::order::OrderPayload;

/// Transport or protocol failure talking to the payment collaborator.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Collaborator answered with a non-success status.
    #[error("payment endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Collaborator answered `success: false`.
    #[error("payment session was refused")]
    Refused,

    /// Response did not carry the expected shape.
    #[error("malformed payment response: {0}")]
    Malformed(String),
}

/// A created payment session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    /// Where the visitor's QR code lives.
    pub qr_url: String,
    /// Collaborator-issued reference to attach to the order, if given.
    pub reference: Option<String>,
}

/// Client for the payment-initiation collaborator.
#[derive(Debug, Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PaymentClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the API
    /// key is not a valid header value.
    pub fn new(config: &PaymentConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let value = format!("Bearer {}", api_key.expose_secret());
            headers.insert(
                "Authorization",
                HeaderValue::from_str(&value)
                    .map_err(|e| PaymentError::Malformed(format!("invalid API key: {e}")))?,
            );
        }

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Create a payment session for an order.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] on transport failure, a non-success
    /// status, a refused session, or a response without a usable QR.
    pub async fn create_session(
        &self,
        payload: &OrderPayload,
    ) -> Result<PaymentSession, PaymentError> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let session = parse_session(&body)?;
        tracing::info!(order_id = %payload.order_id, "payment session created");
        Ok(session)
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    success: bool,
    data: Option<ApiData>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    #[serde(alias = "qr_image", alias = "qr")]
    qr_url: Option<String>,
    #[serde(alias = "ref")]
    reference: Option<String>,
}

fn parse_session(body: &str) -> Result<PaymentSession, PaymentError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| PaymentError::Malformed(e.to_string()))?;

    if !response.success {
        return Err(PaymentError::Refused);
    }

    let data = response
        .data
        .ok_or_else(|| PaymentError::Malformed("missing data object".to_string()))?;
    let qr_url = data
        .qr_url
        .ok_or_else(|| PaymentError::Malformed("missing qr reference".to_string()))?;

    Ok(PaymentSession {
        qr_url,
        reference: data.reference,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_canonical_shape() {
        let session = parse_session(
            r#"{"success": true, "data": {"qr_url": "https://pay.example/qr.png", "reference": "QR-9"}}"#,
        )
        .unwrap();
        assert_eq!(session.qr_url, "https://pay.example/qr.png");
        assert_eq!(session.reference.as_deref(), Some("QR-9"));
    }

    #[test]
    fn test_parse_session_alias_shapes() {
        let session =
            parse_session(r#"{"success": true, "data": {"qr_image": "x.png", "ref": "R1"}}"#)
                .unwrap();
        assert_eq!(session.qr_url, "x.png");
        assert_eq!(session.reference.as_deref(), Some("R1"));

        let session = parse_session(r#"{"success": true, "data": {"qr": "y.png"}}"#).unwrap();
        assert_eq!(session.qr_url, "y.png");
        assert_eq!(session.reference, None);
    }

    #[test]
    fn test_parse_session_refused() {
        assert!(matches!(
            parse_session(r#"{"success": false, "data": {"qr": "x"}}"#),
            Err(PaymentError::Refused)
        ));
    }

    #[test]
    fn test_parse_session_malformed_shapes() {
        assert!(matches!(
            parse_session("not json"),
            Err(PaymentError::Malformed(_))
        ));
        assert!(matches!(
            parse_session(r#"{"success": true}"#),
            Err(PaymentError::Malformed(_))
        ));
        assert!(matches!(
            parse_session(r#"{"success": true, "data": {"reference": "R"}}"#),
            Err(PaymentError::Malformed(_))
        ));
    }
}
