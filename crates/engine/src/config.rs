//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `WARUNG_WA_NUMBER` - Shop WhatsApp number for the messaging
//!   handoff, digits only (country code included, no `+`)
//!
//! ## Optional
//! - `WARUNG_FEED_URL` - Catalog feed endpoint (the CLI can also load
//!   a local file instead)
//! - `WARUNG_DATA_DIR` - Directory for durable cart storage
//!   (default: `.`)
//! - `WARUNG_WA_PREFIX` - Greeting line of the order message
//! - `WARUNG_PAYMENT_URL` - Payment-initiation endpoint; the payment
//!   checkout path is disabled when unset
//! - `WARUNG_PAYMENT_API_KEY` - Bearer key for the payment endpoint

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use crate::message::DEFAULT_TEXT_PREFIX;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Catalog feed endpoint, when the feed comes over HTTP.
    pub feed_url: Option<String>,
    /// Directory backing durable cart storage.
    pub data_dir: PathBuf,
    /// Shop WhatsApp number, digits only.
    pub wa_number: String,
    /// Greeting line of the order message.
    pub wa_prefix: String,
    /// Payment collaborator, when configured.
    pub payment: Option<PaymentConfig>,
}

/// Payment-initiation collaborator configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct PaymentConfig {
    /// Payment-session creation endpoint.
    pub endpoint: String,
    /// Bearer key, if the endpoint wants one.
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let wa_number = get_required_env("WARUNG_WA_NUMBER")?;
        validate_wa_number(&wa_number)?;

        let payment = get_optional_env("WARUNG_PAYMENT_URL").map(|endpoint| PaymentConfig {
            endpoint,
            api_key: get_optional_env("WARUNG_PAYMENT_API_KEY").map(SecretString::from),
        });

        Ok(Self {
            feed_url: get_optional_env("WARUNG_FEED_URL"),
            data_dir: PathBuf::from(get_env_or_default("WARUNG_DATA_DIR", ".")),
            wa_number,
            wa_prefix: get_env_or_default("WARUNG_WA_PREFIX", DEFAULT_TEXT_PREFIX),
            payment,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// The messaging deep link wants a bare digit string.
fn validate_wa_number(number: &str) -> Result<(), ConfigError> {
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            "WARUNG_WA_NUMBER".to_string(),
            "must be digits only, e.g. 628123456789".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_wa_number() {
        assert!(validate_wa_number("628123456789").is_ok());
        assert!(validate_wa_number("+62 812").is_err());
        assert!(validate_wa_number("").is_err());
    }

    #[test]
    fn test_payment_config_debug_redacts_api_key() {
        let config = PaymentConfig {
            endpoint: "https://pay.example/sessions".to_string(),
            api_key: Some(SecretString::from("super_secret_key")),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("https://pay.example/sessions"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_key"));
    }
}
