//! Unified error type for callers of the engine.
//!
//! The engine's failure domains each have their own error enum; this
//! umbrella aggregates them so a surface like the CLI can return one
//! `Result` type. Note what is absent: feed-row and cart-persistence
//! anomalies never reach here, they are absorbed where they occur.

use thiserror::Error;

use crate::config::ConfigError;
use crate::feed::CatalogLoadError;
use crate::order::CheckoutError;
use crate::payment::PaymentError;

/// Any engine-surfaced failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The feed source is unreachable or unparsable as a whole.
    #[error("catalog load failed: {0}")]
    CatalogLoad(#[from] CatalogLoadError),

    /// Checkout precondition failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The payment collaborator failed.
    #[error("payment failed: {0}")]
    Payment(#[from] PaymentError),

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
