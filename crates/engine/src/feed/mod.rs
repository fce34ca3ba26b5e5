//! Catalog feed ingestion.
//!
//! A feed reaches the engine over one of two transports: delimited text
//! (parsed by [`parser`]) or a pre-structured JSON array of records.
//! Both are normalized by [`normalizer`] into the same `Vec<Product>`,
//! so nothing downstream knows which transport a catalog came from.
//!
//! Loading is all-or-nothing from the caller's point of view: a
//! [`LoadOutcome`] is only produced for a feed that parsed as a whole,
//! and the caller swaps its catalog only on success. Individual bad
//! rows are handled inside the normalizer (skip and count), never here.

pub mod normalizer;
pub mod parser;

pub use normalizer::{RawProduct, RecordAnomaly, normalize_records, normalize_table};
pub use parser::{Table, parse, parse_table, serialize};

use thiserror::Error;
use warung_core::Product;

/// The feed source is unreachable or unparsable as a whole.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed endpoint answered with a non-success status.
    #[error("feed endpoint returned status {0}")]
    Status(u16),

    /// Structured feed is not a JSON array of records.
    #[error("feed is not a JSON record list: {0}")]
    Json(#[from] serde_json::Error),

    /// Delimited feed contained no rows at all, not even a header.
    #[error("feed is empty")]
    Empty,
}

/// Result of a successful feed load.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Normalized products in feed order.
    pub products: Vec<Product>,
    /// Rows the normalizer skipped.
    ///
    /// A non-empty feed that loads zero products is a configuration
    /// problem the caller should surface, not an error here.
    pub skipped: usize,
}

/// Load a delimited-text feed.
///
/// # Errors
///
/// Returns [`CatalogLoadError::Empty`] when the input has no rows.
pub fn load_delimited(text: &str) -> Result<LoadOutcome, CatalogLoadError> {
    let table = parse_table(text).ok_or(CatalogLoadError::Empty)?;
    let (products, skipped) = normalize_table(&table);
    Ok(LoadOutcome { products, skipped })
}

/// Load a structured feed: a JSON array of raw records.
///
/// # Errors
///
/// Returns [`CatalogLoadError::Json`] when the document is not a JSON
/// array of objects.
pub fn load_structured(json: &str) -> Result<LoadOutcome, CatalogLoadError> {
    let records: Vec<RawProduct> = serde_json::from_str(json)?;
    let (products, skipped) = normalize_records(records);
    Ok(LoadOutcome { products, skipped })
}

/// Load a feed from either transport, sniffing the document shape.
///
/// A document whose first non-whitespace character is `[` is treated as
/// a structured JSON feed; anything else as delimited text.
///
/// # Errors
///
/// Returns [`CatalogLoadError`] when the document is unusable as a whole.
pub fn load(document: &str) -> Result<LoadOutcome, CatalogLoadError> {
    if document.trim_start().starts_with('[') {
        load_structured(document)
    } else {
        load_delimited(document)
    }
}

/// Fetch a feed document over HTTP and load it.
///
/// One-shot: no retry, no timeout beyond the client's defaults. On any
/// failure the caller's previous catalog stays untouched.
///
/// # Errors
///
/// Returns [`CatalogLoadError`] on transport failure, a non-success
/// status, or an unusable document.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<LoadOutcome, CatalogLoadError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CatalogLoadError::Status(status.as_u16()));
    }
    let document = response.text().await?;
    let outcome = load(&document)?;
    tracing::info!(
        products = outcome.products.len(),
        skipped = outcome.skipped,
        url,
        "catalog feed loaded"
    );
    Ok(outcome)
}
