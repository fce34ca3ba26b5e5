//! Catalog commands: load a feed, browse the result.
//!
//! # Usage
//!
//! ```bash
//! warung catalog load products.csv
//! warung catalog load https://shop.example/products.json
//! warung catalog list --search gula --category Sembako --in-stock --sort low
//! warung catalog categories
//! ```

use std::error::Error;

use tracing::{info, warn};
use warung_engine::feed;
use warung_engine::view::{self, SortMode, ViewQuery};

use super::session;

/// Load the catalog from a feed file or URL and store it for the session.
///
/// # Errors
///
/// Returns an error when the source is unreachable or unparsable as a
/// whole; the previously loaded catalog is left untouched.
pub async fn load(source: &str) -> Result<(), Box<dyn Error>> {
    let config = session::config()?;

    let outcome = if source.starts_with("http://") || source.starts_with("https://") {
        let client = reqwest::Client::new();
        feed::fetch(&client, source).await?
    } else {
        let document = std::fs::read_to_string(source)?;
        feed::load(&document)?
    };

    if outcome.products.is_empty() {
        // A non-empty feed yielding nothing is a feed configuration
        // problem; surface it rather than silently storing nothing.
        warn!(
            skipped = outcome.skipped,
            "feed loaded zero products; check the feed's id column"
        );
    }

    session::save_catalog(&config, &outcome.products)?;
    info!(
        products = outcome.products.len(),
        skipped = outcome.skipped,
        "catalog loaded"
    );
    Ok(())
}

/// List products through the view pipeline.
///
/// # Errors
///
/// Returns an error when no catalog is loaded or the sort mode is
/// unknown.
pub fn list(search: &str, category: &str, in_stock: bool, sort: &str) -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let catalog = session::load_catalog(&config)?;

    let sort = SortMode::parse(sort)
        .ok_or_else(|| format!("unknown sort mode: {sort} (expected low, high, az, popular)"))?;
    let query = ViewQuery {
        search: search.to_string(),
        category: category.to_string(),
        in_stock_only: in_stock,
        sort,
    };

    let products = view::apply(&catalog, &query);
    info!("{} product(s)", products.len());
    for product in products {
        let stock = if product.in_stock() {
            format!("stock {}", product.stock)
        } else {
            "out of stock".to_string()
        };
        info!(
            "  {} - {} ({}) {} [{}]",
            product.id, product.name, product.category, product.price, stock
        );
    }
    Ok(())
}

/// List the category options derived from the catalog.
///
/// # Errors
///
/// Returns an error when no catalog is loaded.
pub fn categories() -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let catalog = session::load_catalog(&config)?;
    for category in catalog.categories() {
        info!("  {category}");
    }
    Ok(())
}
