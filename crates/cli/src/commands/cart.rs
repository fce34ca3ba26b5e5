//! Cart commands: mutate the durable mapping, show the reconciled view.
//!
//! Every mutation is persisted before the command returns; `show` is
//! where reconciliation happens, so a catalog reload between
//! invocations is picked up automatically.

use std::error::Error;

use tracing::info;
use warung_core::ProductId;

use super::session;

/// Add one unit of a product to the cart.
///
/// # Errors
///
/// Returns an error when no catalog is loaded, the id is unknown, or
/// the product is out of stock.
pub fn add(id: &str) -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let catalog = session::load_catalog(&config)?;
    let id = ProductId::new(id);

    // Stock gates new additions only; existing entries are untouched
    // by stock changes.
    let product = catalog
        .get(&id)
        .ok_or_else(|| format!("no product with id {id}"))?;
    if !product.in_stock() {
        return Err(format!("{} is out of stock", product.name).into());
    }

    let mut store = session::open_cart(&config);
    store.add(&id);
    info!(
        "added {}; cart now holds {} of it",
        product.name,
        store.cart().quantity(&id)
    );
    Ok(())
}

/// Remove one unit of a product; the entry disappears at zero.
///
/// # Errors
///
/// Returns an error when configuration is unusable.
pub fn decrement(id: &str) -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let id = ProductId::new(id);
    let mut store = session::open_cart(&config);
    store.decrement(&id);
    info!("{} now at quantity {}", id, store.cart().quantity(&id));
    Ok(())
}

/// Remove a product from the cart entirely.
///
/// # Errors
///
/// Returns an error when configuration is unusable.
pub fn remove(id: &str) -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let mut store = session::open_cart(&config);
    store.remove(&ProductId::new(id));
    info!("removed {id}");
    Ok(())
}

/// Empty the cart. The flag-less CLI invocation is the confirmation.
///
/// # Errors
///
/// Returns an error when configuration is unusable.
pub fn clear() -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let mut store = session::open_cart(&config);
    store.clear();
    info!("cart cleared");
    Ok(())
}

/// Show the cart reconciled against the loaded catalog.
///
/// # Errors
///
/// Returns an error when no catalog is loaded.
pub fn show() -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let catalog = session::load_catalog(&config)?;
    let store = session::open_cart(&config);

    let reconciled = store.cart().reconcile(&catalog);
    if reconciled.is_empty() {
        info!("cart is empty");
    }
    for line in &reconciled.lines {
        info!(
            "  {} x{} = {}",
            line.product.name,
            line.quantity,
            line.subtotal()
        );
    }
    info!("{} item(s), total {}", reconciled.count(), reconciled.total());
    if !reconciled.unresolved.is_empty() {
        let ids: Vec<&str> = reconciled
            .unresolved
            .iter()
            .map(ProductId::as_str)
            .collect();
        info!(
            "kept but not in the current catalog: {} (excluded from the total)",
            ids.join(", ")
        );
    }
    Ok(())
}
