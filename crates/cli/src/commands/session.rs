//! Session plumbing shared by the commands.
//!
//! The CLI's "session" is the data directory: the durable cart lives
//! there via [`FileStorage`], and the last successfully loaded catalog
//! is kept there too so that cart and checkout commands in later
//! invocations reconcile against it.

use std::error::Error;
use std::path::PathBuf;

use warung_core::Product;
use warung_engine::cart::CartStore;
use warung_engine::catalog::Catalog;
use warung_engine::config::EngineConfig;
use warung_engine::storage::FileStorage;

/// File under the data directory holding the loaded catalog.
const CATALOG_FILE: &str = "warung_catalog.json";

/// Load engine configuration from the environment.
pub fn config() -> Result<EngineConfig, Box<dyn Error>> {
    Ok(EngineConfig::from_env()?)
}

fn catalog_path(config: &EngineConfig) -> PathBuf {
    config.data_dir.join(CATALOG_FILE)
}

/// Replace the session catalog wholesale.
///
/// Only called after a fully successful load, so a failed load leaves
/// the previous session catalog untouched.
pub fn save_catalog(config: &EngineConfig, products: &[Product]) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(&config.data_dir)?;
    let serialized = serde_json::to_string(products)?;
    std::fs::write(catalog_path(config), serialized)?;
    Ok(())
}

/// The catalog from the last successful `catalog load`.
pub fn load_catalog(config: &EngineConfig) -> Result<Catalog, Box<dyn Error>> {
    let raw = std::fs::read_to_string(catalog_path(config))
        .map_err(|_| "no catalog loaded yet; run `warung catalog load <source>` first")?;
    let products: Vec<Product> = serde_json::from_str(&raw)?;
    Ok(Catalog::new(products))
}

/// Open the durable cart over the data directory.
pub fn open_cart(config: &EngineConfig) -> CartStore<FileStorage> {
    CartStore::load(FileStorage::new(&config.data_dir))
}
