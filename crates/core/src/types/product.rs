//! The canonical catalog entry.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A normalized product record.
///
/// Every feed source, structured or delimited, is normalized into this
/// shape before the engine looks at it. `id` is the identity key for
/// cart entries; uniqueness within a catalog load is not enforced, and
/// when violated the later record wins in any id-indexed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identity key; non-empty and trimmed.
    pub id: ProductId,
    /// Display name; a placeholder when the feed omitted one.
    pub name: String,
    /// Trimmed category; empty means uncategorized.
    pub category: String,
    /// Price in the smallest currency unit.
    pub price: Price,
    /// Optional unit label (e.g., "1kg", "250ml").
    pub unit: Option<String>,
    /// Optional badge label (e.g., "Promo").
    pub badge: Option<String>,
    /// Units in stock; zero marks the product unavailable for new
    /// cart additions but does not remove it from an existing cart.
    pub stock: u32,
    /// Resolved, displayable image reference.
    pub image: String,
    /// Free-form note lines; empty when the feed had none.
    pub notes: Vec<String>,
}

impl Product {
    /// Whether the product can be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: u32) -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Gula Pasir".to_string(),
            category: "Sembako".to_string(),
            price: Price::new(15_000),
            unit: Some("1kg".to_string()),
            badge: None,
            stock,
            image: "assets/images/gula.jpg".to_string(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_in_stock() {
        assert!(product(3).in_stock());
        assert!(!product(0).in_stock());
    }
}
