//! The catalog store: normalized products for the current session.
//!
//! A [`Catalog`] is immutable per load. A successful feed load builds a
//! whole new catalog and the caller swaps it in; on a failed load the
//! previous catalog (or the empty one) stays as it was. There is no
//! incremental update path, which is what makes reload atomic from the
//! reconciler's point of view.

use std::collections::HashMap;

use warung_core::{Product, ProductId};

/// The immutable-per-load set of products for the session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from normalized products, keeping feed order.
    ///
    /// Id uniqueness is not enforced: when two products share an id,
    /// the later one wins in [`get`](Self::get) while both remain in
    /// the ordered listing. This mirrors the feed contract rather than
    /// correcting it.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id.clone(), position))
            .collect();
        Self { products, index }
    }

    /// An empty catalog, the state before any successful load.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Products in feed order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&position| self.products.get(position))
    }

    /// Number of products, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether no products are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The category option set offered to the caller.
    ///
    /// Distinct non-empty categories sorted lexicographically.
    /// Deduplication is by exact string: categories are trimmed during
    /// normalization but never case-folded, so `" Snack "` from an
    /// untrimmed source and `"snack"` stay distinct options.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .products
            .iter()
            .map(|product| product.category.as_str())
            .filter(|category| !category.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}

impl From<crate::feed::LoadOutcome> for Catalog {
    fn from(outcome: crate::feed::LoadOutcome) -> Self {
        Self::new(outcome.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warung_core::Price;

    fn product(id: &str, category: &str, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_uppercase(),
            category: category.to_string(),
            price: Price::new(price),
            unit: None,
            badge: None,
            stock: 1,
            image: String::new(),
            notes: Vec::new(),
        }
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::new(vec![product("a", "x", 100), product("b", "y", 200)]);
        assert_eq!(catalog.get(&ProductId::new("b")).map(|p| p.price), Some(Price::new(200)));
        assert_eq!(catalog.get(&ProductId::new("zzz")), None);
    }

    #[test]
    fn test_duplicate_id_later_record_wins() {
        let catalog = Catalog::new(vec![product("a", "x", 100), product("a", "x", 900)]);
        // Both rows remain listed; the id index resolves to the later one.
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&ProductId::new("a")).map(|p| p.price), Some(Price::new(900)));
    }

    #[test]
    fn test_categories_sorted_distinct_nonempty() {
        let catalog = Catalog::new(vec![
            product("a", "Snack", 0),
            product("b", "", 0),
            product("c", "Minuman", 0),
            product("d", "Snack", 0),
        ]);
        assert_eq!(catalog.categories(), vec!["Minuman", "Snack"]);
    }

    #[test]
    fn test_categories_are_not_case_folded() {
        // Trim-only semantics: normalization trims, never case-folds,
        // so inconsistently cased feeds produce distinct options.
        let catalog = Catalog::new(vec![
            product("a", " Snack ", 0),
            product("b", "snack", 0),
            product("c", "", 0),
        ]);
        assert_eq!(catalog.categories(), vec![" Snack ", "snack"]);
    }
}
