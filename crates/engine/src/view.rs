//! The view pipeline: pure filtering and sorting over the catalog.
//!
//! `(catalog, criteria) -> ordered product list`, no mutation of
//! anything. Predicates compose by conjunction; the sort runs last,
//! after filtering, and is stable so ties keep their catalog order.

use warung_core::Product;

use crate::catalog::Catalog;

/// Sort modes offered to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Ascending price.
    Low,
    /// Descending price.
    High,
    /// Lexicographic name.
    Az,
    /// The catalog's original order, untouched.
    #[default]
    Popular,
}

impl SortMode {
    /// The wire/query-string name of this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
            Self::Az => "az",
            Self::Popular => "popular",
        }
    }

    /// Parse a wire/query-string name.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(Self::Low),
            "high" => Some(Self::High),
            "az" => Some(Self::Az),
            "popular" => Some(Self::Popular),
            _ => None,
        }
    }
}

/// Category filter value that bypasses the category predicate.
pub const ALL_CATEGORIES: &str = "all";

/// Filter and sort criteria for a product listing.
#[derive(Debug, Clone)]
pub struct ViewQuery {
    /// Case-insensitive substring matched against name OR category;
    /// empty matches everything.
    pub search: String,
    /// Exact category match, or [`ALL_CATEGORIES`] to bypass.
    pub category: String,
    /// When set, keep only products with stock remaining.
    pub in_stock_only: bool,
    /// Applied last, stable.
    pub sort: SortMode,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            in_stock_only: false,
            sort: SortMode::Popular,
        }
    }
}

impl ViewQuery {
    fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product) && self.matches_stock(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        product.name.to_lowercase().contains(&needle)
            || product.category.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category == ALL_CATEGORIES || product.category == self.category
    }

    fn matches_stock(&self, product: &Product) -> bool {
        !self.in_stock_only || product.in_stock()
    }
}

/// Apply `query` to the catalog, producing the list to render.
#[must_use]
pub fn apply<'a>(catalog: &'a Catalog, query: &ViewQuery) -> Vec<&'a Product> {
    let mut products: Vec<&Product> = catalog
        .products()
        .iter()
        .filter(|product| query.matches(product))
        .collect();

    // Vec::sort_by is stable, so equal keys retain catalog order.
    match query.sort {
        SortMode::Low => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::High => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortMode::Az => products.sort_by(|a, b| a.name.cmp(&b.name)),
        SortMode::Popular => {}
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use warung_core::{Price, ProductId};

    fn product(id: &str, name: &str, category: &str, price: u64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            price: Price::new(price),
            unit: None,
            badge: None,
            stock,
            image: String::new(),
            notes: Vec::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("a", "Gula Pasir", "Sembako", 15_000, 10),
            product("b", "Kopi Bubuk", "Minuman", 8_000, 0),
            product("c", "Teh Celup", "Minuman", 8_000, 4),
            product("d", "Beras", "Sembako", 70_000, 2),
        ])
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_empty_query_matches_everything_in_catalog_order() {
        let catalog = catalog();
        assert_eq!(ids(&apply(&catalog, &ViewQuery::default())), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_or_category() {
        let catalog = catalog();
        let query = ViewQuery {
            search: "KOPI".to_string(),
            ..ViewQuery::default()
        };
        assert_eq!(ids(&apply(&catalog, &query)), vec!["b"]);

        // Category text matches too.
        let query = ViewQuery {
            search: "minuman".to_string(),
            ..ViewQuery::default()
        };
        assert_eq!(ids(&apply(&catalog, &query)), vec!["b", "c"]);
    }

    #[test]
    fn test_category_filter_is_exact_with_all_bypass() {
        let catalog = catalog();
        let query = ViewQuery {
            category: "Sembako".to_string(),
            ..ViewQuery::default()
        };
        assert_eq!(ids(&apply(&catalog, &query)), vec!["a", "d"]);

        // Exact, not case-insensitive.
        let query = ViewQuery {
            category: "sembako".to_string(),
            ..ViewQuery::default()
        };
        assert!(apply(&catalog, &query).is_empty());
    }

    #[test]
    fn test_stock_filter() {
        let catalog = catalog();
        let query = ViewQuery {
            in_stock_only: true,
            ..ViewQuery::default()
        };
        assert_eq!(ids(&apply(&catalog, &query)), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_predicates_compose_by_conjunction() {
        let catalog = catalog();
        let query = ViewQuery {
            search: "e".to_string(),
            category: "Minuman".to_string(),
            in_stock_only: true,
            ..ViewQuery::default()
        };
        assert_eq!(ids(&apply(&catalog, &query)), vec!["c"]);
    }

    #[test]
    fn test_sort_modes() {
        let catalog = catalog();
        let sorted = |sort| {
            ids(&apply(
                &catalog,
                &ViewQuery {
                    sort,
                    ..ViewQuery::default()
                },
            ))
        };
        assert_eq!(sorted(SortMode::Low), vec!["b", "c", "a", "d"]);
        assert_eq!(sorted(SortMode::High), vec!["d", "a", "b", "c"]);
        assert_eq!(sorted(SortMode::Az), vec!["d", "a", "b", "c"]);
        assert_eq!(sorted(SortMode::Popular), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_sort_is_stable_on_price_ties() {
        // b and c share a price; both price sorts keep b before c.
        let catalog = catalog();
        let query = ViewQuery {
            sort: SortMode::Low,
            ..ViewQuery::default()
        };
        let order = ids(&apply(&catalog, &query));
        let b = order.iter().position(|id| id == "b").expect("b listed");
        let c = order.iter().position(|id| id == "c").expect("c listed");
        assert!(b < c);
    }

    #[test]
    fn test_sort_mode_names_round_trip() {
        for mode in [SortMode::Low, SortMode::High, SortMode::Az, SortMode::Popular] {
            assert_eq!(SortMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(SortMode::parse("newest"), None);
    }
}
