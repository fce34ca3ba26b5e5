//! Durable cart state and reconciliation against the catalog.
//!
//! The cart is a mapping of product id to positive quantity, kept in
//! insertion order and persisted in full after every mutation. It knows
//! nothing about the catalog: whether an id still resolves to a real
//! product is decided at read time, every time, by
//! [`Cart::reconcile`]. An entry whose product vanished from the feed
//! stays in the cart - the product may reappear on a future load, and
//! the visitor's intent to buy it is worth keeping - but contributes
//! nothing to counts, totals, or the rendered line list.
//!
//! [`Cart`] itself is a pure value: every mutation is a plain state
//! transition. [`CartStore`] pairs it with a [`CartStorage`]
//! collaborator and persists synchronously after each call, so the
//! durable copy and the in-memory copy are never observably different.

use serde_json::Value;
use warung_core::{Price, Product, ProductId};

use crate::catalog::Catalog;
use crate::storage::CartStorage;

/// Namespaced storage key for the persisted cart mapping.
pub const CART_KEY: &str = "warung_cart";

/// An insertion-ordered mapping of product id to positive quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<(ProductId, u32)>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted cart from its serialized form.
    ///
    /// The durable shape is a flat JSON object of id to integer
    /// quantity, in insertion order. A document that is not such an
    /// object yields an empty cart; an individual entry that is not a
    /// positive integer is dropped. Corrupt storage never crashes the
    /// caller.
    #[must_use]
    pub fn from_json(raw: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
            tracing::warn!("persisted cart is not a JSON object, starting empty");
            return Self::new();
        };
        let entries = map
            .into_iter()
            .filter_map(|(id, quantity)| {
                let quantity = quantity.as_u64().and_then(|q| u32::try_from(q).ok())?;
                (quantity > 0).then(|| (ProductId::new(id), quantity))
            })
            .collect();
        Self { entries }
    }

    /// Serialize to the durable flat-object form.
    #[must_use]
    pub fn to_json(&self) -> String {
        let map: serde_json::Map<String, Value> = self
            .entries
            .iter()
            .map(|(id, quantity)| (id.as_str().to_string(), Value::from(*quantity)))
            .collect();
        Value::Object(map).to_string()
    }

    /// Increment the quantity for `id`, creating the entry at 1.
    pub fn add(&mut self, id: &ProductId) {
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| key == id) {
            entry.1 = entry.1.saturating_add(1);
        } else {
            self.entries.push((id.clone(), 1));
        }
    }

    /// Decrement the quantity for `id`.
    ///
    /// A quantity that would reach zero removes the entry instead; the
    /// mapping never holds a zero or negative quantity. Decrementing an
    /// absent id is a no-op, so decrementing past empty is idempotent.
    pub fn decrement(&mut self, id: &ProductId) {
        if let Some(position) = self.entries.iter().position(|(key, _)| key == id) {
            if let Some(entry) = self.entries.get_mut(position) {
                if entry.1 > 1 {
                    entry.1 -= 1;
                } else {
                    self.entries.remove(position);
                }
            }
        }
    }

    /// Delete the entry for `id` unconditionally.
    pub fn remove(&mut self, id: &ProductId) {
        self.entries.retain(|(key, _)| key != id);
    }

    /// Empty the mapping. Confirming intent is the caller's job.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Current quantity for `id`, zero when absent.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map_or(0, |(_, quantity)| *quantity)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.entries.iter().map(|(id, quantity)| (id, *quantity))
    }

    /// Whether the mapping holds no entries at all (resolved or not).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Join this cart against the current catalog.
    ///
    /// Performed on every read; nothing is cached and nothing is
    /// deleted. Entries whose id does not resolve are excluded from the
    /// lines and listed in [`ReconciledCart::unresolved`].
    #[must_use]
    pub fn reconcile<'a>(&self, catalog: &'a Catalog) -> ReconciledCart<'a> {
        let mut lines = Vec::new();
        let mut unresolved = Vec::new();
        for (id, quantity) in self.entries() {
            match catalog.get(id) {
                Some(product) => lines.push(ResolvedLine { product, quantity }),
                None => unresolved.push(id.clone()),
            }
        }
        ReconciledCart { lines, unresolved }
    }
}

/// A cart entry joined to its live product.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLine<'a> {
    /// The product as the current catalog knows it.
    pub product: &'a Product,
    /// Quantity from the cart.
    pub quantity: u32,
}

impl ResolvedLine<'_> {
    /// `price x quantity` for this line.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.saturating_mul(self.quantity)
    }
}

/// The authoritative read-time view of the cart.
#[derive(Debug, Clone)]
pub struct ReconciledCart<'a> {
    /// Resolved entries in cart insertion order.
    pub lines: Vec<ResolvedLine<'a>>,
    /// Ids whose product is absent from the current catalog. Kept in
    /// the durable cart, excluded from every aggregate below.
    pub unresolved: Vec<ProductId>,
}

impl ReconciledCart<'_> {
    /// Sum of quantities over resolved entries only.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of `price x quantity` over resolved entries only.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(ResolvedLine::subtotal).sum()
    }

    /// Whether no entry resolved against the catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A [`Cart`] bound to its durable storage.
///
/// Every mutation persists the full serialized mapping before
/// returning; there is no batching and no eventual consistency.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    cart: Cart,
}

impl<S: CartStorage> CartStore<S> {
    /// Load the last-persisted cart, or an empty one if none exists or
    /// the persisted value is corrupt.
    pub fn load(storage: S) -> Self {
        let cart = storage
            .get(CART_KEY)
            .map(|raw| Cart::from_json(&raw))
            .unwrap_or_default();
        Self { storage, cart }
    }

    /// The in-memory cart, identical to the durable copy.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Increment `id` and persist.
    pub fn add(&mut self, id: &ProductId) {
        self.cart.add(id);
        self.persist();
    }

    /// Decrement `id` (removing at zero) and persist.
    pub fn decrement(&mut self, id: &ProductId) {
        self.cart.decrement(id);
        self.persist();
    }

    /// Remove `id` unconditionally and persist.
    pub fn remove(&mut self, id: &ProductId) {
        self.cart.remove(id);
        self.persist();
    }

    /// Empty the cart and persist.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Tear down the store, handing back its storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let serialized = self.cart.to_json();
        self.storage.set(CART_KEY, &serialized);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use warung_core::Price;

    fn product(id: &str, price: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: String::new(),
            price: Price::new(price),
            unit: None,
            badge: None,
            stock: 5,
            image: String::new(),
            notes: Vec::new(),
        }
    }

    fn id(raw: &str) -> ProductId {
        ProductId::new(raw)
    }

    #[test]
    fn test_add_creates_then_increments() {
        let mut cart = Cart::new();
        cart.add(&id("a"));
        cart.add(&id("a"));
        cart.add(&id("b"));
        assert_eq!(cart.quantity(&id("a")), 2);
        assert_eq!(cart.quantity(&id("b")), 1);
    }

    #[test]
    fn test_decrement_removes_at_zero_and_is_idempotent_at_absent() {
        let mut cart = Cart::new();
        cart.add(&id("a"));
        cart.decrement(&id("a"));
        assert_eq!(cart.quantity(&id("a")), 0);
        assert!(cart.is_empty());
        // Second decrement on the now-absent entry changes nothing.
        cart.decrement(&id("a"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(&id("a"));
        cart.add(&id("b"));
        cart.remove(&id("a"));
        assert_eq!(cart.quantity(&id("a")), 0);
        assert_eq!(cart.quantity(&id("b")), 1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_json_round_trip_keeps_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&id("z"));
        cart.add(&id("a"));
        cart.add(&id("z"));
        let json = cart.to_json();
        assert_eq!(json, "{\"z\":2,\"a\":1}");
        assert_eq!(Cart::from_json(&json), cart);
    }

    #[test]
    fn test_corrupt_persisted_cart_falls_back_to_empty() {
        assert!(Cart::from_json("not json").is_empty());
        assert!(Cart::from_json("[1,2,3]").is_empty());
    }

    #[test]
    fn test_non_positive_persisted_quantities_are_dropped() {
        let cart = Cart::from_json("{\"a\":0,\"b\":-2,\"c\":3,\"d\":\"x\"}");
        assert_eq!(cart.quantity(&id("a")), 0);
        assert_eq!(cart.quantity(&id("b")), 0);
        assert_eq!(cart.quantity(&id("c")), 3);
        assert_eq!(cart.quantity(&id("d")), 0);
    }

    #[test]
    fn test_reconcile_totals_and_counts() {
        // {a:2, b:1} against a=1000, b=500.
        let catalog = Catalog::new(vec![product("a", 1_000), product("b", 500)]);
        let mut cart = Cart::new();
        cart.add(&id("a"));
        cart.add(&id("a"));
        cart.add(&id("b"));
        let reconciled = cart.reconcile(&catalog);
        assert_eq!(reconciled.total(), Price::new(2_500));
        assert_eq!(reconciled.count(), 3);
        assert!(reconciled.unresolved.is_empty());
    }

    #[test]
    fn test_reconcile_excludes_absent_ids_without_deleting_them() {
        let catalog = Catalog::new(vec![product("a", 1_000)]);
        let mut cart = Cart::new();
        cart.add(&id("a"));
        cart.add(&id("a"));
        for _ in 0..5 {
            cart.add(&id("x"));
        }
        let reconciled = cart.reconcile(&catalog);
        assert_eq!(reconciled.count(), 2);
        assert_eq!(reconciled.total(), Price::new(2_000));
        assert_eq!(reconciled.unresolved, vec![id("x")]);
        // The unresolved entry stays in the cart mapping untouched.
        assert_eq!(cart.quantity(&id("x")), 5);
    }

    #[test]
    fn test_reconcile_keeps_cart_insertion_order() {
        let catalog = Catalog::new(vec![product("a", 1), product("b", 2), product("c", 3)]);
        let mut cart = Cart::new();
        cart.add(&id("c"));
        cart.add(&id("a"));
        let order: Vec<&str> = cart
            .reconcile(&catalog)
            .lines
            .iter()
            .map(|line| line.product.id.as_str())
            .collect();
        assert_eq!(order, vec!["c", "a"]);
    }

    #[test]
    fn test_store_persists_after_every_mutation() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add(&id("a"));
        store.add(&id("a"));
        store.decrement(&id("a"));

        // A fresh store over the same storage sees the durable copy.
        let reloaded = CartStore::load(store.into_storage());
        assert_eq!(reloaded.cart().quantity(&id("a")), 1);
    }

    #[test]
    fn test_store_loads_empty_from_missing_or_corrupt_storage() {
        let store = CartStore::load(MemoryStorage::new());
        assert!(store.cart().is_empty());

        let mut corrupt = MemoryStorage::new();
        corrupt.set(CART_KEY, "][");
        let store = CartStore::load(corrupt);
        assert!(store.cart().is_empty());
    }
}
