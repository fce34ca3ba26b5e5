//! Order serialization: from a reconciled cart to a checkout handoff.
//!
//! Checkout is terminal: the reconciled cart becomes (a) human-readable
//! order lines for the messaging handoff and (b) a machine payload for
//! the payment collaborator. An order is created fresh per checkout
//! attempt; only the most recent one is retained, and its payment
//! `reference` arrives asynchronously later, if at all.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use warung_core::{OrderId, Price};

use crate::cart::ReconciledCart;

/// Checkout precondition failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Zero resolved entries: the caller must surface this as user
    /// feedback and must not open a payment or messaging flow.
    #[error("cart has no resolvable items")]
    EmptyCart,
}

/// One item of the machine payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub sku: String,
    pub name: String,
    /// Unit price in the smallest currency unit.
    pub price: u64,
    pub quantity: u32,
}

/// The machine payload handed to the payment collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct OrderPayload {
    pub order_id: OrderId,
    /// Total in the smallest currency unit, rounded down by
    /// construction (prices are already integers).
    pub amount: u64,
    pub items: Vec<OrderItem>,
}

/// The in-memory record of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub amount: Price,
    /// Supplied by the payment collaborator once a payment session
    /// exists; absent until that response arrives.
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A serialized checkout: the order record plus both renditions.
#[derive(Debug, Clone)]
pub struct CheckoutOrder {
    pub order: Order,
    /// One human-readable line per resolved entry.
    pub lines: Vec<String>,
    pub payload: OrderPayload,
}

/// Generates order ids unique and monotonic within the session.
///
/// Ids are time-based (`ORD-<unix millis>`); two checkouts inside the
/// same millisecond bump the clock value instead of colliding.
#[derive(Debug, Default)]
pub struct OrderIdGenerator {
    last_millis: i64,
}

impl OrderIdGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next order id.
    pub fn next_id(&mut self) -> OrderId {
        let now = Utc::now().timestamp_millis();
        let millis = if now > self.last_millis {
            now
        } else {
            self.last_millis + 1
        };
        self.last_millis = millis;
        OrderId::new(format!("ORD-{millis}"))
    }
}

/// Serialize a reconciled cart into a checkout order.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] when no entry resolved against
/// the catalog; nothing is generated and no id is consumed.
pub fn serialize_order(
    reconciled: &ReconciledCart<'_>,
    ids: &mut OrderIdGenerator,
) -> Result<CheckoutOrder, CheckoutError> {
    if reconciled.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let lines = reconciled
        .lines
        .iter()
        .map(|line| {
            format!(
                "- {} x{} = {}",
                line.product.name,
                line.quantity,
                line.subtotal()
            )
        })
        .collect();

    let items = reconciled
        .lines
        .iter()
        .map(|line| OrderItem {
            sku: line.product.id.to_string(),
            name: line.product.name.clone(),
            price: line.product.price.amount(),
            quantity: line.quantity,
        })
        .collect();

    let amount = reconciled.total();
    let order = Order {
        id: ids.next_id(),
        amount,
        reference: None,
        created_at: Utc::now(),
    };
    let payload = OrderPayload {
        order_id: order.id.clone(),
        amount: amount.amount(),
        items,
    };

    Ok(CheckoutOrder {
        order,
        lines,
        payload,
    })
}

/// Retains the most recent order of the session.
///
/// Each checkout attempt supersedes the previous record; the payment
/// reference is attached to whichever order is current when the
/// collaborator answers.
#[derive(Debug, Default)]
pub struct OrderLog {
    latest: Option<Order>,
}

impl OrderLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new order, superseding the previous one.
    pub fn record(&mut self, order: Order) {
        self.latest = Some(order);
    }

    /// Attach the payment collaborator's reference to the current
    /// order. No-op when no order exists.
    pub fn set_reference(&mut self, reference: impl Into<String>) {
        if let Some(order) = self.latest.as_mut() {
            order.reference = Some(reference.into());
        }
    }

    /// The most recent order, if any checkout happened this session.
    #[must_use]
    pub fn latest(&self) -> Option<&Order> {
        self.latest.as_ref()
    }
}
