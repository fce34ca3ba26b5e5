//! Warung Engine - catalog ingestion and cart reconciliation.
//!
//! This crate is the data backbone of the warung storefront widget. It
//! parses heterogeneous catalog feeds into canonical [`warung_core::Product`]
//! records, maintains a durable cart keyed by product identity,
//! reconciles that cart against a catalog that may have changed since
//! the cart was saved, computes the filtered and sorted views the
//! presentation layer renders, and serializes a finalized order into a
//! checkout payload.
//!
//! Rendering, DOM wiring, and transport details are external
//! collaborators: they call into this engine and display its outputs.
//! The engine never reads ambient state - the caller owns a
//! [`catalog::Catalog`] and a [`cart::CartStore`] and passes them into
//! every operation.
//!
//! # Data flow
//!
//! ```text
//! feed (CSV or JSON) -> feed::parser -> feed::normalizer -> Catalog
//! CartStore <- CartStorage (durable key/value collaborator)
//! Cart::reconcile(Catalog) -> ReconciledCart -> order / message / payment
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod message;
pub mod order;
pub mod payment;
pub mod storage;
pub mod view;

pub use error::EngineError;
