//! Warung Core - Shared types library.
//!
//! This crate provides the domain types used across all warung
//! components:
//! - `engine` - Catalog ingestion and cart reconciliation engine
//! - `cli` - Command-line surface for loading catalogs and checking out
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! storage access. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices in smallest currency unit, and the
//!   canonical [`types::Product`] record

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
