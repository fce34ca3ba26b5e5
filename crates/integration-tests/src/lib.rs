//! Integration tests for the warung storefront engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p warung-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Feed load through checkout over real engine
//!   state, no network
//! - `catalog_reload` - Cart durability across catalog replacement
