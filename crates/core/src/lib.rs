//! ShopLite Core - Shared domain types.
//!
//! This crate provides the types shared by the ShopLite components:
//! - `storefront` - Cart, checkout and discount-admin HTTP service
//! - `integration-tests` - HTTP-level tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no locking,
//! no HTTP. State transitions live in the storefront services.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money arithmetic, carts, orders and discount codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
