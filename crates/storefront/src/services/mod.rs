//! Business logic services for the storefront.
//!
//! Services are plain functions over a borrowed [`Store`](crate::store::Store);
//! they never lock or touch HTTP types, so they can be driven directly from
//! tests.
//!
//! # Services
//!
//! - `cart` - Per-shopper carts with merge-by-sku semantics
//! - `checkout` - Cart-to-order transaction with discount redemption
//! - `discounts` - Milestone discount-code ledger
//! - `stats` - Read-only sales aggregates
//! - `error` - Shared `CommerceError`

pub mod cart;
pub mod checkout;
pub mod discounts;
pub mod error;
pub mod stats;

pub use cart::{CartView, NewCartItem, add_item, clear_cart, get_cart};
pub use checkout::checkout;
pub use discounts::{GeneratedCode, generate_discount_code};
pub use error::CommerceError;
pub use stats::{StoreStats, get_stats};
