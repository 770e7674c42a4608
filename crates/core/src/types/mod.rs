//! Core types for ShopLite.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod discount;
pub mod id;
pub mod money;
pub mod order;
pub mod product;
pub mod status;
pub mod user_id;

pub use cart::{Cart, CartError, CartItem};
pub use discount::DiscountCode;
pub use id::*;
pub use money::{Money, calc_subtotal};
pub use order::Order;
pub use product::Product;
pub use status::DiscountStatus;
pub use user_id::{UserId, UserIdError};
