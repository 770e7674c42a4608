//! In-memory store aggregate.
//!
//! One `Store` owns every piece of mutable storefront state: carts, the order
//! log, the discount ledger and the global order counter. Services take it
//! by `&mut` so each call sees and leaves a consistent snapshot; the HTTP
//! layer serializes access through [`crate::state::AppState`].

use std::collections::HashMap;
use std::num::NonZeroU64;

use shoplite_core::{Cart, DiscountCode, Order, UserId};

/// Process-lifetime state for one storefront.
#[derive(Debug)]
pub struct Store {
    pub(crate) discount_every_n: NonZeroU64,
    pub(crate) order_count: u64,
    pub(crate) carts: HashMap<UserId, Cart>,
    pub(crate) orders: Vec<Order>,
    pub(crate) discount_codes: Vec<DiscountCode>,
    /// Index into `discount_codes` of the code checkout will accept.
    pub(crate) active_code: Option<usize>,
}

impl Store {
    /// Create an empty store that unlocks a discount every `discount_every_n`
    /// orders.
    #[must_use]
    pub fn new(discount_every_n: NonZeroU64) -> Self {
        Self {
            discount_every_n,
            order_count: 0,
            carts: HashMap::new(),
            orders: Vec::new(),
            discount_codes: Vec::new(),
            active_code: None,
        }
    }

    #[must_use]
    pub const fn discount_every_n(&self) -> NonZeroU64 {
        self.discount_every_n
    }

    /// Number of successful checkouts so far.
    #[must_use]
    pub const fn order_count(&self) -> u64 {
        self.order_count
    }

    /// The most recent milestone at or below the current order count.
    ///
    /// Zero until the first `discount_every_n` orders have been placed.
    #[must_use]
    pub const fn current_milestone(&self) -> u64 {
        let n = self.discount_every_n.get();
        (self.order_count / n) * n
    }

    /// Orders in placement order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Every code ever issued, in issue order.
    #[must_use]
    pub fn discount_codes(&self) -> &[DiscountCode] {
        &self.discount_codes
    }

    /// The code currently referenced as active, if any.
    #[must_use]
    pub fn active_code(&self) -> Option<&DiscountCode> {
        self.active_code.and_then(|idx| self.discount_codes.get(idx))
    }

    pub(crate) fn active_code_mut(&mut self) -> Option<&mut DiscountCode> {
        self.active_code
            .and_then(|idx| self.discount_codes.get_mut(idx))
    }

    /// The cart for `user_id`, if one has been created.
    #[must_use]
    pub fn cart(&self, user_id: &UserId) -> Option<&Cart> {
        self.carts.get(user_id)
    }

    /// Number of carts allocated so far.
    #[must_use]
    pub fn cart_count(&self) -> usize {
        self.carts.len()
    }
}
