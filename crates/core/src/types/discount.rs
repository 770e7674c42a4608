//! Milestone discount codes.

use serde::{Deserialize, Serialize};

use super::id::OrderId;
use super::status::DiscountStatus;

/// A single-use percentage discount unlocked at an order-count milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// Redeemable code string, e.g. `SAVE10-3FA91C`.
    pub code: String,
    /// Percentage off the subtotal, 0 to 100.
    pub percent: u8,
    pub status: DiscountStatus,
    /// Milestone (a multiple of the discount interval) that unlocked it.
    pub unlocked_at_order_number: u64,
    /// Order that consumed it, once `Used`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_at_order_id: Option<OrderId>,
}

impl DiscountCode {
    /// A freshly minted, active code.
    #[must_use]
    pub const fn new(code: String, percent: u8, milestone: u64) -> Self {
        Self {
            code,
            percent,
            status: DiscountStatus::Active,
            unlocked_at_order_number: milestone,
            used_at_order_id: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == DiscountStatus::Active
    }

    /// Whether `candidate` redeems this code right now.
    #[must_use]
    pub fn redeemable_by(&self, candidate: &str) -> bool {
        self.is_active() && self.code == candidate
    }
}
