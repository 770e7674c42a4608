//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::id::OrderId;
use super::money::Money;
use super::user_id::UserId;

/// An immutable record of a completed checkout.
///
/// `items` is a snapshot of the cart at checkout time, so later cart edits or
/// price changes never alter a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    pub subtotal: Money,
    pub discount: Money,
    /// `subtotal - discount`.
    pub total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|it| u64::from(it.qty)).sum()
    }
}
