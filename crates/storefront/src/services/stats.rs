//! Read-only sales statistics for the admin dashboard.

use serde::Serialize;
use shoplite_core::{DiscountCode, Money};

use super::error::CommerceError;
use crate::store::Store;

/// Aggregates over the order log plus every issued discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Sum of line quantities across all orders.
    pub items_purchased_count: u64,
    /// Sum of order subtotals (before discounts).
    pub total_purchase_amount: Money,
    pub total_discount_amount: Money,
    pub discount_codes: Vec<DiscountCode>,
}

/// Compute [`StoreStats`] without mutating the store.
///
/// # Errors
///
/// [`CommerceError::Internal`] if a total no longer fits in `u64`.
pub fn get_stats(store: &Store) -> Result<StoreStats, CommerceError> {
    let orders = store.orders();
    let overflow = |what: &str| CommerceError::Internal(format!("{what} overflowed u64"));

    let items_purchased_count = orders
        .iter()
        .try_fold(0_u64, |acc, o| acc.checked_add(o.item_count()))
        .ok_or_else(|| overflow("items purchased"))?;
    let total_purchase_amount = orders
        .iter()
        .try_fold(Money::ZERO, |acc, o| acc.checked_add(o.subtotal))
        .ok_or_else(|| overflow("purchase total"))?;
    let total_discount_amount = orders
        .iter()
        .try_fold(Money::ZERO, |acc, o| acc.checked_add(o.discount))
        .ok_or_else(|| overflow("discount total"))?;

    Ok(StoreStats {
        items_purchased_count,
        total_purchase_amount,
        total_discount_amount,
        discount_codes: store.discount_codes().to_vec(),
    })
}
