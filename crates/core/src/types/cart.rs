//! Shopping cart types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::money::{Money, calc_subtotal};
use super::user_id::UserId;

/// Why [`Cart::merge`] refused an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("item.qty is too large")]
    QuantityOverflow,

    #[error("Cart subtotal is too large")]
    SubtotalOverflow,
}

/// One line in a cart, keyed by `sku`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Stock keeping unit; unique within a cart.
    pub sku: String,
    /// Display name at the time it was last added.
    pub name: String,
    /// Unit price at the time it was last added.
    pub price: Money,
    /// Quantity, always at least 1.
    pub qty: u32,
}

impl CartItem {
    /// `price × qty` for this line, or `None` if it does not fit in `u64`.
    #[must_use]
    pub fn line_total(&self) -> Option<Money> {
        self.price.checked_times(self.qty)
    }
}

/// A shopper's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart for `user_id`.
    #[must_use]
    pub const fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }

    /// Sum of the line totals.
    ///
    /// `None` only if `items` was filled directly instead of through
    /// [`Cart::merge`], which keeps the subtotal within `u64`.
    #[must_use]
    pub fn subtotal(&self) -> Option<Money> {
        calc_subtotal(&self.items)
    }

    /// Merge `item` into the cart.
    ///
    /// An existing line with the same sku takes the new name and price and
    /// adds the new quantity to its own; otherwise the item is appended.
    ///
    /// # Errors
    ///
    /// Leaves the cart unchanged and returns a [`CartError`] if the merged
    /// quantity exceeds `u32::MAX` or the resulting subtotal exceeds
    /// `u64::MAX`.
    pub fn merge(&mut self, mut item: CartItem) -> Result<(), CartError> {
        let existing = self.items.iter().position(|it| it.sku == item.sku);

        if let Some(line) = existing.and_then(|idx| self.items.get(idx)) {
            item.qty = line
                .qty
                .checked_add(item.qty)
                .ok_or(CartError::QuantityOverflow)?;
        }

        self.items
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != existing)
            .map(|(_, it)| it)
            .chain(std::iter::once(&item))
            .try_fold(Money::ZERO, |acc, it| acc.checked_add(it.line_total()?))
            .ok_or(CartError::SubtotalOverflow)?;

        match existing.and_then(|idx| self.items.get_mut(idx)) {
            Some(line) => *line = item,
            None => self.items.push(item),
        }
        Ok(())
    }
}
