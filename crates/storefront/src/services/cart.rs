//! Per-shopper cart operations.

use serde::{Deserialize, Serialize};
use shoplite_core::{Cart, CartItem, Money, UserId};
use tracing::instrument;

use super::error::CommerceError;
use crate::store::Store;

/// A cart together with its computed subtotal.
#[derive(Debug, Serialize)]
pub struct CartView<'a> {
    pub cart: &'a Cart,
    pub subtotal: Money,
}

impl<'a> TryFrom<&'a Cart> for CartView<'a> {
    type Error = CommerceError;

    fn try_from(cart: &'a Cart) -> Result<Self, Self::Error> {
        let subtotal = cart.subtotal().ok_or(CommerceError::SubtotalTooLarge)?;
        Ok(Self { cart, subtotal })
    }
}

/// An item as submitted by a client, before validation.
///
/// Missing fields deserialize to values that fail validation, so the client
/// gets the field-specific message rather than a generic parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCartItem {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub qty: Option<i64>,
}

impl NewCartItem {
    /// Validate into a [`CartItem`], reporting the first invalid field.
    ///
    /// # Errors
    ///
    /// Returns the `CommerceError` naming the first field that is blank,
    /// missing or out of range. A quantity above `u32::MAX` is
    /// [`CommerceError::QuantityTooLarge`].
    pub fn validate(self) -> Result<CartItem, CommerceError> {
        if self.sku.trim().is_empty() {
            return Err(CommerceError::MissingSku);
        }
        if self.name.trim().is_empty() {
            return Err(CommerceError::MissingName);
        }
        let price = self
            .price
            .and_then(|p| u64::try_from(p).ok())
            .ok_or(CommerceError::InvalidPrice)?;
        let qty = match self.qty {
            Some(q) if q > 0 => {
                u32::try_from(q).map_err(|_| CommerceError::QuantityTooLarge)?
            }
            _ => return Err(CommerceError::InvalidQuantity),
        };

        Ok(CartItem {
            sku: self.sku,
            name: self.name,
            price: Money::new(price),
            qty,
        })
    }
}

/// Get the cart for `user_id`, creating and storing an empty one if needed.
///
/// # Errors
///
/// [`CommerceError::SubtotalTooLarge`] if the stored items no longer sum
/// within `u64`; [`add_item`] never lets a cart reach that state.
pub fn get_cart<'a>(
    store: &'a mut Store,
    user_id: &UserId,
) -> Result<CartView<'a>, CommerceError> {
    CartView::try_from(&*cart_entry(store, user_id))
}

/// Add `item` to the shopper's cart.
///
/// An item whose sku is already in the cart has its quantity increased and
/// its name and price replaced with the new values.
///
/// # Errors
///
/// Returns a client-input `CommerceError` if the user id is blank, any item
/// field is invalid, or the merged quantity or subtotal would overflow. The
/// cart is untouched on error.
#[instrument(skip(store, item), fields(sku = %item.sku))]
pub fn add_item<'a>(
    store: &'a mut Store,
    user_id: &str,
    item: NewCartItem,
) -> Result<CartView<'a>, CommerceError> {
    let user_id = UserId::parse(user_id)?;
    let item = item.validate()?;

    tracing::debug!(qty = item.qty, price = %item.price, "adding item to cart");

    let cart = cart_entry(store, &user_id);
    cart.merge(item)?;
    CartView::try_from(&*cart)
}

/// Replace the shopper's cart with an empty one.
pub fn clear_cart(store: &mut Store, user_id: &UserId) {
    store
        .carts
        .insert(user_id.clone(), Cart::empty(user_id.clone()));
}

fn cart_entry<'a>(store: &'a mut Store, user_id: &UserId) -> &'a mut Cart {
    store
        .carts
        .entry(user_id.clone())
        .or_insert_with(|| Cart::empty(user_id.clone()))
}
