//! Checkout: turn a cart into an order, optionally redeeming the active code.
//!
//! Every check runs before the first write, so a rejected checkout leaves
//! the cart, the ledger and the order log exactly as they were.

use chrono::Utc;
use shoplite_core::{DiscountStatus, Money, Order, OrderId, UserId};
use tracing::instrument;

use super::cart::{clear_cart, get_cart};
use super::discounts::expire_stale_active;
use super::error::CommerceError;
use crate::store::Store;

/// Place an order for everything in the shopper's cart.
///
/// A non-blank `discount_code` must match the currently active code. On
/// success the code is consumed, the cart emptied, the global order count
/// incremented, and any active code made stale by the new count expired.
///
/// # Errors
///
/// - [`CommerceError::MissingUserId`] for a blank user id.
/// - [`CommerceError::EmptyCart`] if there is nothing to buy.
/// - [`CommerceError::SubtotalTooLarge`] if the cart does not sum within
///   `u64`; no order is stored.
/// - [`CommerceError::InvalidDiscountCode`] if the supplied code is not the
///   active one.
/// - [`CommerceError::NegativeTotal`] if the discount exceeds the subtotal.
#[instrument(skip(store, discount_code))]
pub fn checkout(
    store: &mut Store,
    user_id: &str,
    discount_code: Option<&str>,
) -> Result<Order, CommerceError> {
    let user_id = UserId::parse(user_id)?;

    let cart = get_cart(store, &user_id)?;
    if cart.cart.items.is_empty() {
        return Err(CommerceError::EmptyCart);
    }
    let subtotal = cart.subtotal;
    let items = cart.cart.items.clone();

    let provided = discount_code.map(str::trim).filter(|c| !c.is_empty());
    let redeemed = match provided {
        Some(candidate) => {
            let active = store
                .active_code()
                .filter(|c| c.redeemable_by(candidate))
                .ok_or(CommerceError::InvalidDiscountCode)?;
            Some((active.code.clone(), active.percent))
        }
        None => None,
    };

    // A percentage whose result overflows is necessarily above 100%.
    let discount = match &redeemed {
        Some((_, percent)) => subtotal
            .percent_of(*percent)
            .ok_or(CommerceError::NegativeTotal)?,
        None => Money::ZERO,
    };
    let total = subtotal
        .checked_sub(discount)
        .ok_or(CommerceError::NegativeTotal)?;

    let order = Order {
        id: OrderId::generate(),
        user_id: user_id.clone(),
        items,
        subtotal,
        discount,
        total,
        discount_code_used: redeemed.map(|(code, _)| code),
        created_at: Utc::now(),
    };
    store.orders.push(order.clone());

    if order.discount_code_used.is_some() {
        if let Some(active) = store.active_code_mut() {
            active.status = DiscountStatus::Used;
            active.used_at_order_id = Some(order.id);
            tracing::info!(code = %active.code, order_id = %order.id, "discount code redeemed");
        }
        store.active_code = None;
    }

    clear_cart(store, &user_id);
    store.order_count += 1;
    expire_stale_active(store);

    tracing::info!(
        order_id = %order.id,
        user_id = %order.user_id,
        subtotal = %order.subtotal,
        discount = %order.discount,
        total = %order.total,
        order_count = store.order_count,
        "order placed"
    );

    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::num::NonZeroU64;

    use shoplite_core::{Cart, CartItem, DiscountCode};

    use super::*;
    use crate::services::cart::{NewCartItem, add_item};
    use crate::services::discounts::generate_discount_code;

    fn store(n: u64, order_count: u64) -> Store {
        let mut store = Store::new(NonZeroU64::new(n).unwrap());
        store.order_count = order_count;
        store
    }

    fn with_active(mut store: Store, code: &str, milestone: u64) -> Store {
        store
            .discount_codes
            .push(DiscountCode::new(code.to_string(), 10, milestone));
        store.active_code = Some(store.discount_codes.len() - 1);
        store
    }

    fn add(store: &mut Store, user: &str, sku: &str, price: i64, qty: i64) {
        let item = NewCartItem {
            sku: sku.to_string(),
            name: sku.to_uppercase(),
            price: Some(price),
            qty: Some(qty),
        };
        add_item(store, user, item).unwrap();
    }

    fn cart_len(store: &mut Store, user: &str) -> usize {
        get_cart(store, &UserId::parse(user).unwrap())
            .unwrap()
            .cart
            .items
            .len()
    }

    #[test]
    fn test_rejects_blank_user() {
        let mut store = store(5, 0);
        for user in ["", "   "] {
            let err = checkout(&mut store, user, None).unwrap_err();
            assert_eq!(err.to_string(), "userId is required");
        }
    }

    #[test]
    fn test_rejects_empty_cart() {
        let mut store = store(5, 0);
        let err = checkout(&mut store, "u1", None).unwrap_err();
        assert_eq!(err.to_string(), "Cart is empty");
        assert_eq!(store.order_count(), 0);
    }

    #[test]
    fn test_order_without_discount() {
        let mut store = store(5, 0);
        add(&mut store, "u1", "a", 1000, 2);
        add(&mut store, "u1", "b", 500, 1);

        let order = checkout(&mut store, "u1", None).unwrap();

        assert_eq!(order.user_id.as_str(), "u1");
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.subtotal, Money::new(2500));
        assert_eq!(order.discount, Money::ZERO);
        assert_eq!(order.total, Money::new(2500));
        assert_eq!(order.discount_code_used, None);

        assert_eq!(store.orders().len(), 1);
        assert_eq!(store.orders()[0].id, order.id);
        assert_eq!(cart_len(&mut store, "u1"), 0);
        assert_eq!(store.order_count(), 1);
    }

    #[test]
    fn test_blank_code_is_treated_as_absent() {
        let mut store = store(5, 0);
        add(&mut store, "u1", "a", 100, 1);
        let order = checkout(&mut store, "u1", Some("   ")).unwrap();
        assert_eq!(order.discount, Money::ZERO);
    }

    #[test]
    fn test_code_without_active_code_is_invalid() {
        let mut store = store(5, 0);
        add(&mut store, "u1", "a", 1000, 1);
        let err = checkout(&mut store, "u1", Some("SAVE10-AAAAAA")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid discount code");
    }

    #[test]
    fn test_wrong_code_is_invalid_and_changes_nothing() {
        let mut store = with_active(store(5, 0), "SAVE10-CORRECT", 5);
        add(&mut store, "u1", "a", 1000, 1);

        let err = checkout(&mut store, "u1", Some("SAVE10-WRONG")).unwrap_err();

        assert_eq!(err, CommerceError::InvalidDiscountCode);
        assert_eq!(cart_len(&mut store, "u1"), 1);
        assert!(store.orders().is_empty());
        assert_eq!(store.order_count(), 0);
        assert!(store.active_code().unwrap().is_active());
    }

    #[test]
    fn test_non_active_code_is_invalid() {
        let mut store = with_active(store(5, 0), "SAVE10-AAAAAA", 5);
        store.discount_codes[0].status = DiscountStatus::Used;
        add(&mut store, "u1", "a", 1000, 1);

        let err = checkout(&mut store, "u1", Some("SAVE10-AAAAAA")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid discount code");
    }

    #[test]
    fn test_valid_code_applies_rounded_discount_and_is_consumed() {
        let mut store = with_active(store(5, 0), "SAVE10-OK", 5);
        add(&mut store, "u1", "a", 999, 1);

        let order = checkout(&mut store, "u1", Some(" SAVE10-OK ")).unwrap();

        assert_eq!(order.subtotal, Money::new(999));
        assert_eq!(order.discount, Money::new(100));
        assert_eq!(order.total, Money::new(899));
        assert_eq!(order.discount_code_used.as_deref(), Some("SAVE10-OK"));

        let code = &store.discount_codes()[0];
        assert_eq!(code.status, DiscountStatus::Used);
        assert_eq!(code.used_at_order_id, Some(order.id));
        assert!(store.active_code().is_none());

        assert_eq!(cart_len(&mut store, "u1"), 0);
        assert_eq!(store.order_count(), 1);
    }

    #[test]
    fn test_discount_on_large_subtotal_is_exact() {
        let mut store = with_active(store(5, 0), "SAVE10-BIG", 5);
        add(&mut store, "u1", "a", 5_000_000_000_000_000_000, 1);

        let order = checkout(&mut store, "u1", Some("SAVE10-BIG")).unwrap();

        assert_eq!(order.subtotal, Money::new(5_000_000_000_000_000_000));
        assert_eq!(order.discount, Money::new(500_000_000_000_000_000));
        assert_eq!(order.total, Money::new(4_500_000_000_000_000_000));
    }

    #[test]
    fn test_overflowing_cart_is_rejected_without_an_order() {
        let mut store = store(5, 0);
        let user = UserId::parse("u1").unwrap();
        let mut cart = Cart::empty(user.clone());
        cart.items.push(CartItem {
            sku: "a".to_string(),
            name: "A".to_string(),
            price: Money::new(5_000_000_000_000_000_000),
            qty: 4,
        });
        store.carts.insert(user, cart);

        let err = checkout(&mut store, "u1", None).unwrap_err();

        assert_eq!(err, CommerceError::SubtotalTooLarge);
        assert!(store.orders().is_empty());
        assert_eq!(store.order_count(), 0);
    }

    #[test]
    fn test_consumed_code_cannot_be_reused() {
        let mut store = with_active(store(5, 0), "SAVE10-ONCE", 5);
        add(&mut store, "u1", "a", 100, 1);
        checkout(&mut store, "u1", Some("SAVE10-ONCE")).unwrap();

        add(&mut store, "u2", "a", 100, 1);
        let err = checkout(&mut store, "u2", Some("SAVE10-ONCE")).unwrap_err();
        assert_eq!(err, CommerceError::InvalidDiscountCode);
    }

    #[test]
    fn test_crossing_milestone_expires_older_active_code() {
        let mut store = with_active(store(5, 4), "SAVE10-OLD", 0);
        add(&mut store, "u1", "a", 1000, 1);

        checkout(&mut store, "u1", None).unwrap();

        assert_eq!(store.order_count(), 5);
        assert_eq!(store.discount_codes()[0].status, DiscountStatus::Expired);
        assert!(store.active_code().is_none());
    }

    #[test]
    fn test_crossing_milestone_keeps_current_milestone_code() {
        let mut store = with_active(store(5, 4), "SAVE10-CURR", 5);
        add(&mut store, "u1", "a", 1000, 1);

        checkout(&mut store, "u1", None).unwrap();

        assert_eq!(store.order_count(), 5);
        let active = store.active_code().unwrap();
        assert_eq!(active.code, "SAVE10-CURR");
        assert!(active.is_active());
    }

    #[test]
    fn test_full_milestone_cycle() {
        let mut store = store(2, 0);

        for _ in 0..2 {
            add(&mut store, "u1", "a", 500, 1);
            checkout(&mut store, "u1", None).unwrap();
        }
        let code = generate_discount_code(&mut store).unwrap().code.code;

        add(&mut store, "u2", "b", 2000, 1);
        let order = checkout(&mut store, "u2", Some(&code)).unwrap();
        assert_eq!(order.discount, Money::new(200));

        let err = generate_discount_code(&mut store).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Discount for order 2 was already used. Next code unlocks at order 4."
        );

        add(&mut store, "u1", "a", 500, 1);
        checkout(&mut store, "u1", None).unwrap();
        let next = generate_discount_code(&mut store).unwrap();
        assert_eq!(next.code.unlocked_at_order_number, 4);
        assert!(!next.already_existed);
    }

    #[test]
    fn test_order_count_increments_on_every_path() {
        let mut store = with_active(store(5, 0), "SAVE10-X", 5);
        add(&mut store, "u1", "a", 100, 1);
        checkout(&mut store, "u1", Some("SAVE10-X")).unwrap();
        add(&mut store, "u1", "a", 100, 1);
        checkout(&mut store, "u1", None).unwrap();
        assert_eq!(store.order_count(), 2);
        assert_eq!(store.orders().len(), 2);
    }

    #[test]
    fn test_never_more_than_one_active_code() {
        let mut store = store(3, 0);
        for round in 0..20_u32 {
            add(&mut store, "u1", "a", 100, 1);
            let code = if round % 4 == 0 {
                generate_discount_code(&mut store).ok().map(|g| g.code.code)
            } else {
                None
            };
            checkout(&mut store, "u1", code.as_deref()).unwrap();
            let _ = generate_discount_code(&mut store);

            let active = store
                .discount_codes()
                .iter()
                .filter(|c| c.is_active())
                .count();
            assert!(active <= 1, "round {round}: {active} active codes");
        }
    }
}
