//! Storefront service error types.

use shoplite_core::{CartError, DiscountStatus, UserIdError};
use thiserror::Error;

/// Errors returned by the cart, checkout and discount services.
///
/// Every variant except [`CommerceError::Internal`] is a client-input error:
/// the caller can fix it by changing the request. Messages are part of the
/// public API and are returned verbatim to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommerceError {
    #[error("userId is required")]
    MissingUserId,

    #[error("item.sku is required")]
    MissingSku,

    #[error("item.name is required")]
    MissingName,

    #[error("item.price must be >= 0")]
    InvalidPrice,

    #[error("item.qty must be > 0")]
    InvalidQuantity,

    /// Quantity above `u32::MAX`, on its own or merged into an existing line.
    #[error("item.qty is too large")]
    QuantityTooLarge,

    /// Cart subtotal would exceed `u64::MAX` minor units.
    #[error("Cart subtotal is too large")]
    SubtotalTooLarge,

    #[error("Cart is empty")]
    EmptyCart,

    /// No active code, a different code, or a code that is no longer active.
    #[error("Invalid discount code")]
    InvalidDiscountCode,

    #[error("Total cannot be negative")]
    NegativeTotal,

    #[error("Not eligible yet. No orders have been placed.")]
    NoOrdersYet,

    #[error("Not eligible yet. First code unlocks at order {first}.")]
    MilestoneNotReached {
        /// Order count that unlocks the first code.
        first: u64,
    },

    /// The code for this milestone was already consumed or superseded.
    #[error(
        "Discount for order {milestone} was already {status}. Next code unlocks at order {next}."
    )]
    MilestoneSpent {
        milestone: u64,
        status: DiscountStatus,
        next: u64,
    },

    /// Unexpected failure; details are logged, never shown to clients.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CommerceError {
    /// Whether the error was caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

impl From<UserIdError> for CommerceError {
    fn from(err: UserIdError) -> Self {
        match err {
            UserIdError::Blank => Self::MissingUserId,
        }
    }
}

impl From<CartError> for CommerceError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::QuantityOverflow => Self::QuantityTooLarge,
            CartError::SubtotalOverflow => Self::SubtotalTooLarge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_messages() {
        assert_eq!(
            CommerceError::MilestoneNotReached { first: 5 }.to_string(),
            "Not eligible yet. First code unlocks at order 5."
        );
        assert_eq!(
            CommerceError::MilestoneSpent {
                milestone: 25,
                status: DiscountStatus::Used,
                next: 30,
            }
            .to_string(),
            "Discount for order 25 was already used. Next code unlocks at order 30."
        );
        assert_eq!(
            CommerceError::MilestoneSpent {
                milestone: 10,
                status: DiscountStatus::Expired,
                next: 15,
            }
            .to_string(),
            "Discount for order 10 was already expired. Next code unlocks at order 15."
        );
    }

    #[test]
    fn test_client_error_split() {
        assert!(CommerceError::EmptyCart.is_client_error());
        assert!(CommerceError::InvalidDiscountCode.is_client_error());
        assert!(!CommerceError::Internal("lock".to_string()).is_client_error());
    }

    #[test]
    fn test_blank_user_id_maps_to_missing() {
        assert_eq!(
            CommerceError::from(UserIdError::Blank),
            CommerceError::MissingUserId
        );
    }

    #[test]
    fn test_cart_overflow_maps_to_client_errors() {
        let qty = CommerceError::from(CartError::QuantityOverflow);
        assert_eq!(qty.to_string(), "item.qty is too large");
        assert!(qty.is_client_error());

        let subtotal = CommerceError::from(CartError::SubtotalOverflow);
        assert_eq!(subtotal.to_string(), "Cart subtotal is too large");
        assert!(subtotal.is_client_error());
    }
}
