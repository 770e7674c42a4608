//! Integer money arithmetic.
//!
//! Amounts are whole minor units (e.g. cents) in a single implicit currency.
//! Keeping everything integral means a discount is always a whole number of
//! cents and totals never accumulate floating-point error.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::cart::CartItem;

/// A non-negative amount in minor currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Create an amount from minor units.
    #[must_use]
    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Amount multiplied by a quantity (a line total), or `None` on overflow.
    #[must_use]
    pub fn checked_times(self, qty: u32) -> Option<Self> {
        self.0.checked_mul(u64::from(qty)).map(Self)
    }

    /// Sum of two amounts, or `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// `percent`% of this amount, rounded to the nearest unit with halves
    /// rounding up.
    ///
    /// Computed in 128 bits, so the result is exact for every amount. It is
    /// `None` only when `percent` exceeds 100 and the result no longer fits.
    ///
    /// ```
    /// use shoplite_core::Money;
    ///
    /// assert_eq!(Money::new(999).percent_of(10), Some(Money::new(100))); // 99.9
    /// assert_eq!(Money::new(5).percent_of(10), Some(Money::new(1))); // 0.5
    /// assert_eq!(Money::new(4).percent_of(10), Some(Money::new(0))); // 0.4
    /// ```
    #[must_use]
    pub fn percent_of(self, percent: u8) -> Option<Self> {
        let scaled = u128::from(self.0) * u128::from(percent) + 50;
        u64::try_from(scaled / 100).ok().map(Self)
    }

    /// Subtract, returning `None` if the result would be negative.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum of `price × qty` over `items`; zero for an empty slice.
///
/// `None` if any line total or the running sum exceeds `u64::MAX`.
#[must_use]
pub fn calc_subtotal(items: &[CartItem]) -> Option<Money> {
    items
        .iter()
        .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.line_total()?))
}
