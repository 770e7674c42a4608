//! Status enums for domain entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a discount code.
///
/// Codes are minted `Active`. `Used` and `Expired` are terminal: a code
/// never returns to `Active` once it leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiscountStatus {
    /// Redeemable at checkout.
    #[default]
    Active,
    /// Consumed by exactly one order.
    Used,
    /// Superseded by a later milestone before anyone redeemed it.
    Expired,
}

impl DiscountStatus {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for DiscountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
