//! Discount ledger: milestone codes and their lifecycle.
//!
//! Every `N` orders (the store's discount interval) unlock one single-use
//! code. A milestone is the order count floored to a multiple of `N`; the
//! code for a milestone can be generated any time before the next milestone
//! is reached, after which an unused code expires.
//!
//! At most one code is active at a time. The store keeps a reference to it
//! and every ledger decision first runs [`expire_stale_active`] so that
//! reference never outlives its milestone.

use rand::Rng;
use serde::Serialize;
use shoplite_core::{DiscountCode, DiscountStatus};
use tracing::instrument;

use super::error::CommerceError;
use crate::store::Store;

/// Percentage off granted by every milestone code.
pub const DISCOUNT_PERCENT: u8 = 10;

/// Prefix of every generated code.
pub const CODE_PREFIX: &str = "SAVE10";

/// Largest value of the 6 hex-digit random suffix.
const CODE_SUFFIX_MAX: u32 = 0x00FF_FFFF;

/// Result of [`generate_discount_code`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCode {
    pub code: DiscountCode,
    /// `true` when an existing code was returned instead of minting one.
    pub already_existed: bool,
}

/// Expire the active code if a later milestone has been reached.
///
/// Also drops the active reference when it points at a code that is no
/// longer active.
pub(crate) fn expire_stale_active(store: &mut Store) {
    let current_milestone = store.current_milestone();
    let Some(active) = store.active_code_mut() else {
        store.active_code = None;
        return;
    };

    if !active.is_active() {
        store.active_code = None;
        return;
    }

    if active.unlocked_at_order_number < current_milestone {
        active.status = DiscountStatus::Expired;
        tracing::info!(
            code = %active.code,
            milestone = active.unlocked_at_order_number,
            current_milestone,
            "discount code expired unused"
        );
        store.active_code = None;
    }
}

/// Return the active code for the current milestone, minting it if needed.
///
/// Calling this repeatedly within one milestone is idempotent: later calls
/// return the same code with `already_existed` set.
///
/// # Errors
///
/// - [`CommerceError::NoOrdersYet`] before the first order.
/// - [`CommerceError::MilestoneNotReached`] before the first milestone.
/// - [`CommerceError::MilestoneSpent`] if this milestone's code was already
///   used or expired.
#[instrument(skip(store), fields(order_count = store.order_count()))]
pub fn generate_discount_code(store: &mut Store) -> Result<GeneratedCode, CommerceError> {
    expire_stale_active(store);

    let every_n = store.discount_every_n().get();
    if store.order_count() == 0 {
        return Err(CommerceError::NoOrdersYet);
    }

    let milestone = store.current_milestone();
    if milestone == 0 {
        return Err(CommerceError::MilestoneNotReached { first: every_n });
    }

    if let Some(active) = store.active_code() {
        return Ok(GeneratedCode {
            code: active.clone(),
            already_existed: true,
        });
    }

    let existing = store
        .discount_codes
        .iter()
        .position(|c| c.unlocked_at_order_number == milestone);

    if let Some(idx) = existing {
        let code = store
            .discount_codes
            .get(idx)
            .ok_or_else(|| CommerceError::Internal(format!("discount code {idx} vanished")))?;

        return if code.is_active() {
            let code = code.clone();
            store.active_code = Some(idx);
            Ok(GeneratedCode {
                code,
                already_existed: true,
            })
        } else {
            Err(CommerceError::MilestoneSpent {
                milestone,
                status: code.status,
                next: milestone + every_n,
            })
        };
    }

    let code = DiscountCode::new(mint_code(store), DISCOUNT_PERCENT, milestone);
    tracing::info!(code = %code.code, milestone, "discount code generated");

    store.discount_codes.push(code.clone());
    store.active_code = Some(store.discount_codes.len() - 1);

    Ok(GeneratedCode {
        code,
        already_existed: false,
    })
}

/// A `SAVE10-XXXXXX` code not yet issued by this store.
fn mint_code(store: &Store) -> String {
    let mut rng = rand::rng();
    loop {
        let suffix: u32 = rng.random_range(0..=CODE_SUFFIX_MAX);
        let candidate = format!("{CODE_PREFIX}-{suffix:06X}");
        if !store.discount_codes.iter().any(|c| c.code == candidate) {
            return candidate;
        }
    }
}
