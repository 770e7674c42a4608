//! Application state shared across handlers.

use std::sync::{Arc, Mutex};

use crate::services::CommerceError;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store sits behind a
/// single mutex: every cart mutation, code generation and checkout runs to
/// completion under one lock acquisition, so two requests can never
/// interleave their reads and writes of the ledger.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Store>>,
}

impl AppState {
    /// Create a new application state around a freshly built store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// Do not `.await` inside `f`; the lock is a blocking mutex.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or [`CommerceError::Internal`] if a
    /// previous holder panicked and poisoned the lock.
    pub fn with_store<T>(
        &self,
        f: impl FnOnce(&mut Store) -> Result<T, CommerceError>,
    ) -> Result<T, CommerceError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| CommerceError::Internal("store lock poisoned".to_string()))?;
        f(&mut store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU64;
    use std::sync::atomic::{AtomicU64, Ordering};

    use shoplite_core::DiscountStatus;

    use super::*;
    use crate::services::{NewCartItem, add_item, checkout, generate_discount_code};

    fn state(every_n: u64) -> AppState {
        AppState::new(Store::new(NonZeroU64::new(every_n).unwrap()))
    }

    #[test]
    fn test_clones_share_one_store() {
        let a = state(5);
        let b = a.clone();
        a.with_store(|store| {
            store.order_count = 3;
            Ok(())
        })
        .unwrap();
        assert_eq!(b.with_store(|store| Ok(store.order_count())).unwrap(), 3);
    }

    #[test]
    fn test_errors_pass_through() {
        let err = state(5)
            .with_store(|_| Err::<(), _>(CommerceError::EmptyCart))
            .unwrap_err();
        assert_eq!(err, CommerceError::EmptyCart);
    }

    #[test]
    fn test_poisoned_lock_is_internal_error() {
        let state = state(5);
        let poisoner = state.clone();
        let _ = std::thread::spawn(move || {
            poisoner
                .with_store(|_| -> Result<(), CommerceError> { panic!("boom") })
                .ok();
        })
        .join();

        let err = state.with_store(|_| Ok(())).unwrap_err();
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_concurrent_checkouts_keep_ledger_consistent() {
        const THREADS: usize = 8;
        const ROUNDS: usize = 25;

        let state = state(3);
        let placed = AtomicU64::new(0);

        std::thread::scope(|scope| {
            for t in 0..THREADS {
                let state = state.clone();
                let placed = &placed;
                scope.spawn(move || {
                    let user = format!("user-{t}");
                    for _ in 0..ROUNDS {
                        // Every thread races for the same active code.
                        let code = state
                            .with_store(generate_discount_code)
                            .ok()
                            .map(|generated| generated.code.code);

                        state
                            .with_store(|store| {
                                let item = NewCartItem {
                                    sku: "tee-black".to_string(),
                                    name: "Black Tee".to_string(),
                                    price: Some(999),
                                    qty: Some(1),
                                };
                                add_item(store, &user, item).map(|_| ())
                            })
                            .unwrap();

                        match state.with_store(|store| checkout(store, &user, code.as_deref())) {
                            Ok(_) => {
                                placed.fetch_add(1, Ordering::Relaxed);
                            }
                            Err(err) => assert_eq!(err, CommerceError::InvalidDiscountCode),
                        }
                    }
                });
            }
        });

        state
            .with_store(|store| {
                let placed = placed.load(Ordering::Relaxed);
                assert!(placed > 0);
                assert_eq!(store.order_count(), placed);
                assert_eq!(u64::try_from(store.orders().len()).unwrap(), placed);

                let codes = store.discount_codes();
                let active = codes.iter().filter(|c| c.is_active()).count();
                assert!(active <= 1, "{active} codes active at once");
                if let Some(current) = store.active_code() {
                    assert_eq!(active, 1);
                    assert_eq!(current.unlocked_at_order_number, store.current_milestone());
                }

                let mut milestones: Vec<_> =
                    codes.iter().map(|c| c.unlocked_at_order_number).collect();
                milestones.dedup();
                assert_eq!(milestones.len(), codes.len(), "one code per milestone");

                let used = codes
                    .iter()
                    .filter(|c| c.status == DiscountStatus::Used)
                    .count();
                let redeemed = store
                    .orders()
                    .iter()
                    .filter(|o| o.discount_code_used.is_some())
                    .count();
                assert_eq!(used, redeemed, "each code redeemed at most once");
                Ok(())
            })
            .unwrap();
    }
}
