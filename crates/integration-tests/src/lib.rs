//! Integration tests for ShopLite.
//!
//! The tests drive the full storefront router (middleware included) in
//! process with `tower::ServiceExt::oneshot`; no socket is bound and every
//! [`TestApp`] owns a fresh in-memory store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoplite-integration-tests
//! ```

use std::num::NonZeroU64;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use shoplite_storefront::{config::DEFAULT_DISCOUNT_EVERY_N, state::AppState, store::Store};
use tower::ServiceExt;

/// A decoded response: status plus JSON body (`Value::Null` if not JSON).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `error` message of a failed request.
    #[must_use]
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Storefront router over a fresh store.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// App with the default discount interval.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_DISCOUNT_EVERY_N)
    }

    /// App whose discount code unlocks every `n` orders.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    #[must_use]
    pub fn with_every_n(n: u64) -> Self {
        Self::with_interval(NonZeroU64::new(n).expect("discount interval must be non-zero"))
    }

    fn with_interval(discount_every_n: NonZeroU64) -> Self {
        let store = Store::new(discount_every_n);
        Self {
            router: shoplite_storefront::app(AppState::new(store)),
        }
    }

    /// Send a request with an optional raw body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn send(&self, method: Method, uri: &str, body: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map_or_else(Body::empty, Body::from))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    // =========================================================================
    // Shop helpers
    // =========================================================================

    /// Add `qty` of a product to the shopper's cart, asserting success.
    ///
    /// # Panics
    ///
    /// Panics if the request is rejected.
    pub async fn add_item(&self, user_id: &str, sku: &str, price: u64, qty: u32) -> TestResponse {
        let resp = self
            .post_json(
                "/api/cart/items",
                &json!({
                    "userId": user_id,
                    "item": { "sku": sku, "name": sku, "price": price, "qty": qty },
                }),
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "add item failed: {:?}", resp.body);
        resp
    }

    /// Check out the shopper's cart.
    pub async fn checkout(&self, user_id: &str, discount_code: Option<&str>) -> TestResponse {
        let body = discount_code.map_or_else(
            || json!({ "userId": user_id }),
            |code| json!({ "userId": user_id, "discountCode": code }),
        );
        self.post_json("/api/checkout", &body).await
    }

    /// Place `count` single-item orders without a discount code.
    ///
    /// # Panics
    ///
    /// Panics if any checkout fails.
    pub async fn place_orders(&self, count: usize, price: u64) {
        for _ in 0..count {
            self.add_item("filler", "sku-filler", price, 1).await;
            let resp = self.checkout("filler", None).await;
            assert_eq!(resp.status, StatusCode::OK, "checkout failed: {:?}", resp.body);
        }
    }

    /// Call the code generation endpoint.
    pub async fn generate_code(&self) -> TestResponse {
        self.post_json("/api/admin/discounts/generate", &json!({}))
            .await
    }

    pub async fn stats(&self) -> TestResponse {
        self.get("/api/admin/stats").await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
