//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Health check
//!
//! # Products
//! GET  /api/products                  - Product listing
//! GET  /api/products/{sku}            - Product detail
//!
//! # Cart
//! GET    /api/cart?userId=            - Cart and subtotal (creates empty cart)
//! DELETE /api/cart?userId=            - Empty the cart
//! POST   /api/cart/items              - Add or merge an item
//!
//! # Checkout
//! POST /api/checkout                  - Place an order, optionally with a code
//!
//! # Admin
//! POST /api/admin/discounts/generate  - Get or mint the milestone code
//! GET  /api/admin/stats               - Sales totals and issued codes
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::index))
        .route("/api/products/{sku}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/api/cart", get(cart::show).delete(cart::clear))
        .route("/api/cart/items", post(cart::add_item))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/discounts/generate",
            post(admin::generate_discount),
        )
        .route("/api/admin/stats", get(admin::stats))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(product_routes())
        .merge(cart_routes())
        .route("/api/checkout", post(checkout::create))
        .merge(admin_routes())
}
