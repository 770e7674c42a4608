//! Cart route handlers.
//!
//! Carts are keyed by the `userId` the client sends; there is no session.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize};
use shoplite_core::{Cart, Money, UserId};
use tracing::instrument;

use crate::error::Result;
use crate::services::{self, CartView, CommerceError, NewCartItem};
use crate::state::AppState;

/// Query string identifying a cart.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    #[serde(default, rename = "userId")]
    pub user_id: String,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub item: NewCartItem,
}

/// Cart response body.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: Cart,
    pub subtotal: Money,
}

impl From<CartView<'_>> for CartResponse {
    fn from(view: CartView<'_>) -> Self {
        Self {
            cart: view.cart.clone(),
            subtotal: view.subtotal,
        }
    }
}

fn parse_user(query: std::result::Result<Query<CartQuery>, QueryRejection>) -> Result<UserId> {
    let Query(query) = query?;
    Ok(UserId::parse(&query.user_id).map_err(CommerceError::from)?)
}

/// Show the shopper's cart, creating it if needed.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    query: std::result::Result<Query<CartQuery>, QueryRejection>,
) -> Result<Json<CartResponse>> {
    let user_id = parse_user(query)?;
    let cart = state.with_store(|store| {
        services::get_cart(store, &user_id).map(CartResponse::from)
    })?;
    Ok(Json(cart))
}

/// Add an item to the shopper's cart.
#[instrument(skip_all)]
pub async fn add_item(
    State(state): State<AppState>,
    body: std::result::Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<CartResponse>> {
    let Json(body) = body?;
    let cart = state.with_store(|store| {
        services::add_item(store, &body.user_id, body.item).map(CartResponse::from)
    })?;
    Ok(Json(cart))
}

/// Empty the shopper's cart.
#[instrument(skip_all)]
pub async fn clear(
    State(state): State<AppState>,
    query: std::result::Result<Query<CartQuery>, QueryRejection>,
) -> Result<Json<CartResponse>> {
    let user_id = parse_user(query)?;
    let cart = state.with_store(|store| {
        services::clear_cart(store, &user_id);
        services::get_cart(store, &user_id).map(CartResponse::from)
    })?;
    tracing::debug!(user_id = %user_id, "cart cleared");
    Ok(Json(cart))
}
